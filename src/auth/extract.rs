//! Bearer-Token Extractor
//!
//! The middleware contract of the identity layer: handlers declare an
//! [`AuthUser`] argument and receive the resolved principal, or the request is
//! rejected with 401 before the handler body runs.

use super::service::AuthService;
use super::types::Principal;
use crate::error::ApiError;
use anyhow::anyhow;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use std::sync::Arc;

pub struct AuthUser(pub Principal);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth = parts
            .extensions
            .get::<Arc<AuthService>>()
            .cloned()
            .ok_or_else(|| ApiError::Internal(anyhow!("auth service extension not installed")))?;

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Auth("Unauthorized. Missing bearer token.".to_string()))?;

        let principal = auth.verify_token(token)?;
        Ok(AuthUser(principal))
    }
}
