use super::extract::AuthUser;
use super::service::AuthService;
use super::types::{
    DeleteAccountRequest, LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest,
    UserView,
};
use crate::error::ApiError;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct ProfileUpdateResponse {
    pub message: String,
    pub user: UserView,
}

pub async fn handle_register(
    Extension(auth): Extension<Arc<AuthService>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    auth.register(req)?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

pub async fn handle_login(
    Extension(auth): Extension<Arc<AuthService>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    Ok(Json(auth.login(req)?))
}

pub async fn handle_me(
    AuthUser(principal): AuthUser,
    Extension(auth): Extension<Arc<AuthService>>,
) -> Result<Json<UserView>, ApiError> {
    Ok(Json(auth.profile(&principal.id)?))
}

pub async fn handle_update_me(
    AuthUser(principal): AuthUser,
    Extension(auth): Extension<Arc<AuthService>>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileUpdateResponse>, ApiError> {
    let user = auth.update_profile(&principal.id, req)?;

    Ok(Json(ProfileUpdateResponse {
        message: "Profile updated successfully".to_string(),
        user,
    }))
}

pub async fn handle_delete_me(
    AuthUser(principal): AuthUser,
    Extension(auth): Extension<Arc<AuthService>>,
    Json(req): Json<DeleteAccountRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    auth.delete_account(&principal.id, req.password.as_deref())?;

    Ok(Json(MessageResponse {
        message: "Account deleted successfully".to_string(),
    }))
}
