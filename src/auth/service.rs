//! Identity Service
//!
//! Credential issuance and verification: registration with uniqueness checks,
//! login producing a signed bearer token, token resolution to a live
//! principal, and the re-authenticated profile update/delete flows.
//!
//! Passwords are stored only as salted bcrypt hashes and rehashed whenever the
//! plaintext changes.

use super::types::{
    Claims, LoginRequest, LoginResponse, MAX_EMAIL_LENGTH, MAX_USERNAME_LENGTH, MIN_EMAIL_LENGTH,
    MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH, Principal, RegisterRequest, UpdateProfileRequest,
    User, UserView,
};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::store::{Collection, UserStore};
use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use regex::Regex;
use std::sync::Arc;

pub struct AuthService {
    users: Arc<UserStore>,
    jwt_secret: String,
    token_ttl_secs: i64,
    bcrypt_cost: u32,
    email_re: Regex,
}

impl AuthService {
    pub fn new(users: Arc<UserStore>, config: &AppConfig) -> Self {
        Self {
            users,
            jwt_secret: config.jwt_secret.clone(),
            token_ttl_secs: config.token_ttl_secs,
            bcrypt_cost: config.bcrypt_cost,
            email_re: Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").unwrap(),
        }
    }

    pub fn register(&self, req: RegisterRequest) -> Result<UserView, ApiError> {
        self.validate_email(&req.email)?;
        validate_username(&req.username)?;
        validate_password(&req.password)?;

        if self.users.find_by_email(&req.email).is_some() {
            return Err(ApiError::Conflict("Email is already registered".to_string()));
        }
        if self.users.find_by_username(&req.username).is_some() {
            return Err(ApiError::Conflict("Username is already taken".to_string()));
        }

        let user = User {
            id: Collection::<User>::generate_id(),
            email: req.email,
            username: req.username,
            password_hash: self.hash_password(&req.password)?,
            is_critic: req.is_critic,
        };
        self.users.insert(user.clone());

        tracing::info!("registered user {} ({})", user.username, user.id);
        Ok(UserView::from(&user))
    }

    pub fn login(&self, req: LoginRequest) -> Result<LoginResponse, ApiError> {
        let user = self
            .users
            .find_by_email(&req.email)
            .ok_or_else(|| ApiError::Auth("Invalid credentials".to_string()))?;

        if !self.verify_password(&req.password, &user.password_hash)? {
            return Err(ApiError::Auth("Invalid credentials".to_string()));
        }

        let token = self.issue_token(&user)?;
        tracing::info!("login ok for {} (critic={})", user.username, user.is_critic);

        Ok(LoginResponse {
            user: UserView::from(&user),
            token,
        })
    }

    /// Resolves a bearer token to the live account it names. A token for a
    /// deleted account is rejected even before it expires.
    pub fn verify_token(&self, token: &str) -> Result<Principal, ApiError> {
        let decoded = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| ApiError::Auth("Unauthorized. Invalid or expired token.".to_string()))?;

        let user = self
            .users
            .get(&decoded.claims.sub)
            .ok_or_else(|| ApiError::Auth("Unauthorized. Invalid or expired token.".to_string()))?;

        Ok(Principal {
            id: user.id,
            email: user.email,
            username: user.username,
            is_critic: user.is_critic,
        })
    }

    pub fn profile(&self, user_id: &str) -> Result<UserView, ApiError> {
        let user = self
            .users
            .get(user_id)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
        Ok(UserView::from(&user))
    }

    pub fn update_profile(
        &self,
        user_id: &str,
        req: UpdateProfileRequest,
    ) -> Result<UserView, ApiError> {
        let mut user = self
            .users
            .get(user_id)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let email_changes = req.email.as_deref().is_some_and(|e| e != user.email);
        let username_changes = req.username.as_deref().is_some_and(|u| u != user.username);

        // Identity-affecting changes require the current password.
        if email_changes || username_changes || req.new_password.is_some() {
            let current = req.password.as_deref().ok_or_else(|| {
                ApiError::Validation(
                    "Current password is required to update email, username, or password"
                        .to_string(),
                )
            })?;
            if !self.verify_password(current, &user.password_hash)? {
                return Err(ApiError::Auth("Current password is incorrect".to_string()));
            }
        }

        if let Some(email) = req.email {
            self.validate_email(&email)?;
            if email != user.email {
                if self.users.find_by_email(&email).is_some() {
                    return Err(ApiError::Conflict("The new email is already in use".to_string()));
                }
                user.email = email;
            }
        }

        if let Some(username) = req.username {
            validate_username(&username)?;
            if username != user.username {
                if self.users.find_by_username(&username).is_some() {
                    return Err(ApiError::Conflict(
                        "The new username is already in use".to_string(),
                    ));
                }
                user.username = username;
            }
        }

        if let Some(new_password) = req.new_password {
            if req.password.as_deref() == Some(new_password.as_str()) {
                return Err(ApiError::Validation(
                    "The new password cannot be the same as the current one".to_string(),
                ));
            }
            validate_password(&new_password)?;
            user.password_hash = self.hash_password(&new_password)?;
        }

        self.users.put(user.clone());
        Ok(UserView::from(&user))
    }

    /// Self-service deletion, gated on re-authentication.
    pub fn delete_account(&self, user_id: &str, password: Option<&str>) -> Result<(), ApiError> {
        let user = self
            .users
            .get(user_id)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let supplied = password.ok_or_else(|| {
            ApiError::Auth("Incorrect password. The account was not deleted.".to_string())
        })?;
        if !self.verify_password(supplied, &user.password_hash)? {
            return Err(ApiError::Auth(
                "Incorrect password. The account was not deleted.".to_string(),
            ));
        }

        self.users.remove(user_id);
        tracing::info!("deleted account {}", user_id);
        Ok(())
    }

    fn issue_token(&self, user: &User) -> Result<String, ApiError> {
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            is_critic: user.is_critic,
            exp: (Utc::now().timestamp() + self.token_ttl_secs) as usize,
        };

        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| ApiError::Internal(anyhow!(e)))
    }

    fn hash_password(&self, password: &str) -> Result<String, ApiError> {
        bcrypt::hash(password, self.bcrypt_cost).map_err(|e| ApiError::Internal(anyhow!(e)))
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, ApiError> {
        bcrypt::verify(password, hash).map_err(|e| ApiError::Internal(anyhow!(e)))
    }

    fn validate_email(&self, email: &str) -> Result<(), ApiError> {
        if email.len() < MIN_EMAIL_LENGTH || email.len() > MAX_EMAIL_LENGTH {
            return Err(ApiError::Validation(format!(
                "Email must be between {} and {} characters",
                MIN_EMAIL_LENGTH, MAX_EMAIL_LENGTH
            )));
        }
        if !self.email_re.is_match(email) {
            return Err(ApiError::Validation("Please provide a valid email".to_string()));
        }
        Ok(())
    }
}

fn validate_username(username: &str) -> Result<(), ApiError> {
    let len = username.chars().count();
    if len < MIN_USERNAME_LENGTH || len > MAX_USERNAME_LENGTH {
        return Err(ApiError::Validation(format!(
            "Username must be between {} and {} characters",
            MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}
