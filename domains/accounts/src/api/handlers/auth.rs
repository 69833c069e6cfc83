//! Registration and login handlers

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use jobboard_auth::{AuthError, Role};
use jobboard_common::{Error, RepositoryError, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::users::UserResponse;
use crate::api::middleware::AccountsState;
use crate::domain::entities::{normalize_email, NewUser};

/// Request for creating an account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// EMPLOYER or USER; defaults to USER
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let role = req.role.unwrap_or(Role::User);
    if role == Role::Admin {
        return Err(Error::Validation(
            "ADMIN accounts cannot be self-registered".to_string(),
        ));
    }

    let email = normalize_email(&req.email);
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(Error::Conflict("Email is already registered".to_string()));
    }

    let password_hash = state.hasher.hash(req.password).await?;
    let user = state
        .users
        .create(NewUser {
            username: req.username,
            email,
            password_hash,
            role,
        })
        .await
        .map_err(|e| match e {
            RepositoryError::AlreadyExists => {
                Error::Conflict("Email is already registered".to_string())
            }
            other => other.into(),
        })?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let email = normalize_email(&req.email);
    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state
        .hasher
        .verify(req.password, user.password_hash.clone())
        .await?
    {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let issued = state.auth.issue_token(&user.identity())?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer",
        expires_at: issued.expires_at,
        user: user.into(),
    }))
}
