//! User profile API handlers
//!
//! - GET/PUT /api/users/me - the caller's own profile
//! - GET/PUT /api/users/{id} - a profile by id (self or ADMIN, enforced by the route policy)

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use jobboard_auth::{AuthUser, Role};
use jobboard_common::{Error, Path, RepositoryError, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::AccountsState;
use crate::domain::entities::{normalize_email, User, UserChanges};

/// Public view of a user account
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Profile update. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
}

pub(crate) async fn load_user(state: &AccountsState, id: i64) -> Result<User> {
    state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))
}

/// Hash the new password (if any) and write the changes through the store
pub(crate) async fn apply_update(
    state: &AccountsState,
    user: User,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<Role>,
) -> Result<User> {
    let password_hash = match password {
        Some(password) => Some(state.hasher.hash(password).await?),
        None => None,
    };

    let changes = UserChanges {
        username,
        email: email.as_deref().map(normalize_email),
        password_hash,
        role,
    };
    if changes.is_empty() {
        return Ok(user);
    }

    let updated = changes.apply_to(&user);
    match state.users.update(&updated).await {
        Ok(saved) => {
            tracing::info!(user_id = saved.id, "User updated");
            Ok(saved)
        }
        Err(RepositoryError::AlreadyExists) => Err(Error::Conflict(
            "Email is already registered".to_string(),
        )),
        Err(RepositoryError::NotFound) => Err(Error::NotFound("User not found".to_string())),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/users/me
pub async fn get_current_user(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
) -> Result<Json<UserResponse>> {
    let user = load_user(&state, ctx.user_id()).await?;
    Ok(Json(user.into()))
}

/// PUT /api/users/me
pub async fn update_current_user(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let user = load_user(&state, ctx.user_id()).await?;
    let updated = apply_update(&state, user, req.username, req.email, req.password, None).await?;
    Ok(Json(updated.into()))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AccountsState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>> {
    let user = load_user(&state, id).await?;
    Ok(Json(user.into()))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AccountsState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let user = load_user(&state, id).await?;
    let updated = apply_update(&state, user, req.username, req.email, req.password, None).await?;
    Ok(Json(updated.into()))
}
