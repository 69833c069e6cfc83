//! Admin user management handlers
//!
//! Every route here sits under `/api/admin/**`, which the route policy limits
//! to ADMIN callers.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use jobboard_auth::{AuthUser, Role};
use jobboard_common::{Error, Page, PageRequest, Path, Query, Result, ValidatedJson};
use serde::Deserialize;
use validator::Validate;

use super::users::{apply_update, load_user, UserResponse};
use crate::api::middleware::AccountsState;

/// Admin update. May also change the role.
#[derive(Debug, Deserialize, Validate)]
pub struct AdminUpdateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,

    pub role: Option<Role>,
}

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AccountsState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<UserResponse>>> {
    let users = state.users.list(page).await?;
    Ok(Json(users.map(UserResponse::from)))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AccountsState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>> {
    let user = load_user(&state, id).await?;
    Ok(Json(user.into()))
}

/// PUT /api/admin/users/{id}
pub async fn update_user(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<AdminUpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let user = load_user(&state, id).await?;
    let updated = apply_update(
        &state,
        user,
        req.username,
        req.email,
        req.password,
        req.role,
    )
    .await?;

    tracing::info!(admin_id = ctx.user_id(), user_id = id, "Admin updated user");
    Ok(Json(updated.into()))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    if !state.users.delete(id).await? {
        return Err(Error::NotFound("User not found".to_string()));
    }

    tracing::info!(admin_id = ctx.user_id(), user_id = id, "Admin deleted user");
    Ok(StatusCode::NO_CONTENT)
}
