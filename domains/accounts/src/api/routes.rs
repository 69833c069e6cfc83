//! Route definitions for Accounts domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{admin, auth, users};
use super::middleware::AccountsState;

/// Registration and login
fn auth_routes() -> Router<AccountsState> {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
}

/// Self-service profile routes
fn user_routes() -> Router<AccountsState> {
    Router::new()
        .route(
            "/api/users/me",
            get(users::get_current_user).put(users::update_current_user),
        )
        .route(
            "/api/users/{id}",
            get(users::get_user).put(users::update_user),
        )
}

/// Admin user management routes
fn admin_routes() -> Router<AccountsState> {
    Router::new()
        .route("/api/admin/users", get(admin::list_users))
        .route(
            "/api/admin/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::delete_user),
        )
}

/// Create all Accounts domain API routes
pub fn routes() -> Router<AccountsState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(admin_routes())
}
