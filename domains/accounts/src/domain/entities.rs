//! User account entities

use chrono::{DateTime, Utc};
use jobboard_auth::{AuthIdentity, Role};
use serde::Serialize;

/// Stored user account
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Identity view used by the auth gate
    pub fn identity(&self) -> AuthIdentity {
        AuthIdentity {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            role: self.role,
        }
    }
}

/// User account about to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Changes applied to an existing user; `None` leaves the field as is
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.role.is_none()
    }

    /// Apply the changes to a copy of the user
    pub fn apply_to(&self, user: &User) -> User {
        let mut updated = user.clone();
        if let Some(username) = &self.username {
            updated.username = username.clone();
        }
        if let Some(email) = &self.email {
            updated.email = email.clone();
        }
        if let Some(hash) = &self.password_hash {
            updated.password_hash = hash.clone();
        }
        if let Some(role) = self.role {
            updated.role = role;
        }
        updated
    }
}

/// Normalize an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}
