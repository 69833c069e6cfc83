//! Identity types used for authentication and authorization decisions

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Account role. Exactly one per identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Employer,
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Employer => write!(f, "EMPLOYER"),
            Role::User => write!(f, "USER"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().trim_start_matches("ROLE_") {
            "ADMIN" => Ok(Role::Admin),
            "EMPLOYER" => Ok(Role::Employer),
            "USER" => Ok(Role::User),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Lightweight identity resolved from a bearer token.
///
/// Carries only what the gate and handlers need; the accounts domain owns the
/// full user record including the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub role: Role,
}
