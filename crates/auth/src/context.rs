//! Authorization context for authenticated requests

use crate::types::{AuthIdentity, Role};

/// Identity resolved for the current request.
///
/// Inserted into request extensions by the authentication filter and read by
/// the route policy and the `AuthUser` extractor. Lives only as long as the
/// request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub identity: AuthIdentity,
}

impl AuthContext {
    pub fn new(identity: AuthIdentity) -> Self {
        Self { identity }
    }

    pub fn user_id(&self) -> i64 {
        self.identity.id
    }

    pub fn email(&self) -> &str {
        &self.identity.email
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    /// Exact role match. ADMIN does not imply EMPLOYER or USER.
    pub fn has_role(&self, role: Role) -> bool {
        self.identity.role == role
    }

    /// Whether the given account id is the caller's own
    pub fn is_self(&self, user_id: i64) -> bool {
        self.identity.id == user_id
    }
}
