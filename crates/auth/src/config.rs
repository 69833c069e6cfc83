//! Authentication configuration

/// Default token lifetime: ten hours
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 36_000;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub token_ttl_seconds: i64,
}

impl AuthConfig {
    /// Config with the given signing secret and no issuer/audience checks
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            issuer: None,
            audience: None,
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }
}
