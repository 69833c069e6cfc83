//! Authentication backend
//!
//! Wraps the identity lookup collaborator and the token configuration.
//! Domain states expose this via `FromRef` so handlers can issue tokens and
//! the authentication filter can resolve them.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::{issue_token, validate_token, IssuedToken};
use crate::types::AuthIdentity;

/// Resolves token subjects to identities.
///
/// Implemented by the accounts domain over its user store.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    /// Find an identity by login email
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthIdentity>, AuthError>;

    /// Find an identity by account id
    async fn find_by_id(&self, id: i64) -> Result<Option<AuthIdentity>, AuthError>;
}

/// Concrete authentication backend.
///
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    lookup: Arc<dyn IdentityLookup>,
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(lookup: Arc<dyn IdentityLookup>, config: AuthConfig) -> Self {
        Self { lookup, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Resolve a raw bearer token to an auth context.
    ///
    /// Fails closed: an invalid, expired or unresolvable token yields `None`
    /// and the request proceeds unauthenticated.
    pub async fn authenticate(&self, token: &str) -> Option<AuthContext> {
        let claims = validate_token(token, &self.config).ok()?;

        match self.lookup.find_by_email(&claims.sub).await {
            Ok(Some(identity)) => Some(AuthContext::new(identity)),
            Ok(None) => {
                tracing::debug!(email = %claims.sub, "Token subject does not resolve to an identity");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, email = %claims.sub, "Identity lookup failed during authentication");
                None
            }
        }
    }

    /// Sign a bearer token for the given identity
    pub fn issue_token(&self, identity: &AuthIdentity) -> Result<IssuedToken, AuthError> {
        issue_token(&identity.email, &self.config)
    }

    /// Look up an identity by id (used for display data such as employer names)
    pub async fn find_identity(&self, id: i64) -> Result<Option<AuthIdentity>, AuthError> {
        self.lookup.find_by_id(id).await
    }
}
