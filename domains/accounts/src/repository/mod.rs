//! User store implementations for the Accounts domain

pub mod memory;
pub mod users;

use async_trait::async_trait;
use jobboard_auth::{AuthError, AuthIdentity, IdentityLookup};
use jobboard_common::{Page, PageRequest, RepositoryError};
use std::sync::Arc;

use crate::domain::entities::{NewUser, User};

pub use memory::InMemoryUserStore;
pub use users::PgUserStore;

/// Persistent user records keyed by id, unique by email
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    /// Insert a user. `AlreadyExists` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Overwrite a stored user. `NotFound` when the id is unknown, `AlreadyExists`
    /// when the new email belongs to another account.
    async fn update(&self, user: &User) -> Result<User, RepositoryError>;

    /// Delete by id, returning whether a record was removed
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn list(&self, page: PageRequest) -> Result<Page<User>, RepositoryError>;
}

/// Resolves token subjects through the user store
#[derive(Clone)]
pub struct StoreIdentityLookup {
    users: Arc<dyn UserStore>,
}

impl StoreIdentityLookup {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl IdentityLookup for StoreIdentityLookup {
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthIdentity>, AuthError> {
        self.users
            .find_by_email(email)
            .await
            .map(|user| user.map(|u| u.identity()))
            .map_err(|e| {
                tracing::error!(error = %e, "User lookup by email failed");
                AuthError::LookupFailed
            })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AuthIdentity>, AuthError> {
        self.users
            .find_by_id(id)
            .await
            .map(|user| user.map(|u| u.identity()))
            .map_err(|e| {
                tracing::error!(error = %e, user_id = id, "User lookup by id failed");
                AuthError::LookupFailed
            })
    }
}
