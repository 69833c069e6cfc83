//! Accounts domain state

use jobboard_auth::{AuthBackend, PasswordHasher};
use std::sync::Arc;

use crate::repository::UserStore;

/// Application state for the Accounts domain
#[derive(Clone)]
pub struct AccountsState {
    pub users: Arc<dyn UserStore>,
    pub auth: AuthBackend,
    pub hasher: PasswordHasher,
}
