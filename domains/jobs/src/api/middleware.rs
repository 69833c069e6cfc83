//! Jobs domain state

use jobboard_auth::AuthBackend;
use std::sync::Arc;

use crate::repository::{ApplicationStore, JobPostStore};

/// Application state for the Jobs domain
#[derive(Clone)]
pub struct JobsState {
    pub jobs: Arc<dyn JobPostStore>,
    pub applications: Arc<dyn ApplicationStore>,
    /// Resolves employer display names
    pub auth: AuthBackend,
}
