//! Jobs domain: categories, job postings, applications

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use repository::{
    ApplicationStore, InMemoryApplicationStore, InMemoryJobPostStore, JobPostStore,
    PgApplicationStore, PgJobPostStore,
};

pub use api::routes;
pub use api::JobsState;
