//! Store implementations for the Jobs domain

pub mod applications;
pub mod jobs;
pub mod memory;

use async_trait::async_trait;
use jobboard_common::{Page, PageRequest, RepositoryError};

use crate::domain::entities::{Application, Category, JobPost, JobPostDraft, NewApplication};

pub use applications::PgApplicationStore;
pub use jobs::PgJobPostStore;
pub use memory::{InMemoryApplicationStore, InMemoryJobPostStore};

/// Job postings plus the category reference data they point at
#[async_trait]
pub trait JobPostStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<JobPost>, RepositoryError>;

    /// Postings in id order
    async fn list(&self, page: PageRequest) -> Result<Page<JobPost>, RepositoryError>;

    async fn create(&self, employer_id: i64, draft: JobPostDraft)
        -> Result<JobPost, RepositoryError>;

    /// Replace the editable fields. `NotFound` when the id is unknown.
    async fn update(&self, id: i64, draft: JobPostDraft) -> Result<JobPost, RepositoryError>;

    /// Delete by id, returning whether a record was removed
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;

    async fn find_category(&self, id: i64) -> Result<Option<Category>, RepositoryError>;

    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError>;
}

/// Applications, unique per (job seeker, job posting)
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn exists(&self, job_seeker_id: i64, job_post_id: i64) -> Result<bool, RepositoryError>;

    /// Insert an application. `AlreadyExists` when the pair is already stored.
    async fn create(&self, application: NewApplication) -> Result<Application, RepositoryError>;

    /// The given job seeker's applications, newest first
    async fn list_by_job_seeker(
        &self,
        job_seeker_id: i64,
        page: PageRequest,
    ) -> Result<Page<Application>, RepositoryError>;
}
