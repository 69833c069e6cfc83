//! In-memory job posting and application stores
//!
//! Back the `memory` store provider and the test suites.

use async_trait::async_trait;
use chrono::Utc;
use jobboard_common::{Page, PageRequest, RepositoryError};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{ApplicationStore, JobPostStore};
use crate::domain::entities::{
    Application, Category, JobPost, JobPostDraft, NewApplication, DEFAULT_CATEGORIES,
};

fn page_of<T: Clone>(rows: Vec<&T>, page: PageRequest) -> Page<T> {
    let total = rows.len() as i64;
    let content = rows
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size() as usize)
        .cloned()
        .collect();
    Page::new(content, page, total)
}

#[derive(Default)]
struct JobTable {
    next_id: i64,
    jobs: BTreeMap<i64, JobPost>,
    categories: BTreeMap<i64, Category>,
}

#[derive(Default)]
pub struct InMemoryJobPostStore {
    table: RwLock<JobTable>,
}

impl InMemoryJobPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the default categories
    pub fn seeded() -> Self {
        Self::with_categories(
            DEFAULT_CATEGORIES
                .iter()
                .map(|(name, description)| (name.to_string(), Some(description.to_string()))),
        )
    }

    pub fn with_categories(categories: impl IntoIterator<Item = (String, Option<String>)>) -> Self {
        let categories = categories
            .into_iter()
            .zip(1..)
            .map(|((name, description), id)| {
                (
                    id,
                    Category {
                        id,
                        name,
                        description,
                    },
                )
            })
            .collect();

        Self {
            table: RwLock::new(JobTable {
                next_id: 0,
                jobs: BTreeMap::new(),
                categories,
            }),
        }
    }

    /// Number of stored job postings
    pub async fn len(&self) -> usize {
        self.table.read().await.jobs.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl JobPostStore for InMemoryJobPostStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<JobPost>, RepositoryError> {
        Ok(self.table.read().await.jobs.get(&id).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Page<JobPost>, RepositoryError> {
        let table = self.table.read().await;
        Ok(page_of(table.jobs.values().collect(), page))
    }

    async fn create(
        &self,
        employer_id: i64,
        draft: JobPostDraft,
    ) -> Result<JobPost, RepositoryError> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let now = Utc::now();
        let job = JobPost {
            id: table.next_id,
            title: draft.title,
            description: draft.description,
            location: draft.location,
            skills: draft.skills,
            salary: draft.salary,
            employer_id,
            category_id: draft.category_id,
            created_at: now,
            updated_at: now,
        };
        table.jobs.insert(job.id, job.clone());
        Ok(job)
    }

    async fn update(&self, id: i64, draft: JobPostDraft) -> Result<JobPost, RepositoryError> {
        let mut table = self.table.write().await;
        let job = table.jobs.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        job.title = draft.title;
        job.description = draft.description;
        job.location = draft.location;
        job.skills = draft.skills;
        job.salary = draft.salary;
        job.category_id = draft.category_id;
        job.updated_at = Utc::now();
        Ok(job.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        Ok(self.table.write().await.jobs.remove(&id).is_some())
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>, RepositoryError> {
        Ok(self.table.read().await.categories.get(&id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.table.read().await.categories.values().cloned().collect())
    }
}

#[derive(Default)]
struct ApplicationTable {
    next_id: i64,
    rows: BTreeMap<i64, Application>,
}

#[derive(Default)]
pub struct InMemoryApplicationStore {
    table: RwLock<ApplicationTable>,
}

impl InMemoryApplicationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of applications stored for a (job seeker, job posting) pair
    pub async fn count_for(&self, job_seeker_id: i64, job_post_id: i64) -> usize {
        self.table
            .read()
            .await
            .rows
            .values()
            .filter(|a| a.job_seeker_id == job_seeker_id && a.job_post_id == job_post_id)
            .count()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn exists(&self, job_seeker_id: i64, job_post_id: i64) -> Result<bool, RepositoryError> {
        Ok(self.count_for(job_seeker_id, job_post_id).await > 0)
    }

    async fn create(&self, application: NewApplication) -> Result<Application, RepositoryError> {
        let mut table = self.table.write().await;
        let duplicate = table.rows.values().any(|a| {
            a.job_seeker_id == application.job_seeker_id
                && a.job_post_id == application.job_post_id
        });
        if duplicate {
            return Err(RepositoryError::AlreadyExists);
        }

        table.next_id += 1;
        let stored = Application {
            id: table.next_id,
            job_seeker_id: application.job_seeker_id,
            job_post_id: application.job_post_id,
            status: application.status,
            cover_letter: application.cover_letter,
            applied_at: Utc::now(),
        };
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_by_job_seeker(
        &self,
        job_seeker_id: i64,
        page: PageRequest,
    ) -> Result<Page<Application>, RepositoryError> {
        let table = self.table.read().await;
        let rows = table
            .rows
            .values()
            .rev()
            .filter(|a| a.job_seeker_id == job_seeker_id)
            .collect();
        Ok(page_of(rows, page))
    }
}
