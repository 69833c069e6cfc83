//! Postgres job posting store

use async_trait::async_trait;
use jobboard_common::{Page, PageRequest, RepositoryError};
use sqlx::PgPool;

use super::JobPostStore;
use crate::domain::entities::{Category, JobPost, JobPostDraft};

const JOB_COLUMNS: &str = "id, title, description, location, skills, salary, employer_id, \
                           category_id, created_at, updated_at";

#[derive(Clone)]
pub struct PgJobPostStore {
    pool: PgPool,
}

impl PgJobPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobPostStore for PgJobPostStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<JobPost>, RepositoryError> {
        sqlx::query_as::<_, JobPost>(&format!(
            "SELECT {JOB_COLUMNS} FROM job_posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<JobPost>, RepositoryError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM job_posts")
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?;

        let jobs = sqlx::query_as::<_, JobPost>(&format!(
            "SELECT {JOB_COLUMNS} FROM job_posts ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(page.size())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(Page::new(jobs, page, total))
    }

    async fn create(
        &self,
        employer_id: i64,
        draft: JobPostDraft,
    ) -> Result<JobPost, RepositoryError> {
        sqlx::query_as::<_, JobPost>(&format!(
            r#"
            INSERT INTO job_posts
                (title, description, location, skills, salary, employer_id, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.location)
        .bind(&draft.skills)
        .bind(draft.salary)
        .bind(employer_id)
        .bind(draft.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)
    }

    async fn update(&self, id: i64, draft: JobPostDraft) -> Result<JobPost, RepositoryError> {
        sqlx::query_as::<_, JobPost>(&format!(
            r#"
            UPDATE job_posts SET
                title = $2,
                description = $3,
                location = $4,
                skills = $5,
                salary = $6,
                category_id = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.location)
        .bind(&draft.skills)
        .bind(draft.salary)
        .bind(draft.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM job_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_category(&self, id: i64) -> Result<Option<Category>, RepositoryError> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        sqlx::query_as::<_, Category>("SELECT id, name, description FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from_sqlx)
    }
}
