//! Postgres application store
//!
//! Uniqueness of (job_seeker_id, job_post_id) is backed by a table constraint;
//! a concurrent duplicate insert surfaces as `AlreadyExists`.

use async_trait::async_trait;
use jobboard_common::{Page, PageRequest, RepositoryError};
use sqlx::PgPool;

use super::ApplicationStore;
use crate::domain::entities::{Application, NewApplication};

const APPLICATION_COLUMNS: &str =
    "id, job_seeker_id, job_post_id, status, cover_letter, applied_at";

#[derive(Clone)]
pub struct PgApplicationStore {
    pool: PgPool,
}

impl PgApplicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationStore for PgApplicationStore {
    async fn exists(&self, job_seeker_id: i64, job_post_id: i64) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM applications
                WHERE job_seeker_id = $1 AND job_post_id = $2
            )
            "#,
        )
        .bind(job_seeker_id)
        .bind(job_post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)
    }

    async fn create(&self, application: NewApplication) -> Result<Application, RepositoryError> {
        sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO applications (job_seeker_id, job_post_id, status, cover_letter)
            VALUES ($1, $2, $3, $4)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(application.job_seeker_id)
        .bind(application.job_post_id)
        .bind(&application.status)
        .bind(&application.cover_letter)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)
    }

    async fn list_by_job_seeker(
        &self,
        job_seeker_id: i64,
        page: PageRequest,
    ) -> Result<Page<Application>, RepositoryError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE job_seeker_id = $1")
                .bind(job_seeker_id)
                .fetch_one(&self.pool)
                .await
                .map_err(RepositoryError::from_sqlx)?;

        let applications = sqlx::query_as::<_, Application>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM applications
            WHERE job_seeker_id = $1
            ORDER BY applied_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(job_seeker_id)
        .bind(page.size())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::from_sqlx)?;

        Ok(Page::new(applications, page, total))
    }
}
