//! Job application handlers
//!
//! The route policy guarantees the caller holds role USER before either
//! handler runs.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use jobboard_auth::AuthUser;
use jobboard_common::{
    Error, Page, PageRequest, Path, Query, RepositoryError, Result, ValidatedJson,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::JobsState;
use crate::domain::entities::{Application, NewApplication};

const ALREADY_APPLIED: &str = "You have already applied for this job";

/// Optional application body
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ApplyRequest {
    #[validate(length(min = 1, max = 32))]
    pub status: Option<String>,

    #[validate(length(max = 5000))]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub id: i64,
    pub job_post_id: i64,
    pub job_seeker_id: i64,
    pub status: String,
    pub cover_letter: Option<String>,
    pub applied_at: DateTime<Utc>,
}

impl From<Application> for ApplicationResponse {
    fn from(a: Application) -> Self {
        Self {
            id: a.id,
            job_post_id: a.job_post_id,
            job_seeker_id: a.job_seeker_id,
            status: a.status,
            cover_letter: a.cover_letter,
            applied_at: a.applied_at,
        }
    }
}

/// POST /api/jobs/{id}/apply
pub async fn apply_for_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<i64>,
    body: Option<ValidatedJson<ApplyRequest>>,
) -> Result<(StatusCode, Json<ApplicationResponse>)> {
    let req = body.map(|ValidatedJson(req)| req).unwrap_or_default();

    let job = state
        .jobs
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    let job_seeker_id = ctx.user_id();
    if state.applications.exists(job_seeker_id, job.id).await? {
        return Err(Error::Conflict(ALREADY_APPLIED.to_string()));
    }

    let application = state
        .applications
        .create(NewApplication::new(
            job_seeker_id,
            job.id,
            req.status,
            req.cover_letter,
        ))
        .await
        .map_err(|e| match e {
            RepositoryError::AlreadyExists => Error::Conflict(ALREADY_APPLIED.to_string()),
            other => other.into(),
        })?;

    tracing::info!(
        application_id = application.id,
        job_id = job.id,
        job_seeker_id,
        "Application submitted"
    );

    Ok((StatusCode::CREATED, Json(application.into())))
}

/// GET /api/applications
pub async fn list_my_applications(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<ApplicationResponse>>> {
    let applications = state
        .applications
        .list_by_job_seeker(ctx.user_id(), page)
        .await?;

    Ok(Json(applications.map(ApplicationResponse::from)))
}
