//! Job posting API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use jobboard_auth::AuthUser;
use jobboard_common::{
    Error, Page, PageRequest, Path, Query, RepositoryError, Result, ValidatedJson,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::{Validate, ValidationError};

use crate::api::middleware::JobsState;
use crate::domain::entities::{Category, JobPost, JobPostDraft};

const UNKNOWN_EMPLOYER: &str = "Unknown";
const UNSPECIFIED_CATEGORY: &str = "Not Specified";
const UNSPECIFIED_LOCATION: &str = "Not_Specified";

/// Job posting response DTO
#[derive(Debug, Serialize)]
pub struct JobPostResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub skills: Option<String>,
    pub salary: Option<Decimal>,
    pub employer_id: i64,
    pub employer_name: String,
    pub category_id: Option<i64>,
    pub category_name: String,
    pub category_description: String,
}

impl JobPostResponse {
    fn build(job: JobPost, employer_name: Option<String>, category: Option<Category>) -> Self {
        let (category_name, category_description) = match category {
            Some(c) => (
                c.name,
                c.description
                    .unwrap_or_else(|| UNSPECIFIED_CATEGORY.to_string()),
            ),
            None => (
                UNSPECIFIED_CATEGORY.to_string(),
                UNSPECIFIED_CATEGORY.to_string(),
            ),
        };

        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            location: job
                .location
                .unwrap_or_else(|| UNSPECIFIED_LOCATION.to_string()),
            skills: job.skills,
            salary: job.salary,
            employer_id: job.employer_id,
            employer_name: employer_name.unwrap_or_else(|| UNKNOWN_EMPLOYER.to_string()),
            category_id: job.category_id,
            category_name,
            category_description,
        }
    }
}

fn validate_salary(salary: &Decimal) -> std::result::Result<(), ValidationError> {
    if salary.is_sign_negative() {
        return Err(ValidationError::new("negative_salary"));
    }
    Ok(())
}

/// Request body for creating or replacing a job posting
#[derive(Debug, Deserialize, Validate)]
pub struct JobPostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 10000))]
    pub description: String,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    #[validate(length(max = 1000))]
    pub skills: Option<String>,

    #[validate(custom(function = "validate_salary"))]
    pub salary: Option<Decimal>,

    pub category_id: Option<i64>,
}

impl From<JobPostRequest> for JobPostDraft {
    fn from(req: JobPostRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            location: req.location,
            skills: req.skills,
            salary: req.salary,
            category_id: req.category_id,
        }
    }
}

/// Resolve employer names and categories for a set of postings
async fn to_responses(state: &JobsState, jobs: Vec<JobPost>) -> Result<Vec<JobPostResponse>> {
    let mut employers: HashMap<i64, Option<String>> = HashMap::new();
    let mut categories: HashMap<i64, Option<Category>> = HashMap::new();
    let mut responses = Vec::with_capacity(jobs.len());

    for job in jobs {
        if !employers.contains_key(&job.employer_id) {
            let name = state
                .auth
                .find_identity(job.employer_id)
                .await?
                .map(|identity| identity.username);
            employers.insert(job.employer_id, name);
        }

        let category = match job.category_id {
            Some(id) => {
                if !categories.contains_key(&id) {
                    categories.insert(id, state.jobs.find_category(id).await?);
                }
                categories.get(&id).cloned().flatten()
            }
            None => None,
        };

        let employer_name = employers.get(&job.employer_id).cloned().flatten();
        responses.push(JobPostResponse::build(job, employer_name, category));
    }

    Ok(responses)
}

async fn to_response(state: &JobsState, job: JobPost) -> Result<JobPostResponse> {
    to_responses(state, vec![job])
        .await?
        .pop()
        .ok_or_else(|| Error::Internal("Job response conversion produced nothing".to_string()))
}

async fn load_job(state: &JobsState, id: i64) -> Result<JobPost> {
    state
        .jobs
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))
}

/// Loaded posting that the caller owns, or 403
async fn load_owned_job(state: &JobsState, id: i64, user_id: i64) -> Result<JobPost> {
    let job = load_job(state, id).await?;
    if !job.is_owned_by(user_id) {
        tracing::debug!(job_id = id, user_id, "Rejected change to job owned by another employer");
        return Err(Error::Authorization(
            "You do not own this job posting".to_string(),
        ));
    }
    Ok(job)
}

async fn check_category(state: &JobsState, category_id: Option<i64>) -> Result<()> {
    if let Some(id) = category_id {
        if state.jobs.find_category(id).await?.is_none() {
            return Err(Error::Validation(format!("Unknown category: {}", id)));
        }
    }
    Ok(())
}

/// GET /api/jobs
pub async fn list_jobs(
    State(state): State<JobsState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Page<JobPostResponse>>> {
    let jobs = state.jobs.list(page).await?;
    let content = to_responses(&state, jobs.content).await?;

    Ok(Json(Page {
        content,
        page: jobs.page,
        size: jobs.size,
        total_elements: jobs.total_elements,
        total_pages: jobs.total_pages,
    }))
}

/// GET /api/jobs/{id}
pub async fn get_job(
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<Json<JobPostResponse>> {
    tracing::debug!(job_id = id, "Fetching job");
    let job = load_job(&state, id).await?;
    Ok(Json(to_response(&state, job).await?))
}

/// POST /api/jobs
pub async fn create_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    ValidatedJson(req): ValidatedJson<JobPostRequest>,
) -> Result<(StatusCode, Json<JobPostResponse>)> {
    check_category(&state, req.category_id).await?;

    let job = state.jobs.create(ctx.user_id(), req.into()).await?;
    tracing::info!(job_id = job.id, employer_id = ctx.user_id(), "Job created");

    Ok((StatusCode::CREATED, Json(to_response(&state, job).await?)))
}

/// PUT /api/jobs/{id}
pub async fn update_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<JobPostRequest>,
) -> Result<Json<JobPostResponse>> {
    load_owned_job(&state, id, ctx.user_id()).await?;
    check_category(&state, req.category_id).await?;

    let job = state.jobs.update(id, req.into()).await.map_err(|e| match e {
        RepositoryError::NotFound => Error::NotFound("Job not found".to_string()),
        other => other.into(),
    })?;
    tracing::info!(job_id = id, employer_id = ctx.user_id(), "Job updated");

    Ok(Json(to_response(&state, job).await?))
}

/// DELETE /api/jobs/{id}
pub async fn delete_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    load_owned_job(&state, id, ctx.user_id()).await?;

    if !state.jobs.delete(id).await? {
        return Err(Error::NotFound("Job not found".to_string()));
    }
    tracing::info!(job_id = id, employer_id = ctx.user_id(), "Job deleted");

    Ok(StatusCode::NO_CONTENT)
}
