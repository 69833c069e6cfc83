//! Category read handlers

use axum::{extract::State, Json};
use jobboard_common::{Error, Path, Result};

use crate::api::middleware::JobsState;
use crate::domain::entities::Category;

/// GET /api/categories
pub async fn list_categories(State(state): State<JobsState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.jobs.list_categories().await?))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<JobsState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>> {
    let category = state
        .jobs
        .find_category(id)
        .await?
        .ok_or_else(|| Error::NotFound("Category not found".to_string()))?;

    Ok(Json(category))
}
