//! Axum route handlers for the Recommendation API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::skill::{JobRequest, RecommendationResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobDescriptionResponse {
    pub job_title: String,
    pub description: String,
}

/// POST /recommend-skills
///
/// Full pipeline: region → per-taxonomy retrieval, aggregation and classification
/// → job description. Returns the whole result or a single error.
pub async fn handle_recommend_skills(
    State(state): State<AppState>,
    Json(request): Json<JobRequest>,
) -> Result<Json<RecommendationResult>, AppError> {
    if request.role.trim().is_empty() {
        return Err(AppError::Validation("role cannot be empty".to_string()));
    }

    let result = state.orchestrator.recommend(request).await?;
    Ok(Json(result))
}

/// GET /job-description/:job_title
pub async fn handle_job_description(
    State(state): State<AppState>,
    Path(job_title): Path<String>,
) -> Result<Json<JobDescriptionResponse>, AppError> {
    if job_title.trim().is_empty() {
        return Err(AppError::Validation("job_title cannot be empty".to_string()));
    }

    let description = state.orchestrator.describe_only(&job_title).await?;
    Ok(Json(JobDescriptionResponse {
        job_title,
        description,
    }))
}
