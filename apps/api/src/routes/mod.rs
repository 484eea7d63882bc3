pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommendation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/recommend-skills",
            post(handlers::handle_recommend_skills),
        )
        .route(
            "/job-description/:job_title",
            get(handlers::handle_job_description),
        )
        .with_state(state)
}
