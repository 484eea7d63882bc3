use crate::recommendation::orchestrator::RecommendationOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds only the stateless pipeline; every request is computed from scratch.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: RecommendationOrchestrator,
}
