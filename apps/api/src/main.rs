mod config;
mod errors;
mod llm_client;
mod models;
mod recommendation;
mod retrieval;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::recommendation::orchestrator::RecommendationOrchestrator;
use crate::retrieval::HttpVectorIndex;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Skill Recommender v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.llm_api_key.clone(), config.llm_api_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize vector index client
    let index = HttpVectorIndex::new(
        &config.vector_index_url,
        config.vector_index_collection.clone(),
    )?;
    info!(
        "Vector index client initialized ({} / {})",
        config.vector_index_url, config.vector_index_collection
    );

    let state = AppState {
        orchestrator: RecommendationOrchestrator::new(Arc::new(llm), Arc::new(index)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
