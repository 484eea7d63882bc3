//! Recommendation orchestrator. Runs the full pipeline for one request.
//!
//! Flow: resolve region → fan out one task per taxonomy
//!       (normalize → collect candidates → classify) → generate description
//!       → fan in, re-ordered by taxonomy declaration order → assemble result.
//!
//! No retries and no partial results: the first failed external call fails the request.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{info, info_span, Instrument, Span};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::skill::{JobRequest, RecommendationResult, Taxonomy, TaxonomySkillSet};
use crate::recommendation::candidates::collect_candidates;
use crate::recommendation::classifier::classify;
use crate::recommendation::description::{describe, describe_role};
use crate::recommendation::normalizer::normalize;
use crate::recommendation::region::resolve_region;
use crate::retrieval::VectorIndex;

/// Holds the two external collaborators. Cheap to clone; carries no per-request state.
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    llm: Arc<dyn TextGenerator>,
    index: Arc<dyn VectorIndex>,
}

impl RecommendationOrchestrator {
    pub fn new(llm: Arc<dyn TextGenerator>, index: Arc<dyn VectorIndex>) -> Self {
        Self { llm, index }
    }

    /// Builds a complete recommendation: one `TaxonomySkillSet` per taxonomy, in
    /// `Taxonomy::ALL` order, plus a generated job description.
    pub async fn recommend(&self, request: JobRequest) -> Result<RecommendationResult, AppError> {
        let span = info_span!("recommend", request_id = %Uuid::new_v4(), role = %request.role);
        self.run(request).instrument(span).await
    }

    /// Returns a bare generated description for `role`, with no retrieval or classification.
    pub async fn describe_only(&self, role: &str) -> Result<String, AppError> {
        describe_role(self.llm.as_ref(), role).await
    }

    async fn run(&self, request: JobRequest) -> Result<RecommendationResult, AppError> {
        info!(
            "Processing recommendations for domain={}, industry={}",
            request.domain, request.industry
        );
        let region = resolve_region(&request.domain);
        let request = Arc::new(request);

        // Fan out: taxonomy pipelines share no data and run concurrently.
        let mut pipelines = JoinSet::new();
        for (position, taxonomy) in Taxonomy::ALL.into_iter().enumerate() {
            let orchestrator = self.clone();
            let request = Arc::clone(&request);
            pipelines.spawn(
                async move {
                    let outcome = orchestrator.skills_for(&request, taxonomy).await;
                    (position, outcome)
                }
                .instrument(Span::current()),
            );
        }

        // Dropping `pipelines` on an early return aborts the remaining tasks.
        let job_description = describe(
            self.llm.as_ref(),
            &request.role,
            &request.industry,
            &request.domain,
        )
        .await?;
        info!("Generated job description");

        // Fan in, then restore declaration order.
        let mut joined: Vec<(usize, TaxonomySkillSet)> = Vec::with_capacity(Taxonomy::ALL.len());
        while let Some(task) = pipelines.join_next().await {
            let (position, outcome) = task.map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Taxonomy pipeline task failed: {e}"))
            })?;
            joined.push((position, outcome?));
        }
        joined.sort_by_key(|(position, _)| *position);

        let request = Arc::unwrap_or_clone(request);
        Ok(RecommendationResult {
            role: request.role,
            domain: request.domain,
            industry: request.industry,
            region,
            job_description,
            skills: joined.into_iter().map(|(_, set)| set).collect(),
        })
    }

    async fn skills_for(
        &self,
        request: &JobRequest,
        taxonomy: Taxonomy,
    ) -> Result<TaxonomySkillSet, AppError> {
        let normalized = normalize(&request.role, taxonomy);
        info!(
            "Normalized job title for {}: {} -> {}",
            taxonomy, request.role, normalized
        );

        let candidates = collect_candidates(
            self.index.as_ref(),
            self.llm.as_ref(),
            &normalized,
            &request.role,
            &request.industry,
            taxonomy,
        )
        .await?;

        let classified = classify(
            self.llm.as_ref(),
            &candidates,
            &request.role,
            &request.industry,
            taxonomy,
        )
        .await?;

        Ok(TaxonomySkillSet {
            taxonomy,
            hard_skills: classified.hard_skills,
            soft_skills: classified.soft_skills,
        })
    }
}
