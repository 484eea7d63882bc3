// Skill recommendation pipeline.
// Implements: title normalization, region mapping, candidate aggregation,
// classification, job description, and the per-request orchestrator.
// All generation goes through llm_client::TextGenerator; all retrieval through retrieval::VectorIndex.

pub mod candidates;
pub mod classifier;
pub mod description;
pub mod handlers;
pub mod normalizer;
pub mod orchestrator;
pub mod prompts;
pub mod region;
