//! Retriever: taxonomy-filtered skill lookup over the vector index.

use tracing::debug;

use crate::errors::AppError;
use crate::models::skill::Taxonomy;
use crate::retrieval::{IndexFilter, Metadata, VectorIndex};

/// Metadata fields that may carry the skill name, in lookup order.
const SKILL_NAME_FIELDS: [&str; 2] = ["skill", "name"];

/// A retrieved skill name plus the raw metadata it came from.
#[derive(Debug, Clone)]
pub struct RetrievedSkill {
    pub skill_name: String,
    pub metadata: Metadata,
}

/// Queries the index for `query_text`, restricted to one taxonomy.
///
/// Records without a usable skill name are dropped. An empty result is a normal
/// "no signal" outcome; only an index failure is an error.
pub async fn retrieve(
    index: &dyn VectorIndex,
    query_text: &str,
    taxonomy: Taxonomy,
    limit: usize,
) -> Result<Vec<RetrievedSkill>, AppError> {
    let records = index
        .query(query_text, &IndexFilter::taxonomy(taxonomy), limit)
        .await
        .map_err(|e| AppError::Retrieval(format!("{taxonomy} query failed: {e}")))?;

    let total = records.len();
    let skills: Vec<RetrievedSkill> = records
        .into_iter()
        .filter_map(|metadata| {
            skill_name(&metadata).map(|skill_name| RetrievedSkill {
                skill_name,
                metadata,
            })
        })
        .collect();

    if skills.len() < total {
        debug!(
            "Dropped {} {} records without a skill name",
            total - skills.len(),
            taxonomy
        );
    }

    Ok(skills)
}

/// First field holding a non-blank string, returned as stored. Surrounding whitespace
/// is only considered for the blank check, so dedup sees the exact indexed text.
fn skill_name(metadata: &Metadata) -> Option<String> {
    SKILL_NAME_FIELDS.iter().find_map(|field| {
        metadata
            .get(*field)
            .and_then(|v| v.as_str())
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string)
    })
}
