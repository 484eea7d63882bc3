//! Candidate aggregation: builds the unclassified skill-name pool for one taxonomy.
//!
//! Retrieval first. When it yields fewer than `MIN_RETRIEVED_CANDIDATES` distinct names,
//! one generative call supplements the pool. The pool is deduplicated by exact string
//! (case-sensitive) and capped at `MAX_CANDIDATES`.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::skill::Taxonomy;
use crate::recommendation::prompts::{fill, CANDIDATE_PROMPT_TEMPLATE, RETRIEVAL_QUERY_TEMPLATE};
use crate::retrieval::retriever::retrieve;
use crate::retrieval::VectorIndex;

pub const RETRIEVAL_LIMIT: usize = 12;
/// Below this many distinct retrieved names the generator is asked for more.
pub const MIN_RETRIEVED_CANDIDATES: usize = 6;
pub const MAX_CANDIDATES: usize = 12;
const MAX_GENERATED_CANDIDATES: usize = 10;
/// Generated tokens of this many characters or fewer are discarded.
const MAX_DISCARDED_TOKEN_CHARS: usize = 2;

/// Collects up to `MAX_CANDIDATES` distinct skill names for `taxonomy`.
///
/// Returns an empty pool if both retrieval and the generator come back empty.
pub async fn collect_candidates(
    index: &dyn VectorIndex,
    llm: &dyn TextGenerator,
    normalized_role: &str,
    role: &str,
    industry: &str,
    taxonomy: Taxonomy,
) -> Result<Vec<String>, AppError> {
    let query = fill(
        RETRIEVAL_QUERY_TEMPLATE,
        &[
            ("normalized", normalized_role),
            ("role", role),
            ("industry", industry),
            ("taxonomy", taxonomy.as_str()),
        ],
    );

    let retrieved = retrieve(index, &query, taxonomy, RETRIEVAL_LIMIT).await?;
    let mut pool = dedup_exact(retrieved.into_iter().map(|r| r.skill_name));
    info!("Retrieved {} {} candidates", pool.len(), taxonomy);

    if pool.len() < MIN_RETRIEVED_CANDIDATES {
        warn!(
            "Sparse retrieval for {} ({} < {}), supplementing with LLM",
            taxonomy,
            pool.len(),
            MIN_RETRIEVED_CANDIDATES
        );
        let prompt = fill(
            CANDIDATE_PROMPT_TEMPLATE,
            &[
                ("role", role),
                ("industry", industry),
                ("taxonomy", taxonomy.as_str()),
            ],
        );
        let raw = llm
            .generate(&prompt)
            .await
            .map_err(|e| AppError::Llm(format!("{taxonomy} candidate generation failed: {e}")))?;

        let generated = parse_generated_candidates(&raw);
        pool = dedup_exact(pool.into_iter().chain(generated));
    }

    pool.truncate(MAX_CANDIDATES);
    Ok(pool)
}

/// Parses a comma-separated list of skill names from free generator text.
///
/// Every character other than a word character, whitespace or comma is stripped first,
/// so "Node.js" becomes "Nodejs" and "C++" is discarded as too short.
pub fn parse_generated_candidates(raw: &str) -> Vec<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == ',' || c.is_whitespace())
        .collect();

    cleaned
        .split(',')
        .map(str::trim)
        .filter(|token| token.chars().count() > MAX_DISCARDED_TOKEN_CHARS)
        .take(MAX_GENERATED_CANDIDATES)
        .map(str::to_string)
        .collect()
}

/// First occurrence wins. Comparison is exact: "Python" and "python" are distinct.
fn dedup_exact(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeGenerator, FakeIndex};

    const SUPPLEMENT_MARKER: &str = "List 8-10 candidate skills";

    fn as_set(pool: &[String]) -> HashSet<&str> {
        pool.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_parse_strips_punctuation_and_short_tokens() {
        let parsed = parse_generated_candidates("Python, SQL, R, Node.js, C++, Communication.");
        assert_eq!(parsed, vec!["Python", "SQL", "Nodejs", "Communication"]);
    }

    #[test]
    fn test_parse_keeps_at_most_ten() {
        let raw = (1..=14)
            .map(|i| format!("Skill{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let parsed = parse_generated_candidates(&raw);
        assert_eq!(parsed.len(), 10);
        assert_eq!(parsed[9], "Skill10");
    }

    #[test]
    fn test_parse_handles_markdown_multiline_output() {
        let parsed = parse_generated_candidates("**Skills:** Data Analysis,\nMachine Learning,\n");
        assert_eq!(parsed, vec!["Skills Data Analysis", "Machine Learning"]);
    }

    #[test]
    fn test_parse_empty_text_yields_nothing() {
        assert!(parse_generated_candidates("").is_empty());
        assert!(parse_generated_candidates(" , ,, ").is_empty());
    }

    #[tokio::test]
    async fn test_sufficient_retrieval_skips_generator() {
        let index = FakeIndex::empty().with_skills(
            Taxonomy::Onet,
            &[
                "Python",
                "SQL",
                "Statistics",
                "Machine Learning",
                "Communication",
                "Teamwork",
            ],
        );
        let llm = FakeGenerator::new("Should, Not, Appear");

        let pool = collect_candidates(
            &index,
            &llm,
            "15-2051.00",
            "data scientist",
            "Finance",
            Taxonomy::Onet,
        )
        .await
        .unwrap();

        assert_eq!(pool.len(), 6);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_query_embeds_normalized_title_role_and_industry() {
        let index = FakeIndex::empty();
        let llm = FakeGenerator::new("");

        collect_candidates(
            &index,
            &llm,
            "252901",
            "data scientist",
            "Finance",
            Taxonomy::Esco,
        )
        .await
        .unwrap();

        assert_eq!(
            index.queries(),
            vec!["Skills for 252901 data scientist role in Finance industry in ESCO"]
        );
    }

    #[tokio::test]
    async fn test_duplicate_retrieval_counts_once_toward_threshold() {
        let index = FakeIndex::empty().with_skills(
            Taxonomy::Onet,
            &["Python", "Python", "SQL", "SQL", "Statistics", "Statistics", "Excel"],
        );
        let llm = FakeGenerator::new("Communication, Leadership");

        let pool = collect_candidates(&index, &llm, "x", "analyst", "Retail", Taxonomy::Onet)
            .await
            .unwrap();

        assert_eq!(llm.calls_containing(SUPPLEMENT_MARKER), 1);
        assert_eq!(
            pool,
            vec!["Python", "SQL", "Statistics", "Excel", "Communication", "Leadership"]
        );
    }

    #[tokio::test]
    async fn test_empty_retrieval_uses_generated_pool() {
        let index = FakeIndex::empty();
        let llm = FakeGenerator::new("Python, SQL, Communication");

        let pool = collect_candidates(
            &index,
            &llm,
            "data scientist",
            "data scientist",
            "Finance",
            Taxonomy::Esco,
        )
        .await
        .unwrap();

        assert_eq!(
            as_set(&pool),
            HashSet::from(["Python", "SQL", "Communication"])
        );
        assert_eq!(pool.len(), 3);
        assert!(llm.prompts()[0].contains("using ESCO"));
    }

    #[tokio::test]
    async fn test_both_sources_empty_yields_empty_pool() {
        let index = FakeIndex::empty();
        let llm = FakeGenerator::new("");

        let pool = collect_candidates(&index, &llm, "x", "x", "y", Taxonomy::Onet)
            .await
            .unwrap();

        assert!(pool.is_empty());
    }

    #[tokio::test]
    async fn test_union_is_deduplicated_and_capped() {
        let index =
            FakeIndex::empty().with_skills(Taxonomy::Onet, &["Alpha", "Bravo", "Charlie"]);
        let llm = FakeGenerator::new(
            "Alpha, Delta, Echo, Foxtrot, Golf, Hotel, India, Juliet, Kilo, Lima",
        );

        let pool = collect_candidates(&index, &llm, "x", "x", "y", Taxonomy::Onet)
            .await
            .unwrap();

        assert_eq!(pool.len(), MAX_CANDIDATES);
        assert_eq!(as_set(&pool).len(), MAX_CANDIDATES);
        assert_eq!(pool.iter().filter(|s| *s == "Alpha").count(), 1);
    }

    /// Known limitation: dedup is exact-string, so case variants both survive.
    #[tokio::test]
    async fn test_case_variants_are_not_merged() {
        let index = FakeIndex::empty().with_skills(Taxonomy::Onet, &["python"]);
        let llm = FakeGenerator::new("Python");

        let pool = collect_candidates(&index, &llm, "x", "x", "y", Taxonomy::Onet)
            .await
            .unwrap();

        assert_eq!(pool, vec!["python", "Python"]);
    }

    #[tokio::test]
    async fn test_whitespace_variants_count_as_distinct() {
        let index = FakeIndex::empty().with_skills(
            Taxonomy::Onet,
            &["Python ", "Python", "SQL", " SQL", "Excel", "R"],
        );
        let llm = FakeGenerator::new("Should, Not, Appear");

        let pool = collect_candidates(&index, &llm, "x", "x", "y", Taxonomy::Onet)
            .await
            .unwrap();

        assert_eq!(pool, vec!["Python ", "Python", "SQL", " SQL", "Excel", "R"]);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_generator_failure_propagates() {
        let index = FakeIndex::empty();
        let llm = FakeGenerator::new("").failing_on(SUPPLEMENT_MARKER);

        let err = collect_candidates(&index, &llm, "x", "x", "y", Taxonomy::Onet)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_index_failure_propagates_without_generator_call() {
        let index = FakeIndex::failing();
        let llm = FakeGenerator::new("Python, SQL");

        let err = collect_candidates(&index, &llm, "x", "x", "y", Taxonomy::Onet)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Retrieval(_)));
        assert_eq!(llm.calls(), 0);
    }
}
