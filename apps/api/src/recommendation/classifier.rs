//! Skill classifier: one LLM call per taxonomy that partitions candidates into hard/soft
//! skills and assigns each a proficiency level.
//!
//! The model is an untrusted text source. Its reply is parsed strictly as JSON into
//! `ClassifierOutput::Parsed`; anything else is `Unparseable` and triggers a deterministic
//! partition of the candidate pool. No JSON repair, no second call.

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::skill::{SkillCategory, SkillRecord, Taxonomy, DEFAULT_PROFICIENCY};
use crate::recommendation::prompts::{fill, CLASSIFY_PROMPT_TEMPLATE};

/// Candidates considered by the fallback partition.
const FALLBACK_POOL_SIZE: usize = 8;
/// Leading fallback candidates assigned to hard skills; the rest go to soft.
const FALLBACK_HARD_COUNT: usize = 6;

/// One skill entry as the model emits it. `proficiency` may be absent or null.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSkill {
    pub name: String,
    #[serde(default)]
    pub proficiency: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawClassification {
    #[serde(default)]
    hard_skills: Vec<RawSkill>,
    #[serde(default)]
    soft_skills: Vec<RawSkill>,
}

/// Outcome of reading the classifier reply.
#[derive(Debug)]
pub enum ClassifierOutput {
    Parsed {
        hard: Vec<RawSkill>,
        soft: Vec<RawSkill>,
    },
    Unparseable,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedSkills {
    pub hard_skills: Vec<SkillRecord>,
    pub soft_skills: Vec<SkillRecord>,
}

/// Classifies `candidates` for one taxonomy.
///
/// An empty pool yields empty lists without calling the model. A generator failure
/// propagates; a malformed reply never does.
pub async fn classify(
    llm: &dyn TextGenerator,
    candidates: &[String],
    role: &str,
    industry: &str,
    taxonomy: Taxonomy,
) -> Result<ClassifiedSkills, AppError> {
    if candidates.is_empty() {
        warn!("No {} candidates to classify", taxonomy);
        return Ok(ClassifiedSkills::default());
    }

    let joined = candidates.join(", ");
    let prompt = fill(
        CLASSIFY_PROMPT_TEMPLATE,
        &[
            ("role", role),
            ("industry", industry),
            ("taxonomy", taxonomy.as_str()),
            ("candidates", &joined),
        ],
    );

    let raw = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("{taxonomy} classification failed: {e}")))?;

    let classified = match parse_classifier_output(&raw) {
        ClassifierOutput::Parsed { hard, soft } => {
            info!(
                "Parsed {} hard and {} soft skills for {}",
                hard.len(),
                soft.len(),
                taxonomy
            );
            ClassifiedSkills {
                hard_skills: into_records(hard, SkillCategory::Hard),
                soft_skills: into_records(soft, SkillCategory::Soft),
            }
        }
        ClassifierOutput::Unparseable => {
            warn!("Classifier output for {} was not valid JSON, using fallback", taxonomy);
            fallback_partition(candidates)
        }
    };

    for record in classified
        .hard_skills
        .iter()
        .chain(&classified.soft_skills)
        .filter(|r| !r.is_conventional_proficiency())
    {
        warn!(
            "Keeping unconventional proficiency '{}' for {} ({})",
            record.proficiency, record.name, taxonomy
        );
    }

    Ok(classified)
}

/// Strict parse of the model reply. Only surrounding whitespace is tolerated.
pub fn parse_classifier_output(raw: &str) -> ClassifierOutput {
    match serde_json::from_str::<RawClassification>(raw.trim()) {
        Ok(parsed) => ClassifierOutput::Parsed {
            hard: parsed.hard_skills,
            soft: parsed.soft_skills,
        },
        Err(_) => ClassifierOutput::Unparseable,
    }
}

/// Deterministic partition used when the reply is unparseable: the first
/// `FALLBACK_POOL_SIZE` candidates at the default proficiency, the first
/// `FALLBACK_HARD_COUNT` of them hard and the remainder soft.
pub fn fallback_partition(candidates: &[String]) -> ClassifiedSkills {
    let pool = &candidates[..candidates.len().min(FALLBACK_POOL_SIZE)];
    let split = pool.len().min(FALLBACK_HARD_COUNT);
    let (hard, soft) = pool.split_at(split);

    let records = |names: &[String], category: SkillCategory| -> Vec<SkillRecord> {
        names
            .iter()
            .map(|name| SkillRecord {
                name: name.clone(),
                category,
                proficiency: DEFAULT_PROFICIENCY.to_string(),
            })
            .collect()
    };

    ClassifiedSkills {
        hard_skills: records(hard, SkillCategory::Hard),
        soft_skills: records(soft, SkillCategory::Soft),
    }
}

/// Category comes from which array the entry appeared in, never from the model's text.
fn into_records(raw: Vec<RawSkill>, category: SkillCategory) -> Vec<SkillRecord> {
    raw.into_iter()
        .map(|skill| SkillRecord {
            name: skill.name,
            category,
            proficiency: skill
                .proficiency
                .unwrap_or_else(|| DEFAULT_PROFICIENCY.to_string()),
        })
        .collect()
}
