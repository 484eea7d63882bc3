use serde::{Deserialize, Serialize};

/// Proficiency assigned when the generator omits one, and to every skill in the
/// classifier fallback partition.
pub const DEFAULT_PROFICIENCY: &str = "Intermediate";

/// The conventional four-level scale. Generator output outside it is kept verbatim.
pub const PROFICIENCY_SCALE: [&str; 4] = ["Beginner", "Intermediate", "Advanced", "Expert"];

/// Input to the recommendation pipeline. `domain` is free text, mapped to a region later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    pub role: String,
    pub domain: String,
    pub industry: String,
}

/// One of the supported occupation/skill taxonomies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Taxonomy {
    #[serde(rename = "O*NET")]
    Onet,
    #[serde(rename = "ESCO")]
    Esco,
}

impl Taxonomy {
    /// Every taxonomy, in declaration order. Results are always assembled in this order.
    pub const ALL: [Taxonomy; 2] = [Taxonomy::Onet, Taxonomy::Esco];

    /// Tag stored in the vector index metadata and used in prompts.
    pub fn as_str(self) -> &'static str {
        match self {
            Taxonomy::Onet => "O*NET",
            Taxonomy::Esco => "ESCO",
        }
    }
}

impl std::fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCategory {
    Hard,
    Soft,
}

/// A classified skill. Built only by the classifier (or its fallback), never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    pub category: SkillCategory,
    /// Usually one of `PROFICIENCY_SCALE`, but not validated.
    pub proficiency: String,
}

impl SkillRecord {
    pub fn is_conventional_proficiency(&self) -> bool {
        PROFICIENCY_SCALE.contains(&self.proficiency.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomySkillSet {
    #[serde(rename = "framework")]
    pub taxonomy: Taxonomy,
    pub hard_skills: Vec<SkillRecord>,
    pub soft_skills: Vec<SkillRecord>,
}

/// Full response of one recommendation request. Returned whole, never partially.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub role: String,
    pub domain: String,
    pub industry: String,
    pub region: String,
    pub job_description: String,
    /// One entry per taxonomy, in `Taxonomy::ALL` order.
    pub skills: Vec<TaxonomySkillSet>,
}
