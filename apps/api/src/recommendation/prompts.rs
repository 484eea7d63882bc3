// All LLM prompt templates for the recommendation pipeline.
// Placeholders in `{braces}` are filled with `fill` before sending.

/// Job description for a full recommendation request.
pub const DESCRIPTION_PROMPT_TEMPLATE: &str = "Provide a detailed and professional job description \
for a {role} position in the {industry} industry, specifically for the {domain} region/market. \
Include key responsibilities, typical work environment, and what makes this role important in \
the {industry} sector. Keep it concise (3-4 sentences).";

/// Job description for a bare role or title, with no request context.
pub const DESCRIBE_ONLY_PROMPT_TEMPLATE: &str = "Provide a detailed job description for a {role}.";

/// Supplementary candidate names when retrieval is sparse.
pub const CANDIDATE_PROMPT_TEMPLATE: &str = "List 8-10 candidate skills for a {role} role in \
{industry} industry using {taxonomy}. Focus on core hard and soft skills. \
Output comma-separated names only.";

/// Combined hard/soft categorization and per-skill proficiency assignment.
pub const CLASSIFY_PROMPT_TEMPLATE: &str = r#"For a {role} role in {industry} industry, take these {taxonomy} candidate skills: {candidates}. Categorize into hard (technical) and soft (interpersonal) skills. Assign realistic proficiency levels (Beginner, Intermediate, Advanced, Expert) per skill based on typical role requirements in the industry. Consider the specific demands of {industry} industry for this {role} position. Limit to 8-10 hard and 2-4 soft. Output ONLY valid JSON: {"hard_skills": [{"name": "Skill Name", "proficiency": "Level"}, ...], "soft_skills": [{"name": "Skill Name", "proficiency": "Level"}, ...]}"#;

/// Retrieval query text for one taxonomy.
pub const RETRIEVAL_QUERY_TEMPLATE: &str =
    "Skills for {normalized} {role} role in {industry} industry in {taxonomy}";

/// Substitutes `{key}` placeholders in one left-to-right pass. Inserted values are
/// never rescanned, and braces that match no key (the JSON example) are kept.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let matched = values.iter().find_map(|(key, value)| {
            tail.strip_prefix('{')
                .and_then(|t| t.strip_prefix(*key))
                .and_then(|t| t.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match matched {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
