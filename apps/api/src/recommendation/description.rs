use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::recommendation::prompts::{
    fill, DESCRIBE_ONLY_PROMPT_TEMPLATE, DESCRIPTION_PROMPT_TEMPLATE,
};

/// Generates a 3-4 sentence description for the whole request. The model text is
/// returned verbatim, whitespace included; only an empty reply is treated as a failure.
pub async fn describe(
    llm: &dyn TextGenerator,
    role: &str,
    industry: &str,
    domain: &str,
) -> Result<String, AppError> {
    let prompt = fill(
        DESCRIPTION_PROMPT_TEMPLATE,
        &[("role", role), ("industry", industry), ("domain", domain)],
    );
    generate_description(llm, &prompt).await
}

/// Generates a description for a role or title given in isolation.
pub async fn describe_role(llm: &dyn TextGenerator, role: &str) -> Result<String, AppError> {
    let prompt = fill(DESCRIBE_ONLY_PROMPT_TEMPLATE, &[("role", role)]);
    generate_description(llm, &prompt).await
}

async fn generate_description(llm: &dyn TextGenerator, prompt: &str) -> Result<String, AppError> {
    let text = llm
        .generate(prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Job description generation failed: {e}")))?;

    if text.is_empty() {
        return Err(AppError::Llm(
            "Job description generation returned empty text".to_string(),
        ));
    }
    Ok(text)
}
