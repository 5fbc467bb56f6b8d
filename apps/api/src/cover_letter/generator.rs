use tracing::info;

use crate::cover_letter::prompts::{
    build_letter_prompt, COVER_LETTER_SYSTEM, LETTER_CLOSE_TAG, LETTER_OPEN_TAG, LETTER_SAMPLING,
};
use crate::errors::AppError;
use crate::llm_client::{complete_prompt, extract_between, CompletionClient};

/// Generates a cover letter and returns the text inside the letter tags.
/// Untagged output is returned whole.
pub async fn generate_cover_letter(
    llm: &dyn CompletionClient,
    resume_text: &str,
    job_description: &str,
) -> Result<String, AppError> {
    let prompt = build_letter_prompt(resume_text, job_description);
    let raw = complete_prompt(llm, COVER_LETTER_SYSTEM, &prompt, LETTER_SAMPLING).await?;

    let letter = extract_between(&raw, LETTER_OPEN_TAG, LETTER_CLOSE_TAG).trim();
    info!("Generated cover letter ({} characters)", letter.len());
    Ok(letter.to_string())
}
