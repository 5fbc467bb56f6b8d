use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{complete_prompt, strip_json_fences, CompletionClient};
use crate::resume_review::models::ResumeReview;
use crate::resume_review::prompts::{build_review_prompt, review_system_prompt, REVIEW_SAMPLING};

/// Asks the model for a structured review. Output that does not parse into
/// `ResumeReview` is an `InvalidFormat` error; it is never retried.
pub async fn review_resume(
    llm: &dyn CompletionClient,
    resume_text: &str,
    job_description: &str,
) -> Result<ResumeReview, AppError> {
    let prompt = build_review_prompt(resume_text, job_description);
    let raw = complete_prompt(llm, &review_system_prompt(), &prompt, REVIEW_SAMPLING).await?;

    let review = parse_review(&raw)?;
    info!(
        "Resume reviewed: skills={} experience={} impact={} formatting={}",
        review.skills_match.score,
        review.experience_relevance.score,
        review.impact_and_achievements.score,
        review.formatting_and_clarity.score
    );
    Ok(review)
}

pub fn parse_review(raw: &str) -> Result<ResumeReview, AppError> {
    let review: ResumeReview = serde_json::from_str(strip_json_fences(raw))
        .map_err(|e| AppError::InvalidFormat(e.to_string()))?;

    if let Some(category) = review.out_of_range_category() {
        return Err(AppError::InvalidFormat(format!(
            "{category} score is above 100"
        )));
    }
    Ok(review)
}
