use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::documents::pdf::extract_pdf_text;
use crate::documents::upload::{
    validate_job_description_length, ResumeUpload, JOB_DESCRIPTION_MAX_CHARS,
};
use crate::envelope::{ok, Envelope};
use crate::errors::AppError;
use crate::resume_review::models::ResumeReview;
use crate::resume_review::reviewer::review_resume;
use crate::state::AppState;

/// POST /resume-review
///
/// Multipart form: `file` (PDF resume) and `job_description`.
/// Returns the four-category score record plus overall feedback.
pub async fn handle_resume_review(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Envelope<ResumeReview>>, AppError> {
    let upload = ResumeUpload::from_multipart(multipart).await?;
    upload.ensure_pdf()?;
    // The review prompt copes with a thin or empty description, so only the ceiling applies.
    validate_job_description_length(&upload.job_description, 0, JOB_DESCRIPTION_MAX_CHARS)?;

    let resume_text = extract_pdf_text(upload.bytes).await?;
    let review = review_resume(state.llm.as_ref(), &resume_text, &upload.job_description).await?;
    Ok(ok(review))
}
