use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::cover_letter::generator::generate_cover_letter;
use crate::documents::pdf::extract_pdf_text;
use crate::documents::upload::{
    validate_job_description_length, ResumeUpload, JOB_DESCRIPTION_MAX_CHARS,
    JOB_DESCRIPTION_MIN_CHARS,
};
use crate::envelope::{ok, Envelope};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /cover-letter-generator
///
/// Multipart form: `file` (PDF resume) and `job_description`.
/// Both checks run before the PDF is parsed or the LLM is called.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Envelope<String>>, AppError> {
    let upload = ResumeUpload::from_multipart(multipart).await?;
    upload.ensure_pdf()?;
    validate_job_description_length(
        &upload.job_description,
        JOB_DESCRIPTION_MIN_CHARS,
        JOB_DESCRIPTION_MAX_CHARS,
    )?;

    let resume_text = extract_pdf_text(upload.bytes).await?;
    let letter =
        generate_cover_letter(state.llm.as_ref(), &resume_text, &upload.job_description).await?;
    Ok(ok(letter))
}
