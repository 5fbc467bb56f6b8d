use axum::extract::Multipart;
use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const NOT_A_PDF_MESSAGE: &str = "File isn't a PDF";

pub const JOB_DESCRIPTION_MIN_CHARS: usize = 50;
pub const JOB_DESCRIPTION_MAX_CHARS: usize = 10_000;

/// The `file` + `job_description` pair both document endpoints accept.
#[derive(Debug)]
pub struct ResumeUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
    pub job_description: String,
}

impl ResumeUpload {
    /// Reads the multipart form. Unknown fields are skipped; a missing
    /// required field is a malformed request (422).
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut file: Option<(Option<String>, Option<String>, Bytes)> = None;
        let mut job_description: Option<String> = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?;
                    file = Some((file_name, content_type, bytes));
                }
                Some("job_description") => job_description = Some(field.text().await?),
                other => debug!("Ignoring multipart field {other:?}"),
            }
        }

        let (file_name, content_type, bytes) = file.ok_or_else(|| missing_field("file"))?;
        let job_description = job_description.ok_or_else(|| missing_field("job_description"))?;

        Ok(Self {
            file_name,
            content_type,
            bytes,
            job_description,
        })
    }

    /// Only the declared media type is checked; the bytes are not sniffed.
    pub fn ensure_pdf(&self) -> Result<(), AppError> {
        if self.content_type.as_deref() != Some(PDF_MEDIA_TYPE) {
            warn!(
                "Rejected upload {:?} with media type {:?}",
                self.file_name, self.content_type
            );
            return Err(AppError::Validation(NOT_A_PDF_MESSAGE.to_string()));
        }
        Ok(())
    }
}

fn missing_field(name: &str) -> AppError {
    AppError::UnprocessableEntity(format!("Field '{name}' is required"))
}

/// Counts characters, not bytes, so non-ASCII descriptions are measured fairly.
pub fn validate_job_description_length(
    job_description: &str,
    min_chars: usize,
    max_chars: usize,
) -> Result<(), AppError> {
    let len = job_description.chars().count();
    if len < min_chars || len > max_chars {
        return Err(AppError::Validation(format!(
            "Job description should be in the range of {min_chars} to {max_chars} letters: {len}"
        )));
    }
    Ok(())
}
