use bytes::Bytes;
use tracing::{debug, warn};

use crate::errors::AppError;

/// Extracts the text of every page, in order, on the blocking pool.
pub async fn extract_pdf_text(bytes: Bytes) -> Result<String, AppError> {
    let size = bytes.len();
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await;

    let text = match extracted {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => return Err(unreadable(size, e.to_string())),
        // pdf-extract panics on some malformed files instead of erroring.
        Err(e) if e.is_panic() => return Err(unreadable(size, "malformed document".to_string())),
        Err(e) => {
            return Err(AppError::Internal(anyhow::anyhow!(
                "PDF extraction task failed: {e}"
            )))
        }
    };

    debug!("Extracted {} characters from a {size}-byte PDF", text.len());
    Ok(text)
}

fn unreadable(size: usize, reason: String) -> AppError {
    warn!("Rejected unreadable PDF ({size} bytes): {reason}");
    AppError::Validation(format!("Unable to read PDF: {reason}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_garbage_bytes_are_a_validation_error() {
        let err = extract_pdf_text(Bytes::from_static(b"definitely not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.starts_with("Unable to read PDF")));
    }

    #[tokio::test]
    async fn test_extracts_text_from_a_real_pdf() {
        let pdf = Bytes::from_static(include_bytes!("../routes/fixtures/resume.pdf"));
        let text = extract_pdf_text(pdf).await.unwrap();
        assert!(text.contains("Jane Doe"));
    }
}
