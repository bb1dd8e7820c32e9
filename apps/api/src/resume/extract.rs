//! Résumé text extraction for uploaded files.

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

pub const PDF_MIME: &str = "application/pdf";
pub const TEXT_MIME: &str = "text/plain";

/// Below this the document is treated as empty or image-only.
const MIN_EXTRACTED_CHARS: usize = 10;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    UnsupportedType(String),

    #[error("Failed to read PDF: {0}")]
    Pdf(String),

    #[error(
        "Resume parsing failed. The file appears to be an image-only PDF or empty, \
         which we cannot process. Please upload a text-based PDF or a plain text file."
    )]
    TooShort,
}

/// Extracts trimmed plain text from an uploaded résumé.
///
/// CPU-bound for PDFs; run it on a blocking thread.
pub fn extract_resume_text(data: &Bytes, mime: &str) -> Result<String, ExtractError> {
    let mime = mime.split(';').next().unwrap_or_default().trim();

    let text = match mime {
        PDF_MIME => {
            pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractError::Pdf(e.to_string()))?
        }
        TEXT_MIME => String::from_utf8_lossy(data).into_owned(),
        other => return Err(ExtractError::UnsupportedType(other.to_string())),
    };

    let text = text.trim().to_string();
    info!("Resume text extracted: {} chars", text.chars().count());

    if text.chars().count() < MIN_EXTRACTED_CHARS {
        return Err(ExtractError::TooShort);
    }
    Ok(text)
}
