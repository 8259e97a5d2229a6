//! Text extraction for uploaded CV files.

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// True when the upload looks like a PDF by content type, extension or magic bytes.
pub fn is_pdf(file_name: &str, content_type: Option<&str>, bytes: &[u8]) -> bool {
    content_type.is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"))
        || file_name.to_ascii_lowercase().ends_with(".pdf")
        || bytes.starts_with(PDF_MAGIC)
}

/// Returns the text body of an uploaded file. PDFs go through `pdf-extract`;
/// everything else is read as UTF-8, replacing invalid sequences.
pub fn extract_text(
    file_name: &str,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<String, AppError> {
    let text = if is_pdf(file_name, content_type, bytes) {
        // pdf-extract panics on some malformed documents.
        std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
            .map_err(|_| {
                AppError::UnprocessableEntity(format!("Could not read PDF '{file_name}'"))
            })?
            .map_err(|e| {
                AppError::UnprocessableEntity(format!("Could not read PDF '{file_name}': {e}"))
            })?
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };

    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(format!(
            "No text could be extracted from '{file_name}'"
        )));
    }
    Ok(text)
}
