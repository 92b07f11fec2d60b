use crate::error::ImportError;
use log::debug;

/// Readers accept the `%PDF-` header anywhere in the first kilobyte.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Decode the text layer of a PDF.
///
/// Fails with [`ImportError::InvalidPdf`] when the bytes are not a PDF or cannot be
/// parsed. A scanned PDF without a text layer decodes successfully to (nearly)
/// empty text; callers decide how much text is enough.
///
/// This is CPU-bound and may take a while on large cookbooks; async callers should
/// run it on a blocking thread.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, ImportError> {
    if pdf_bytes.is_empty() {
        return Err(ImportError::InvalidPdf("file is empty".to_string()));
    }

    let window = &pdf_bytes[..pdf_bytes.len().min(HEADER_SEARCH_WINDOW)];
    if !window.windows(5).any(|w| w == b"%PDF-") {
        return Err(ImportError::InvalidPdf(
            "file does not start with a PDF header".to_string(),
        ));
    }

    let text = pdf_extract::extract_text_from_mem(pdf_bytes)
        .map_err(|e| ImportError::InvalidPdf(e.to_string()))?;
    debug!(
        "Extracted {} chars of text from {} byte PDF",
        text.len(),
        pdf_bytes.len()
    );

    Ok(text)
}
