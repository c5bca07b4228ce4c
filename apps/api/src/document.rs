//! PDF text extraction boundary.
//!
//! Extraction quality is whatever the layout allows; failure or
//! near-empty output maps to the missing-input taxonomy (empty source,
//! pipeline continues), never to a request failure.

use tracing::warn;

/// Extracted text shorter than this is treated as a failed extraction.
const MIN_EXTRACTED_TEXT: usize = 20;

/// Extracts text from an in-memory PDF. Returns None when the document
/// cannot be read or yields no usable text.
pub fn extract_pdf_text(bytes: &[u8]) -> Option<String> {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) if text.trim().len() >= MIN_EXTRACTED_TEXT => Some(text),
        Ok(text) => {
            warn!(
                "pdf extraction produced only {} usable bytes; treating as missing",
                text.trim().len()
            );
            None
        }
        Err(e) => {
            warn!("pdf extraction failed: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_yield_none() {
        assert!(extract_pdf_text(b"definitely not a pdf").is_none());
    }

    #[test]
    fn test_empty_input_yields_none() {
        assert!(extract_pdf_text(&[]).is_none());
    }
}
