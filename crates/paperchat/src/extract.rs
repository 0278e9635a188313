//! Per-page PDF text extraction.
//!
//! Thin wrapper over `pdf-extract`: the rest of the pipeline only ever
//! sees an ordered sequence of page strings. Pages with no extractable
//! content come back as empty strings rather than failing the document;
//! a document that cannot be parsed at all is an error for that file
//! only, and the ingestion pipeline skips it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
}

/// Extract the text of each page, in document order.
pub fn extract_pdf_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pdf_returns_error() {
        let err = extract_pdf_pages(b"not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }
}
