use crate::error::{DocqaError, Result};
use crate::formats::TextExtractor;
use crate::models::MediaType;

/// PDF text extractor
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, data: &[u8]) -> Result<String> {
        let text =
            pdf_extract::extract_text_from_mem(data).map_err(|e| DocqaError::Extraction {
                format: self.format_name().to_string(),
                reason: format!("Failed to extract text: {}", e),
            })?;

        // Image-only PDFs parse fine but carry no text to index
        if text.trim().is_empty() {
            return Err(DocqaError::Extraction {
                format: self.format_name().to_string(),
                reason: "No text content extracted from PDF".to_string(),
            });
        }

        tracing::debug!(
            characters = text.chars().count(),
            pages = estimate_page_count(&text),
            "Extracted PDF text"
        );

        Ok(text)
    }

    fn media_type(&self) -> MediaType {
        MediaType::Pdf
    }

    fn format_name(&self) -> &str {
        "PDF"
    }
}

/// Estimate page count from form feeds in the extracted text
fn estimate_page_count(text: &str) -> usize {
    text.chars().filter(|&c| c == '\x0C').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_name() {
        assert_eq!(PdfExtractor.format_name(), "PDF");
        assert_eq!(PdfExtractor.media_type(), MediaType::Pdf);
    }

    #[test]
    fn test_invalid_pdf_is_extraction_error() {
        let result = PdfExtractor.extract(b"definitely not a pdf");

        match result {
            Err(DocqaError::Extraction { format, .. }) => assert_eq!(format, "PDF"),
            other => panic!("Expected extraction error, got {:?}", other),
        }
    }

    #[test]
    fn test_estimate_page_count() {
        assert_eq!(estimate_page_count("Page 1\x0CPage 2\x0CPage 3"), 3);
        assert_eq!(estimate_page_count("single page"), 1);
    }
}
