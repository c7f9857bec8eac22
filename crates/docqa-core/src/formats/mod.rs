//! Text extraction for uploaded files
//!
//! Each supported media type has a `TextExtractor`. The `FormatRegistry`
//! resolves the extractor for a file from its declared MIME type, falling
//! back to the file extension.

use crate::error::Result;
use crate::models::MediaType;

pub mod pdf;
pub mod text;

pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;

/// Content type sent by clients that do not know the file's type
const GENERIC_CONTENT_TYPE: &str = "application/octet-stream";

/// Extracts plain text from the raw bytes of an uploaded file
pub trait TextExtractor: Send + Sync {
    /// Extract the full text content
    fn extract(&self, data: &[u8]) -> Result<String>;

    /// Media type handled by this extractor
    fn media_type(&self) -> MediaType;

    /// Human-readable format name (e.g., "PDF")
    fn format_name(&self) -> &str;
}

/// Central registry of text extractors
pub struct FormatRegistry {
    extractors: Vec<Box<dyn TextExtractor>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { extractors: Vec::new() }
    }

    /// Register an extractor
    pub fn register(&mut self, extractor: Box<dyn TextExtractor>) {
        self.extractors.push(extractor);
    }

    /// Resolve the media type of an upload.
    ///
    /// The declared content type wins. Only a missing or empty content type or
    /// `application/octet-stream` falls back to the file extension.
    pub fn detect_media_type(&self, content_type: Option<&str>, filename: &str) -> Option<MediaType> {
        let declared = content_type
            .map(|ct| ct.split(';').next().unwrap_or("").trim())
            .filter(|ct| !ct.is_empty() && !ct.eq_ignore_ascii_case(GENERIC_CONTENT_TYPE));

        let media_type = match declared {
            Some(ct) => MediaType::from_mime(ct),
            None => MediaType::from_filename(filename),
        };

        media_type.filter(|media_type| self.extractor_for(*media_type).is_some())
    }

    /// Find the extractor for a media type
    pub fn extractor_for(&self, media_type: MediaType) -> Option<&dyn TextExtractor> {
        self.extractors
            .iter()
            .find(|e| e.media_type() == media_type)
            .map(|e| e.as_ref())
    }
}

impl Default for FormatRegistry {
    /// Registry with the PDF and plain-text extractors
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PdfExtractor));
        registry.register(Box::new(PlainTextExtractor));
        registry
    }
}
