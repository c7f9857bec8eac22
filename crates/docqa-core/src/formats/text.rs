use std::borrow::Cow;

use crate::error::Result;
use crate::formats::TextExtractor;
use crate::models::MediaType;

/// Plain-text extractor (UTF-8, invalid sequences become U+FFFD)
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, data: &[u8]) -> Result<String> {
        let text = String::from_utf8_lossy(data);
        if let Cow::Owned(_) = text {
            tracing::warn!(bytes = data.len(), "Text file is not valid UTF-8, invalid bytes replaced");
        }

        // Drop a leading byte-order mark
        Ok(text.strip_prefix('\u{feff}').unwrap_or(&text).to_string())
    }

    fn media_type(&self) -> MediaType {
        MediaType::PlainText
    }

    fn format_name(&self) -> &str {
        "Text"
    }
}
