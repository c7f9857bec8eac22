use chrono::{DateTime, Utc};
use docqa_core::models::Document;
use docqa_retrieval::IngestOutcome;
use serde::Serialize;

/// One successfully processed upload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
    pub document_id: String,
    pub name: String,
    pub text_length: usize,
    pub chunks_count: usize,
}

impl From<IngestOutcome> for UploadedDocument {
    fn from(outcome: IngestOutcome) -> Self {
        Self {
            document_id: outcome.document_id.to_string(),
            name: outcome.name,
            text_length: outcome.text_length,
            chunks_count: outcome.chunks_count,
        }
    }
}

/// Upload operation response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub documents: Vec<UploadedDocument>,
}

impl UploadResponse {
    pub fn success(documents: Vec<UploadedDocument>) -> Self {
        Self {
            message: "Documents processed successfully".to_string(),
            documents,
        }
    }
}

/// Stored document metadata
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub document_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub media_type: &'static str,
    pub size: u64,
    pub chunks_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<Document> for DocumentSummary {
    fn from(document: Document) -> Self {
        Self {
            document_id: document.id.to_string(),
            name: document.name,
            media_type: document.media_type.as_mime(),
            size: document.size,
            chunks_count: document.chunks.len(),
            created_at: document.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
}

/// Question answering response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub success: bool,
    pub answer: String,
    pub relevant_chunks_count: usize,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "docqa-api" }
    }
}
