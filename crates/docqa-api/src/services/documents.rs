use docqa_core::error::DocqaError;

use crate::dto::{DocumentSummary, UploadedDocument};
use crate::error::ApiError;
use crate::state::AppState;

/// A file received in the upload form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Service for document upload and listing
pub struct DocumentService;

impl DocumentService {
    /// Process uploaded files one after another.
    ///
    /// Files of an unsupported type are skipped. The first failing file aborts
    /// the request; documents processed before it stay stored.
    pub async fn upload(
        state: &AppState,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<UploadedDocument>, ApiError> {
        let mut uploaded = Vec::with_capacity(files.len());

        for file in files {
            let Some(media_type) =
                state.formats.detect_media_type(file.content_type.as_deref(), &file.name)
            else {
                tracing::info!(
                    name = %file.name,
                    content_type = ?file.content_type,
                    "Skipping unsupported file type"
                );
                continue;
            };

            let extractor = state.formats.extractor_for(media_type).ok_or_else(|| {
                ApiError::processing_failed(DocqaError::UnsupportedMediaType {
                    media_type: media_type.to_string(),
                })
            })?;

            let text = extractor.extract(&file.data).map_err(ApiError::processing_failed)?;

            tracing::debug!(
                name = %file.name,
                format = extractor.format_name(),
                chars = text.chars().count(),
                "Extracted text"
            );

            let outcome = state
                .ingest
                .ingest(&file.name, media_type, file.data.len() as u64, &text)
                .await
                .map_err(ApiError::processing_failed)?;

            uploaded.push(UploadedDocument::from(outcome));
        }

        Ok(uploaded)
    }

    /// List stored documents, oldest first
    pub async fn list(state: &AppState) -> Result<Vec<DocumentSummary>, ApiError> {
        let documents = state.document_store.list_documents().await?;
        Ok(documents.into_iter().map(DocumentSummary::from).collect())
    }
}
