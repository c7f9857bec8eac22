use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::dto::{DocumentListResponse, UploadResponse};
use crate::error::ApiError;
use crate::services::{DocumentService, UploadedFile};
use crate::state::AppState;

/// Multipart field carrying the uploaded files
const UPLOAD_FIELD: &str = "documents";

pub async fn upload_documents(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let max_files = state.config.server.max_upload_files;
    let files = extract_files(&mut multipart, max_files).await?;

    if files.is_empty() {
        return Err(ApiError::bad_request("No files uploaded")
            .with_details(format!("Expected one or more '{}' fields in the multipart form", UPLOAD_FIELD)));
    }

    tracing::info!(files = files.len(), "Processing upload request");

    let documents = DocumentService::upload(&state, files).await?;

    Ok(Json(UploadResponse::success(documents)))
}

pub async fn fetch_documents(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DocumentListResponse>, ApiError> {
    let documents = DocumentService::list(&state).await?;
    Ok(Json(DocumentListResponse { documents }))
}

async fn extract_files(
    multipart: &mut Multipart,
    max_files: usize,
) -> Result<Vec<UploadedFile>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::bad_request("Failed to parse multipart form").with_details(e.to_string())
    })? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        if files.len() == max_files {
            return Err(ApiError::bad_request("Too many files")
                .with_details(format!("At most {} files can be uploaded at once", max_files)));
        }

        let name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|e| {
            ApiError::bad_request("Failed to read file data").with_details(e.to_string())
        })?;

        files.push(UploadedFile { name, content_type, data: data.to_vec() });
    }

    Ok(files)
}
