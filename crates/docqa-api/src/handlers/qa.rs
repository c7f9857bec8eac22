use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::dto::{AskRequest, AskResponse};
use crate::error::ApiError;
use crate::services::QaService;
use crate::state::AppState;

pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    request: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = request.map_err(|e| {
        ApiError::bad_request("Invalid request body").with_details(e.body_text())
    })?;

    tracing::info!(
        documents = request.document_ids.as_ref().map_or(0, Vec::len),
        question_chars = request.question.chars().count(),
        "Processing question"
    );

    let result = QaService::ask(&state, &request).await?;

    Ok(Json(AskResponse {
        success: true,
        relevant_chunks_count: result.relevant_chunks_count(),
        answer: result.answer,
    }))
}
