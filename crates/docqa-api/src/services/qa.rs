use docqa_core::error::DocqaError;
use docqa_core::models::DocumentId;
use docqa_retrieval::{QueryPlan, QueryResult};

use crate::dto::AskRequest;
use crate::error::ApiError;
use crate::state::AppState;

/// Service for answering questions over uploaded documents
pub struct QaService;

impl QaService {
    pub async fn ask(state: &AppState, request: &AskRequest) -> Result<QueryResult, ApiError> {
        let requested = match &request.document_ids {
            Some(ids) if !request.question.trim().is_empty() => ids,
            _ => return Err(ApiError::bad_request("Document IDs and question are required")),
        };

        let document_ids: Vec<DocumentId> =
            requested.iter().filter_map(|id| DocumentId::parse(id)).collect();

        // Ids that are not UUIDs cannot match any stored document
        if document_ids.is_empty() {
            return Err(DocqaError::NoRelevantData.into());
        }

        let plan = QueryPlan::new(request.question.trim(), document_ids)
            .with_top_k(state.config.retrieval.top_k);

        let result = state.retrieval.execute(&plan).await?;

        tracing::info!(
            relevant_chunks = result.relevant_chunks_count(),
            candidates = result.candidates,
            "Question answered"
        );

        Ok(result)
    }
}
