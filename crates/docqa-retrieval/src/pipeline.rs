use std::sync::Arc;

use docqa_core::error::{DocqaError, Result};
use docqa_llm::Embedder;
use docqa_store::ChunkStore;

use crate::answer::AnswerGenerator;
use crate::models::{QueryPlan, QueryResult};
use crate::ranking::rank_chunks;

/// Question answering over a chosen set of documents
pub struct RetrievalPipeline {
    chunks: Arc<dyn ChunkStore>,
    embedder: Arc<dyn Embedder>,
    answers: AnswerGenerator,
}

impl RetrievalPipeline {
    /// Create a new retrieval pipeline
    pub fn new(
        chunks: Arc<dyn ChunkStore>,
        embedder: Arc<dyn Embedder>,
        answers: AnswerGenerator,
    ) -> Self {
        Self { chunks, embedder, answers }
    }

    /// Execute a query plan
    pub async fn execute(&self, plan: &QueryPlan) -> Result<QueryResult> {
        if plan.question.trim().is_empty() {
            return Err(DocqaError::InvalidRequest("Question is required".to_string()));
        }

        // Phase 1: candidate chunks
        let candidates = self.chunks.chunks_for_documents(&plan.document_ids).await?;
        if candidates.is_empty() {
            return Err(DocqaError::NoRelevantData);
        }

        // Phase 2: similarity ranking
        let query = self.embedder.embed(plan.question.trim()).await?;
        let sources = rank_chunks(&query, &candidates, plan.top_k);

        tracing::info!(
            documents = plan.document_ids.len(),
            candidates = candidates.len(),
            selected = sources.len(),
            top_score = sources.first().map(|s| s.score),
            "Ranked chunks"
        );

        // Phase 3: answer generation
        let passages: Vec<&str> = sources.iter().map(|s| s.excerpt.as_str()).collect();
        let answer = self.answers.answer(&plan.question, &passages).await?;

        Ok(QueryResult {
            answer,
            sources,
            candidates: candidates.len(),
        })
    }
}
