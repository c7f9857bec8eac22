//! Document ingestion: chunk, embed and store one document

use std::sync::Arc;

use docqa_core::error::{DocqaError, Result};
use docqa_core::models::{Chunk, ChunkId, Document, DocumentId, MediaType};
use docqa_core::processing::SentenceChunker;
use docqa_llm::Embedder;
use docqa_store::{ChunkStore, DocumentStore};

use crate::models::IngestOutcome;

/// Turns extracted document text into stored, embedded chunks.
///
/// A failure after the document record is created removes the document and
/// every chunk stored for it before the error is returned.
pub struct IngestPipeline {
    documents: Arc<dyn DocumentStore>,
    chunks: Arc<dyn ChunkStore>,
    embedder: Arc<dyn Embedder>,
    chunker: SentenceChunker,
    dimensions: Option<usize>,
}

impl IngestPipeline {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        chunks: Arc<dyn ChunkStore>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        Self {
            documents,
            chunks,
            embedder,
            chunker: SentenceChunker::default(),
            dimensions: None,
        }
    }

    pub fn with_chunker(mut self, chunker: SentenceChunker) -> Self {
        self.chunker = chunker;
        self
    }

    /// Require every embedding to have exactly this many dimensions
    pub fn with_dimensions(mut self, dimensions: Option<usize>) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Ingest one document whose text has already been extracted
    pub async fn ingest(
        &self,
        name: &str,
        media_type: MediaType,
        size: u64,
        text: &str,
    ) -> Result<IngestOutcome> {
        let document = Document::new(name, media_type, size);
        self.documents.store_document(&document).await?;

        tracing::info!(document_id = %document.id, name, %media_type, size, "Document created");

        match self.store_chunks(document.id, text).await {
            Ok(chunks_count) => {
                let outcome = IngestOutcome {
                    document_id: document.id,
                    name: document.name,
                    text_length: text.chars().count(),
                    chunks_count,
                };
                tracing::info!(
                    document_id = %outcome.document_id,
                    chunks = outcome.chunks_count,
                    text_length = outcome.text_length,
                    "Document ingested"
                );
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(document_id = %document.id, error = %e, "Ingest failed, rolling back");
                self.rollback(document.id).await;
                Err(e)
            }
        }
    }

    async fn store_chunks(&self, document_id: DocumentId, text: &str) -> Result<usize> {
        let mut expected = self.dimensions;
        let mut chunk_ids: Vec<ChunkId> = Vec::new();

        for (index, piece) in self.chunker.chunks(text).enumerate() {
            tracing::debug!(%document_id, index, "Embedding chunk");
            let embedding = self.embedder.embed(&piece).await?;

            match expected {
                Some(dimensions) if embedding.len() != dimensions => {
                    return Err(DocqaError::DimensionMismatch {
                        expected: dimensions,
                        actual: embedding.len(),
                    });
                }
                Some(_) => {}
                None => expected = Some(embedding.len()),
            }

            let chunk = Chunk::new(document_id, index, piece, embedding);
            self.chunks.store_chunk(&chunk).await?;
            chunk_ids.push(chunk.id);
        }

        self.documents.set_chunk_refs(document_id, &chunk_ids).await?;
        Ok(chunk_ids.len())
    }

    async fn rollback(&self, document_id: DocumentId) {
        match self.chunks.delete_chunks_for_document(document_id).await {
            Ok(removed) => tracing::debug!(%document_id, removed, "Removed partial chunks"),
            Err(e) => tracing::warn!(%document_id, error = %e, "Failed to remove partial chunks"),
        }
        if let Err(e) = self.documents.delete_document(document_id).await {
            tracing::warn!(%document_id, error = %e, "Failed to remove partial document");
        }
    }
}
