use std::sync::Arc;

use docqa_core::config::AppConfig;
use docqa_core::error::Result;
use docqa_core::formats::FormatRegistry;
use docqa_core::processing::SentenceChunker;
use docqa_llm::{Embedder, Generator};
use docqa_retrieval::{AnswerGenerator, IngestPipeline, RetrievalPipeline};
use docqa_store::{ChunkStore, DocumentStore};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub document_store: Arc<dyn DocumentStore>,
    pub formats: FormatRegistry,
    pub ingest: IngestPipeline,
    pub retrieval: RetrievalPipeline,
}

impl AppState {
    /// Wire the pipelines from the configuration and the given adapters
    pub fn new(
        config: AppConfig,
        document_store: Arc<dyn DocumentStore>,
        chunk_store: Arc<dyn ChunkStore>,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> Result<Self> {
        let chunker = SentenceChunker::new(config.chunking.max_words)?;

        let ingest =
            IngestPipeline::new(document_store.clone(), chunk_store.clone(), embedder.clone())
                .with_chunker(chunker)
                .with_dimensions(config.embedding.dimensions);

        let retrieval =
            RetrievalPipeline::new(chunk_store, embedder, AnswerGenerator::new(generator));

        Ok(Self {
            config,
            document_store,
            formats: FormatRegistry::default(),
            ingest,
            retrieval,
        })
    }
}
