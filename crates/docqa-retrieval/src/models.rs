use docqa_core::models::{ChunkId, DocumentId};
use serde::{Deserialize, Serialize};

use crate::ranking::DEFAULT_TOP_K;

/// Summary of a successfully ingested document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestOutcome {
    pub document_id: DocumentId,

    /// Original file name
    pub name: String,

    /// Length of the extracted text in characters
    pub text_length: usize,

    /// Number of chunks stored for the document
    pub chunks_count: usize,
}

/// A question scoped to a set of documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryPlan {
    /// The natural-language question
    pub question: String,

    /// Documents whose chunks are searched
    pub document_ids: Vec<DocumentId>,

    /// Number of top passages forwarded to the generator
    pub top_k: usize,
}

impl QueryPlan {
    /// Create a new query plan
    pub fn new(question: impl Into<String>, document_ids: Vec<DocumentId>) -> Self {
        Self {
            question: question.into(),
            document_ids,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set the number of top results
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k;
        self
    }
}

/// Answer with the passages it was grounded on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    /// The generated answer, or the fallback message
    pub answer: String,

    /// Ranked passages used to build the prompt, best first
    pub sources: Vec<SourceReference>,

    /// Total chunks considered before ranking
    pub candidates: usize,
}

impl QueryResult {
    /// Number of passages forwarded to the generator
    pub fn relevant_chunks_count(&self) -> usize {
        self.sources.len()
    }
}

/// A ranked passage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReference {
    pub chunk_id: ChunkId,

    /// Owning document
    pub document_id: DocumentId,

    /// Position of the chunk within its document
    pub index: usize,

    /// Text excerpt
    pub excerpt: String,

    /// Cosine similarity to the question
    pub score: f32,
}
