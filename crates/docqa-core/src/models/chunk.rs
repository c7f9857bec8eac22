use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::DocumentId;

/// Unique identifier for a stored chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(pub Uuid);

impl ChunkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChunkId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A bounded span of document text together with its embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,

    /// Owning document
    pub document_id: DocumentId,

    /// Position of the chunk within its document
    pub index: usize,

    /// Raw text span
    pub text: String,

    /// Embedding vector
    pub embedding: Vec<f32>,
}

impl Chunk {
    pub fn new(document_id: DocumentId, index: usize, text: String, embedding: Vec<f32>) -> Self {
        Self {
            id: ChunkId::new(),
            document_id,
            index,
            text,
            embedding,
        }
    }
}
