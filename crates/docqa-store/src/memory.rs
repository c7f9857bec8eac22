//! In-memory storage implementations for development and testing.
//!
//! These implementations use `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state. For persistent storage, use the PostgreSQL backend.

use async_trait::async_trait;
use docqa_core::error::{DocqaError, Result};
use docqa_core::models::{Chunk, ChunkId, Document, DocumentId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::ports::{ChunkStore, DocumentStore};

/// In-memory implementation of DocumentStore
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<RwLock<HashMap<DocumentId, Document>>>,
}

impl MemoryDocumentStore {
    /// Create a new in-memory document store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn store_document(&self, document: &Document) -> Result<()> {
        let mut documents = self.documents.write().unwrap();
        documents.insert(document.id, document.clone());
        Ok(())
    }

    async fn get_document(&self, id: DocumentId) -> Result<Option<Document>> {
        let documents = self.documents.read().unwrap();
        Ok(documents.get(&id).cloned())
    }

    async fn list_documents(&self) -> Result<Vec<Document>> {
        let documents = self.documents.read().unwrap();
        let mut list: Vec<Document> = documents.values().cloned().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(list)
    }

    async fn set_chunk_refs(&self, id: DocumentId, chunks: &[ChunkId]) -> Result<()> {
        let mut documents = self.documents.write().unwrap();
        let document = documents
            .get_mut(&id)
            .ok_or_else(|| DocqaError::DocumentNotFound { id: id.to_string() })?;
        document.chunks = chunks.to_vec();
        Ok(())
    }

    async fn delete_document(&self, id: DocumentId) -> Result<bool> {
        let mut documents = self.documents.write().unwrap();
        Ok(documents.remove(&id).is_some())
    }
}

/// In-memory implementation of ChunkStore
#[derive(Debug, Clone, Default)]
pub struct MemoryChunkStore {
    /// Insertion order is the retrieval order
    chunks: Arc<RwLock<Vec<Chunk>>>,
}

impl MemoryChunkStore {
    /// Create a new in-memory chunk store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored chunks
    pub fn len(&self) -> usize {
        self.chunks.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ChunkStore for MemoryChunkStore {
    async fn store_chunk(&self, chunk: &Chunk) -> Result<()> {
        self.chunks.write().unwrap().push(chunk.clone());
        Ok(())
    }

    async fn chunks_for_documents(&self, document_ids: &[DocumentId]) -> Result<Vec<Chunk>> {
        let wanted: HashSet<DocumentId> = document_ids.iter().copied().collect();
        let chunks = self.chunks.read().unwrap();
        Ok(chunks.iter().filter(|c| wanted.contains(&c.document_id)).cloned().collect())
    }

    async fn delete_chunks_for_document(&self, document_id: DocumentId) -> Result<usize> {
        let mut chunks = self.chunks.write().unwrap();
        let before = chunks.len();
        chunks.retain(|c| c.document_id != document_id);
        Ok(before - chunks.len())
    }
}
