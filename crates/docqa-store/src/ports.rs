use async_trait::async_trait;
use docqa_core::error::Result;
use docqa_core::models::{Chunk, ChunkId, Document, DocumentId};

/// Port for document metadata storage
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new document
    async fn store_document(&self, document: &Document) -> Result<()>;

    /// Retrieve a document by ID
    async fn get_document(&self, id: DocumentId) -> Result<Option<Document>>;

    /// List all documents, oldest first
    async fn list_documents(&self) -> Result<Vec<Document>>;

    /// Record the ordered chunk references owned by a document
    async fn set_chunk_refs(&self, id: DocumentId, chunks: &[ChunkId]) -> Result<()>;

    /// Delete a document. Returns whether it existed.
    async fn delete_document(&self, id: DocumentId) -> Result<bool>;
}

/// Port for chunk and embedding storage
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Store a single chunk with its embedding
    async fn store_chunk(&self, chunk: &Chunk) -> Result<()>;

    /// Retrieve all chunks owned by any of the given documents, in stored order
    async fn chunks_for_documents(&self, document_ids: &[DocumentId]) -> Result<Vec<Chunk>>;

    /// Delete all chunks owned by a document. Returns the number removed.
    async fn delete_chunks_for_document(&self, document_id: DocumentId) -> Result<usize>;
}
