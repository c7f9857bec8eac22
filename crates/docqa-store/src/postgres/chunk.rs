//! ChunkStore implementation for PostgreSQL

use async_trait::async_trait;
use docqa_core::error::{DocqaError, Result};
use docqa_core::models::{Chunk, ChunkId, DocumentId};
use sqlx::Row;
use uuid::Uuid;

use super::PostgresStore;
use crate::ports::ChunkStore;

#[async_trait]
impl ChunkStore for PostgresStore {
    async fn store_chunk(&self, chunk: &Chunk) -> Result<()> {
        let index = i32::try_from(chunk.index).map_err(|_| {
            DocqaError::Storage(format!("Chunk index {} out of range", chunk.index))
        })?;

        sqlx::query(
            r#"
            INSERT INTO chunks (id, document_id, chunk_index, text, embedding)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET chunk_index = EXCLUDED.chunk_index,
                text = EXCLUDED.text,
                embedding = EXCLUDED.embedding
            "#,
        )
        .bind(chunk.id.0)
        .bind(chunk.document_id.0)
        .bind(index)
        .bind(&chunk.text)
        .bind(&chunk.embedding)
        .execute(self.pool())
        .await
        .map_err(|e| DocqaError::Storage(format!("Failed to store chunk: {}", e)))?;

        Ok(())
    }

    async fn chunks_for_documents(&self, document_ids: &[DocumentId]) -> Result<Vec<Chunk>> {
        if document_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = document_ids.iter().map(|d| d.0).collect();

        let rows = sqlx::query(
            r#"
            SELECT c.id, c.document_id, c.chunk_index, c.text, c.embedding
            FROM chunks c
            JOIN documents d ON d.id = c.document_id
            WHERE c.document_id = ANY($1)
            ORDER BY d.created_at, d.id, c.chunk_index
            "#,
        )
        .bind(&ids)
        .fetch_all(self.pool())
        .await
        .map_err(|e| DocqaError::Storage(format!("Failed to load chunks: {}", e)))?;

        let chunks = rows
            .iter()
            .map(|row| {
                let index: i32 = row.get("chunk_index");
                Chunk {
                    id: ChunkId(row.get("id")),
                    document_id: DocumentId(row.get("document_id")),
                    index: index.max(0) as usize,
                    text: row.get("text"),
                    embedding: row.get("embedding"),
                }
            })
            .collect();

        Ok(chunks)
    }

    async fn delete_chunks_for_document(&self, document_id: DocumentId) -> Result<usize> {
        let result = sqlx::query("DELETE FROM chunks WHERE document_id = $1")
            .bind(document_id.0)
            .execute(self.pool())
            .await
            .map_err(|e| DocqaError::Storage(format!("Failed to delete chunks: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }
}
