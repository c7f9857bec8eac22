//! DocumentStore implementation for PostgreSQL

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docqa_core::error::{DocqaError, Result};
use docqa_core::models::{ChunkId, Document, DocumentId, MediaType};
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use super::PostgresStore;
use crate::ports::DocumentStore;

fn document_from_row(row: &PgRow) -> Result<Document> {
    let media_type: String = row.get("media_type");
    let media_type = MediaType::from_mime(&media_type).ok_or_else(|| {
        DocqaError::Storage(format!("Unknown media type in database: {}", media_type))
    })?;

    let size: i64 = row.get("size");
    let chunk_ids: Vec<Uuid> = row.get("chunk_ids");
    let created_at: DateTime<Utc> = row.get("created_at");

    Ok(Document {
        id: DocumentId(row.get("id")),
        name: row.get("name"),
        media_type,
        size: size.max(0) as u64,
        chunks: chunk_ids.into_iter().map(ChunkId).collect(),
        created_at,
    })
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn store_document(&self, document: &Document) -> Result<()> {
        let chunk_ids: Vec<Uuid> = document.chunks.iter().map(|c| c.0).collect();

        sqlx::query(
            r#"
            INSERT INTO documents (id, name, media_type, size, chunk_ids, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(document.id.0)
        .bind(&document.name)
        .bind(document.media_type.as_mime())
        .bind(document.size as i64)
        .bind(&chunk_ids)
        .bind(document.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| DocqaError::Storage(format!("Failed to store document: {}", e)))?;

        Ok(())
    }

    async fn get_document(&self, id: DocumentId) -> Result<Option<Document>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, media_type, size, chunk_ids, created_at
            FROM documents
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| DocqaError::Storage(format!("Failed to get document: {}", e)))?;

        row.as_ref().map(document_from_row).transpose()
    }

    async fn list_documents(&self) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, media_type, size, chunk_ids, created_at
            FROM documents
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| DocqaError::Storage(format!("Failed to list documents: {}", e)))?;

        rows.iter().map(document_from_row).collect()
    }

    async fn set_chunk_refs(&self, id: DocumentId, chunks: &[ChunkId]) -> Result<()> {
        let chunk_ids: Vec<Uuid> = chunks.iter().map(|c| c.0).collect();

        let result = sqlx::query("UPDATE documents SET chunk_ids = $2 WHERE id = $1")
            .bind(id.0)
            .bind(&chunk_ids)
            .execute(self.pool())
            .await
            .map_err(|e| DocqaError::Storage(format!("Failed to update chunk refs: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DocqaError::DocumentNotFound { id: id.to_string() });
        }

        Ok(())
    }

    async fn delete_document(&self, id: DocumentId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id.0)
            .execute(self.pool())
            .await
            .map_err(|e| DocqaError::Storage(format!("Failed to delete document: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
