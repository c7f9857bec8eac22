//! DocQA Store - Storage ports and adapters
//!
//! This crate defines the document and chunk storage ports and provides
//! in-memory and PostgreSQL adapters.

pub mod memory;
pub mod ports;
pub mod postgres;

pub use memory::{MemoryChunkStore, MemoryDocumentStore};
pub use ports::{ChunkStore, DocumentStore};
pub use postgres::{PostgresConfig, PostgresStore};
