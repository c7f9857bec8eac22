pub mod chunk;
pub mod document;

pub use chunk::{Chunk, ChunkId};
pub use document::{Document, DocumentId, MediaType};
