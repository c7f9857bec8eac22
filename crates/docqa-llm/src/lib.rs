//! DocQA LLM - Embedding and generation ports
//!
//! This crate defines the ports for embedding and text generation,
//! along with the Hugging Face Inference API adapters.

pub mod huggingface;
pub mod ports;

// Re-export main types
pub use huggingface::{HuggingFaceEmbedder, HuggingFaceGenerator};
pub use ports::{Embedder, Generator};
