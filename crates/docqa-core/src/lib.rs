//! DocQA Core - Domain models, configuration, text extraction and chunking
//!
//! This crate contains the core domain logic shared by the storage, LLM,
//! retrieval and API crates.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;
pub mod processing;

pub use error::{DocqaError, ProviderError, Result};
