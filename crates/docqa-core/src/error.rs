//! Error types for DocQA

use thiserror::Error;

/// Errors raised by the remote embedding and generation providers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("HUGGING_FACE_TOKEN is not configured")]
    MissingToken,

    #[error("Provider rejected the API token (401). Check HUGGING_FACE_TOKEN")]
    Unauthorized,

    #[error("Too many requests to the provider (429). Try again later")]
    RateLimited,

    #[error("Provider API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Failed to reach provider: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum DocqaError {
    // Document errors
    #[error("Document not found: {id}")]
    DocumentNotFound { id: String },

    #[error("No relevant data found in selected documents.")]
    NoRelevantData,

    #[error("Unsupported media type: {media_type}")]
    UnsupportedMediaType { media_type: String },

    #[error("{format} processing failed: {reason}")]
    Extraction { format: String, reason: String },

    // Provider errors
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // Request errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, DocqaError>;
