//! LLM port definitions

use async_trait::async_trait;
use docqa_core::error::ProviderError;

/// Port for embedding text into vector representations
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text
    ///
    /// # Returns
    /// The embedding vector. Its length is fixed for a given model.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;

    /// Get the name/identifier of the embedding model
    fn model_name(&self) -> &str;
}

/// Port for text generation
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for a fully assembled prompt
    ///
    /// # Returns
    /// The generated text, or `None` when the provider answered without any
    async fn generate(&self, prompt: &str) -> Result<Option<String>, ProviderError>;

    /// Get the name/identifier of the generation model
    fn model_name(&self) -> &str;
}
