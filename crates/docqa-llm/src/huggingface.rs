use async_trait::async_trait;
use docqa_core::config::{ApiToken, EmbeddingConfig, GenerationConfig};
use docqa_core::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{Embedder, Generator};

/// Hugging Face feature-extraction embedder
pub struct HuggingFaceEmbedder {
    /// Base URL for the Inference API (e.g., "https://api-inference.huggingface.co")
    base_url: String,

    /// Model name to use for embeddings
    model: String,

    token: Option<ApiToken>,

    /// HTTP client
    client: reqwest::Client,
}

impl HuggingFaceEmbedder {
    /// Create a new embedder
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, token: Option<ApiToken>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            token,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &EmbeddingConfig, token: Option<ApiToken>) -> Self {
        Self::new(&config.base_url, &config.model, token)
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/pipeline/feature-extraction/{}",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl Embedder for HuggingFaceEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let token = self.token.as_ref().ok_or(ProviderError::MissingToken)?;

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(token.expose())
            .json(&InferenceRequest { inputs: text, parameters: None })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        parse_embedding(&body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Hugging Face text-generation client
pub struct HuggingFaceGenerator {
    base_url: String,
    model: String,
    token: Option<ApiToken>,
    /// Fixed per-request timeout
    timeout: Duration,
    max_new_tokens: u32,
    client: reqwest::Client,
}

impl HuggingFaceGenerator {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        token: Option<ApiToken>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            token,
            timeout,
            max_new_tokens: 512,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &GenerationConfig, token: Option<ApiToken>) -> Self {
        Self::new(
            &config.base_url,
            &config.model,
            token,
            Duration::from_secs(config.timeout_secs),
        )
        .with_max_new_tokens(config.max_new_tokens)
    }

    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), self.model)
    }
}

#[async_trait]
impl Generator for HuggingFaceGenerator {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, ProviderError> {
        let token = self.token.as_ref().ok_or(ProviderError::MissingToken)?;

        let request = InferenceRequest {
            inputs: prompt,
            parameters: Some(GenerationParameters {
                max_new_tokens: self.max_new_tokens,
                return_full_text: false,
            }),
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.chars().count(), "Requesting generation");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(token.expose())
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        parse_generated_text(&body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Request body shared by the feature-extraction and generation endpoints
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<GenerationParameters>,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

/// Feature-extraction output: a flat vector for sentence-embedding models,
/// or one row per input
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeatureExtractionResponse {
    Flat(Vec<f32>),
    Nested(Vec<Vec<f32>>),
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    List(Vec<GeneratedText>),
    Single(GeneratedText),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

fn parse_embedding(body: &str) -> Result<Vec<f32>, ProviderError> {
    let parsed: FeatureExtractionResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("expected a vector: {}", e)))?;

    let vector = match parsed {
        FeatureExtractionResponse::Flat(vector) => vector,
        FeatureExtractionResponse::Nested(rows) => rows.into_iter().next().unwrap_or_default(),
    };

    if vector.is_empty() {
        return Err(ProviderError::MalformedResponse("empty embedding vector".to_string()));
    }

    Ok(vector)
}

fn parse_generated_text(body: &str) -> Result<Option<String>, ProviderError> {
    let parsed: GenerationResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(format!("expected generated_text: {}", e)))?;

    let first = match parsed {
        GenerationResponse::List(items) => items.into_iter().next(),
        GenerationResponse::Single(item) => Some(item),
    };

    Ok(first
        .and_then(|g| g.generated_text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty()))
}

fn status_error(status: u16, body: &str) -> ProviderError {
    match status {
        401 => ProviderError::Unauthorized,
        429 => ProviderError::RateLimited,
        _ => {
            let message = serde_json::from_str::<ErrorBody>(body)
                .map(|b| b.error)
                .unwrap_or_else(|_| body.trim().to_string());
            ProviderError::Api { status, message }
        }
    }
}

fn transport_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Transport(format!("request timed out: {}", err))
    } else {
        ProviderError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedder_creation() {
        let embedder = HuggingFaceEmbedder::new("http://custom:8080/", "test-model", None);
        assert_eq!(embedder.model_name(), "test-model");
        assert_eq!(embedder.endpoint(), "http://custom:8080/pipeline/feature-extraction/test-model");
    }

    #[test]
    fn test_generator_from_config() {
        let config = GenerationConfig::default();
        let generator = HuggingFaceGenerator::from_config(&config, None);
        assert_eq!(generator.model_name(), "meta-llama/Llama-2-7b-chat-hf");
        assert_eq!(generator.timeout, Duration::from_secs(30));
        assert_eq!(
            generator.endpoint(),
            "https://api-inference.huggingface.co/models/meta-llama/Llama-2-7b-chat-hf"
        );
    }

    #[test]
    fn test_parse_flat_embedding() {
        assert_eq!(parse_embedding("[0.5, -0.25, 1.0]").unwrap(), vec![0.5, -0.25, 1.0]);
    }

    #[test]
    fn test_parse_nested_embedding() {
        assert_eq!(parse_embedding("[[0.1, 0.2], [0.3, 0.4]]").unwrap(), vec![0.1, 0.2]);
    }

    #[test]
    fn test_parse_empty_embedding_is_malformed() {
        assert!(matches!(parse_embedding("[]"), Err(ProviderError::MalformedResponse(_))));
        assert!(matches!(parse_embedding("[[]]"), Err(ProviderError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_non_vector_is_malformed() {
        let result = parse_embedding(r#"{"error": "Model is loading"}"#);
        assert!(matches!(result, Err(ProviderError::MalformedResponse(_))));
        assert!(matches!(parse_embedding("0.3"), Err(ProviderError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_generated_text() {
        let text = parse_generated_text(r#"[{"generated_text": "  Paris.  "}]"#).unwrap();
        assert_eq!(text.as_deref(), Some("Paris."));

        let text = parse_generated_text(r#"{"generated_text": "Rome"}"#).unwrap();
        assert_eq!(text.as_deref(), Some("Rome"));
    }

    #[test]
    fn test_parse_missing_generated_text() {
        assert_eq!(parse_generated_text("[]").unwrap(), None);
        assert_eq!(parse_generated_text(r#"[{"generated_text": "   "}]"#).unwrap(), None);
        assert_eq!(parse_generated_text(r#"[{"score": 0.9}]"#).unwrap(), None);
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(status_error(401, ""), ProviderError::Unauthorized));
        assert!(matches!(status_error(429, ""), ProviderError::RateLimited));

        match status_error(503, r#"{"error": "Model is currently loading"}"#) {
            ProviderError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Model is currently loading");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }

        match status_error(500, "upstream exploded") {
            ProviderError::Api { message, .. } => assert_eq!(message, "upstream exploded"),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_request() {
        let embedder = HuggingFaceEmbedder::new("http://127.0.0.1:9", "m", None);
        assert!(matches!(embedder.embed("hello").await, Err(ProviderError::MissingToken)));

        let generator =
            HuggingFaceGenerator::new("http://127.0.0.1:9", "m", None, Duration::from_secs(1));
        assert!(matches!(generator.generate("hello").await, Err(ProviderError::MissingToken)));
    }
}
