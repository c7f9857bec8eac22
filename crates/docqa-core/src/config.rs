//! Layered configuration: defaults, then an optional TOML file, then
//! environment variables.

use crate::error::{DocqaError, Result};
use crate::processing::DEFAULT_MAX_WORDS;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Hugging Face Inference API root
pub const DEFAULT_HF_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "DOCQA_CONFIG";

/// API token for the inference providers. Redacted in debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub cors_origin: String,
    /// Maximum number of files accepted by one upload request
    pub max_upload_files: usize,
    /// Maximum request body size for uploads, in bytes
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            cors_origin: "http://localhost:3000".to_string(),
            max_upload_files: 10,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub base_url: String,
    pub model: String,
    /// Expected vector length. When unset, the first vector of each
    /// document fixes the dimension.
    pub dimensions: Option<usize>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HF_BASE_URL.to_string(),
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            dimensions: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_new_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HF_BASE_URL.to_string(),
            model: "meta-llama/Llama-2-7b-chat-hf".to_string(),
            timeout_secs: 30,
            max_new_tokens: 512,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub max_words: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self { max_words: DEFAULT_MAX_WORDS }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub embedding: EmbeddingConfig,
    pub generation: GenerationConfig,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub database_url: Option<String>,

    /// Only read from `HUGGING_FACE_TOKEN`
    #[serde(skip)]
    pub api_token: Option<ApiToken>,
}

impl AppConfig {
    /// Create a configuration with default values
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Load the full stack: defaults, `DOCQA_CONFIG` file if set, environment
    pub fn load() -> Result<Self> {
        let config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::with_defaults().load_from_file(path)?,
            Err(_) => Self::with_defaults(),
        };

        let config = config.load_from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file. Keys missing from the file keep
    /// their defaults.
    pub fn load_from_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| DocqaError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let mut config: AppConfig =
            toml::from_str(&content).map_err(|e| DocqaError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        config.api_token = self.api_token;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Some(port) = env_parse("PORT") {
            self.server.port = port;
        }

        if let Ok(origin) = env::var("DOCQA_CORS_ORIGIN") {
            self.server.cors_origin = origin;
        }

        if let Ok(url) = env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                self.database_url = Some(url);
            }
        }

        if let Ok(token) = env::var("HUGGING_FACE_TOKEN") {
            if !token.trim().is_empty() {
                self.api_token = Some(ApiToken::new(token));
            }
        }

        if let Ok(base_url) = env::var("DOCQA_HF_BASE_URL") {
            self.embedding.base_url = base_url.clone();
            self.generation.base_url = base_url;
        }

        if let Ok(model) = env::var("DOCQA_EMBEDDING_MODEL") {
            self.embedding.model = model;
        }

        if let Some(dimensions) = env_parse("DOCQA_EMBEDDING_DIM") {
            self.embedding.dimensions = Some(dimensions);
        }

        if let Ok(model) = env::var("DOCQA_GENERATION_MODEL") {
            self.generation.model = model;
        }

        if let Some(max_words) = env_parse("DOCQA_CHUNK_MAX_WORDS") {
            self.chunking.max_words = max_words;
        }

        if let Some(top_k) = env_parse("DOCQA_TOP_K") {
            self.retrieval.top_k = top_k;
        }

        self
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("chunking.max_words", self.chunking.max_words),
            ("retrieval.top_k", self.retrieval.top_k),
            ("server.max_upload_files", self.server.max_upload_files),
            ("generation.timeout_secs", self.generation.timeout_secs as usize),
        ];

        for (key, value) in checks {
            if value == 0 {
                return Err(DocqaError::ConfigInvalid {
                    key: key.to_string(),
                    reason: "must be greater than 0".to_string(),
                });
            }
        }

        if self.embedding.dimensions == Some(0) {
            return Err(DocqaError::ConfigInvalid {
                key: "embedding.dimensions".to_string(),
                reason: "must be greater than 0 when set".to_string(),
            });
        }

        Ok(())
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.server.port)
    }

    /// Check if PostgreSQL storage is configured
    pub fn uses_postgres(&self) -> bool {
        self.database_url.is_some()
    }
}

/// Parse an environment variable, warning and ignoring it when malformed
fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {} value '{}', keeping previous setting", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AppConfig::with_defaults();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.max_upload_files, 10);
        assert_eq!(config.chunking.max_words, 200);
        assert_eq!(config.retrieval.top_k, 5);
        assert_eq!(config.generation.timeout_secs, 30);
        assert_eq!(config.embedding.model, "sentence-transformers/all-MiniLM-L6-v2");
        assert!(config.api_token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[chunking]
max_words = 120

[generation]
model = "mistralai/Mistral-7B-Instruct-v0.2"
"#
        )
        .unwrap();

        let config = AppConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.chunking.max_words, 120);
        assert_eq!(config.generation.model, "mistralai/Mistral-7B-Instruct-v0.2");
        // Untouched keys keep their defaults
        assert_eq!(config.generation.timeout_secs, 30);
        assert_eq!(config.retrieval.top_k, 5);
    }

    #[test]
    fn test_load_from_file_keeps_token() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "database_url = \"postgres://localhost/docqa\"").unwrap();

        let mut config = AppConfig::with_defaults();
        config.api_token = Some(ApiToken::new("hf_secret"));

        let config = config.load_from_file(file.path()).unwrap();
        assert_eq!(config.api_token.as_ref().map(ApiToken::expose), Some("hf_secret"));
        assert!(config.uses_postgres());
    }

    #[test]
    fn test_load_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[chunking\nmax_words = ").unwrap();

        let result = AppConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(DocqaError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let mut config = AppConfig::with_defaults();
        config.retrieval.top_k = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::with_defaults();
        config.embedding.dimensions = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = ApiToken::new("hf_secret");
        assert_eq!(format!("{:?}", token), "ApiToken(***)");
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::with_defaults();
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }
}
