//! Answer generation from ranked passages

use std::sync::Arc;

use docqa_core::error::Result;
use docqa_llm::Generator;

use crate::prompt::build_prompt;

/// Returned when the generator produces no usable text
pub const FALLBACK_ANSWER: &str =
    "The provided information is not sufficient to generate an answer.";

/// Builds the prompt and forwards it to the generation provider
#[derive(Clone)]
pub struct AnswerGenerator {
    generator: Arc<dyn Generator>,
}

impl AnswerGenerator {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Generate an answer for `question` grounded on `passages`
    pub async fn answer(&self, question: &str, passages: &[&str]) -> Result<String> {
        let prompt = build_prompt(question, passages);

        tracing::debug!(
            model = self.generator.model_name(),
            passages = passages.len(),
            prompt_chars = prompt.chars().count(),
            "Requesting answer"
        );

        match self.generator.generate(&prompt).await? {
            Some(text) => Ok(text),
            None => {
                tracing::warn!(model = self.generator.model_name(), "Generator returned no text");
                Ok(FALLBACK_ANSWER.to_string())
            }
        }
    }

    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }
}
