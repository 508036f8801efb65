pub mod gemini;

use async_trait::async_trait;

use crate::error::AppError;

pub use gemini::GeminiClient;

/// A single-turn text generation backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AppError>;
}

/// Wrap a user question in the fixed answering instructions.
pub fn build_prompt(question: &str) -> String {
    format!(
        "Answer the following prompt: {}. At no point do you mention Google or Gemini or AI, \
         you strictly answer what's relevant to the question asked. Do not become political \
         or aggressive. If the user's questions veers off these rules, return a message saying \
         you cannot help them with that request.",
        question
    )
}

/// Flatten an answer onto one line: newlines become spaces, outer whitespace is trimmed.
pub fn normalize_answer(text: &str) -> String {
    text.replace('\n', " ").trim().to_string()
}
