//! Optional external text-generation capability.
//!
//! The interpretation engine only sees [`TextGenerator`]; every error here
//! is recovered by falling back to local templates.

use async_trait::async_trait;
use thiserror::Error;

pub mod extract;
pub mod gemini;

pub use gemini::GeminiClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("text generation is not configured")]
    NotConfigured,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("provider returned status {0}")]
    Status(u16),
    #[error("request timed out")]
    Timeout,
    #[error("provider returned no text")]
    EmptyResponse,
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for LlmError {
    // Error text is logged; drop the request URL so query strings stay out of it.
    fn from(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.is_timeout() {
            LlmError::Timeout
        } else if let Some(status) = e.status() {
            LlmError::Status(status.as_u16())
        } else if e.is_decode() {
            LlmError::Malformed(e.to_string())
        } else {
            LlmError::Transport(e.to_string())
        }
    }
}

/// Given a prompt, return generated text or fail. No streaming.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Short provider/model label for logs and health output.
    fn name(&self) -> &str;
}
