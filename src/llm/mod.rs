//! Model boundary: a text-in, text-out completion interface.
//!
//! The agent only ever sends a rendered system prompt plus one user message and
//! expects raw text back; parsing that text is the schema module's job.

mod anthropic;

use async_trait::async_trait;
use thiserror::Error;

pub use anthropic::AnthropicClient;

/// A rendered prompt: one system message and one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response carried no text content blocks at all.
    #[error("model returned no text content")]
    EmptyResponse,
}

/// Text completion client.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send the prompt and return the model's raw text output.
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;
}
