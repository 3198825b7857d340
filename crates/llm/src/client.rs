//! Provider-neutral completion request types and the client trait.

use serde::Serialize;

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A single completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub messages: Vec<ChatTurn>,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// A one-shot request with a single user message and no system prompt.
    pub fn single(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system: None,
            messages: vec![ChatTurn::user(prompt)],
            max_tokens,
        }
    }
}

/// Errors from the completion layer.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("LLM API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The response carried no text content.
    #[error("LLM response contained no text")]
    EmptyResponse,
}

/// Anything that can turn a [`CompletionRequest`] into reply text.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}
