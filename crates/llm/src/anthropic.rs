//! Anthropic Messages API client.

use serde::{Deserialize, Serialize};

use crate::client::{ChatTurn, CompletionClient, CompletionRequest, LlmError};

/// Value sent in the `anthropic-version` header.
pub const API_VERSION: &str = "2023-06-01";

/// HTTP client for `POST {api_url}/v1/messages`.
pub struct AnthropicClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct MessagesBody<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: &'a [ChatTurn],
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    /// * `api_url` - Base URL, e.g. `https://api.anthropic.com`.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest) -> MessagesBody<'a> {
        MessagesBody {
            model: &self.model,
            max_tokens: request.max_tokens,
            system: request.system.as_deref(),
            messages: &request.messages,
        }
    }

    // ---- private helpers ----

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Text of the first content block.
fn first_text(response: MessagesResponse) -> Result<String, LlmError> {
    response
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
        .ok_or(LlmError::EmptyResponse)
}

#[async_trait::async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        tracing::debug!(
            model = %self.model,
            max_tokens = request.max_tokens,
            turns = request.messages.len(),
            "Sending completion request",
        );

        let response = self
            .client
            .post(format!("{}/v1/messages", self.api_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&self.body(&request))
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let parsed = response.json::<MessagesResponse>().await?;
        first_text(parsed)
    }
}
