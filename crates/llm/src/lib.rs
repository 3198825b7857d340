//! Client for the hosted language model that answers chatbot questions.
//!
//! [`CompletionClient`] is the seam the API server depends on; the
//! [`AnthropicClient`] implementation talks to the Anthropic Messages API.

pub mod anthropic;
pub mod client;

pub use anthropic::AnthropicClient;
pub use client::{ChatTurn, CompletionClient, CompletionRequest, LlmError, Role};
