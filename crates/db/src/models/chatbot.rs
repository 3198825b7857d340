//! Chatbot reference documents and persisted conversations.

use std::path::Path;

use pwatch_core::media::{MediaFields, MediaUrlBuilder};
use pwatch_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// A row from the `chatbot_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatbotDocument {
    pub id: DbId,
    pub name: String,
    pub file: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ChatbotDocument {
    /// Lower-cased file extension, `pdf` when the name has none.
    pub fn file_type(&self) -> String {
        Path::new(&self.file)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_else(|| "pdf".to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatbotDocumentView {
    #[serde(flatten)]
    pub document: ChatbotDocument,
    pub file_type: String,
    pub file_url: Option<String>,
}

impl From<ChatbotDocument> for ChatbotDocumentView {
    fn from(document: ChatbotDocument) -> Self {
        Self {
            file_type: document.file_type(),
            file_url: None,
            document,
        }
    }
}

impl MediaFields for ChatbotDocumentView {
    fn absolutize(&mut self, media: &MediaUrlBuilder) {
        self.file_url = media.absolute(&self.document.file);
        media.rewrite_required(&mut self.document.file);
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChatbotDocument {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1))]
    pub file: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateChatbotDocument {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub file: Option<String>,
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

/// A row from the `chat_conversations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatConversation {
    pub id: DbId,
    pub session_id: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Conversation list row with its message count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ConversationSummary {
    pub id: DbId,
    pub session_id: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
    pub message_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `chat_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: DbId,
    pub conversation_id: DbId,
    pub role: String,
    pub content: String,
    pub document_name: String,
    pub document_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationDetail {
    #[serde(flatten)]
    pub conversation: ChatConversation,
    pub messages: Vec<ChatMessage>,
}

/// Message to append to a conversation.
#[derive(Debug, Clone)]
pub struct NewChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
    pub document_name: &'a str,
    pub document_url: &'a str,
}
