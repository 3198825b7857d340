//! Repositories for chatbot documents, conversations and messages.

use pwatch_core::types::DbId;
use sqlx::PgPool;

use crate::listing::{fetch_page, ListQuery, ListSpec, Page};
use crate::models::chatbot::{
    ChatConversation, ChatMessage, ChatbotDocument, ConversationSummary, CreateChatbotDocument,
    NewChatMessage, UpdateChatbotDocument,
};
use crate::repositories::delete_by_id;

const DOCUMENT_COLUMNS: &str = "id, name, file, description, created_at, updated_at";

const CONVERSATION_COLUMNS: &str = "id, session_id, ip_address, user_agent, created_at, updated_at";

const CONVERSATION_SUMMARY_COLUMNS: &str = "\
    id, session_id, ip_address, user_agent, \
    (SELECT COUNT(*) FROM chat_messages m \
     WHERE m.conversation_id = chat_conversations.id) AS message_count, \
    created_at, updated_at";

const MESSAGE_COLUMNS: &str = "\
    id, conversation_id, role, content, document_name, document_url, \
    created_at, updated_at";

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

pub struct ChatbotDocumentRepo;

impl ChatbotDocumentRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "chatbot_documents",
        columns: DOCUMENT_COLUMNS,
        search_columns: &["name", "description"],
        ordering_fields: &["created_at", "name"],
        default_ordering: &["-created_at"],
        page_size: 20,
    };

    pub async fn list(
        pool: &PgPool,
        query: &ListQuery,
    ) -> Result<Page<ChatbotDocument>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ChatbotDocument>, sqlx::Error> {
        let query = format!("SELECT {DOCUMENT_COLUMNS} FROM chatbot_documents WHERE id = $1");
        sqlx::query_as::<_, ChatbotDocument>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        dto: &CreateChatbotDocument,
    ) -> Result<ChatbotDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO chatbot_documents (name, file, description) \
             VALUES ($1, $2, $3) \
             RETURNING {DOCUMENT_COLUMNS}"
        );
        sqlx::query_as::<_, ChatbotDocument>(&query)
            .bind(&dto.name)
            .bind(&dto.file)
            .bind(&dto.description)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateChatbotDocument,
    ) -> Result<Option<ChatbotDocument>, sqlx::Error> {
        let query = format!(
            "UPDATE chatbot_documents SET \
                 name = COALESCE($2, name), \
                 file = COALESCE($3, file), \
                 description = CASE WHEN $4 THEN $5 ELSE description END \
             WHERE id = $1 \
             RETURNING {DOCUMENT_COLUMNS}"
        );
        sqlx::query_as::<_, ChatbotDocument>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.file)
            .bind(dto.description.is_some())
            .bind(dto.description.as_ref().and_then(|v| v.as_deref()))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        delete_by_id(pool, "chatbot_documents", id).await
    }
}

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

pub struct ConversationRepo;

impl ConversationRepo {
    pub const LIST: ListSpec = ListSpec {
        table: "chat_conversations",
        columns: CONVERSATION_SUMMARY_COLUMNS,
        search_columns: &["session_id", "ip_address"],
        ordering_fields: &["created_at", "updated_at"],
        default_ordering: &["-created_at"],
        page_size: 20,
    };

    pub async fn list(
        pool: &PgPool,
        query: &ListQuery,
    ) -> Result<Page<ConversationSummary>, sqlx::Error> {
        fetch_page(pool, &Self::LIST, query).await
    }

    pub async fn find_by_session(
        pool: &PgPool,
        session_id: &str,
    ) -> Result<Option<ChatConversation>, sqlx::Error> {
        let query =
            format!("SELECT {CONVERSATION_COLUMNS} FROM chat_conversations WHERE session_id = $1");
        sqlx::query_as::<_, ChatConversation>(&query)
            .bind(session_id)
            .fetch_optional(pool)
            .await
    }

    /// Return the conversation for `session_id`, creating it on first use.
    ///
    /// The no-op `DO UPDATE` makes `RETURNING` yield the existing row on
    /// conflict, so concurrent first requests converge on one row.
    pub async fn get_or_create(
        pool: &PgPool,
        session_id: &str,
        ip_address: Option<&str>,
        user_agent: &str,
    ) -> Result<ChatConversation, sqlx::Error> {
        let query = format!(
            "INSERT INTO chat_conversations (session_id, ip_address, user_agent) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_chat_conversations_session_id \
             DO UPDATE SET session_id = EXCLUDED.session_id \
             RETURNING {CONVERSATION_COLUMNS}"
        );
        sqlx::query_as::<_, ChatConversation>(&query)
            .bind(session_id)
            .bind(ip_address)
            .bind(user_agent)
            .fetch_one(pool)
            .await
    }

    /// Messages of a conversation, oldest first.
    pub async fn messages(
        pool: &PgPool,
        conversation_id: DbId,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM chat_messages \
             WHERE conversation_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(conversation_id)
            .fetch_all(pool)
            .await
    }

    /// Append the user turn and the assistant reply in one transaction.
    pub async fn append_exchange(
        pool: &PgPool,
        conversation_id: DbId,
        user: &NewChatMessage<'_>,
        assistant: &NewChatMessage<'_>,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for message in [user, assistant] {
            sqlx::query(
                "INSERT INTO chat_messages \
                     (conversation_id, role, content, document_name, document_url) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(conversation_id)
            .bind(message.role)
            .bind(message.content)
            .bind(message.document_name)
            .bind(message.document_url)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await
    }
}
