//! Handlers for chatbot reference documents, questions and transcripts.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pwatch_core::chatbot::{
    classify_intent, HistoryTurn, Intent, APPRECIATION_REPLY, CANNED_CONFIDENCE, GREETING_REPLY,
};
use pwatch_core::choices::{Choice, MessageRole};
use pwatch_core::error::CoreError;
use pwatch_core::types::DbId;
use pwatch_db::models::chatbot::{
    ChatbotDocumentView, ConversationDetail, CreateChatbotDocument, NewChatMessage,
    UpdateChatbotDocument,
};
use pwatch_db::repositories::{ChatbotDocumentRepo, ConversationRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::chatbot::{answer_question, load_documents, Answer};
use crate::error::{AppError, AppResult};
use crate::middleware::client::ClientMeta;
use crate::middleware::rbac::RequireAdmin;
use crate::query::ListParams;
use crate::response::{DataResponse, PaginatedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// GET /api/v1/chatbot/documents
pub async fn list_documents(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let page = ChatbotDocumentRepo::list(&state.pool, &params.into_query())
        .await?
        .map(ChatbotDocumentView::from);
    Ok(Json(PaginatedResponse::with_media(page, &state.media)))
}

/// GET /api/v1/chatbot/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let document = ChatbotDocumentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ChatbotDocument", id)))?;
    Ok(Json(DataResponse::with_media(
        ChatbotDocumentView::from(document),
        &state.media,
    )))
}

/// POST /api/v1/chatbot/documents
pub async fn create_document(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateChatbotDocument>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let document = ChatbotDocumentRepo::create(&state.pool, &input).await?;
    tracing::info!(id = document.id, user_id = admin.user_id, "Chatbot document created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_media(
            ChatbotDocumentView::from(document),
            &state.media,
        )),
    ))
}

/// PUT /api/v1/chatbot/documents/{id}
pub async fn update_document(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateChatbotDocument>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let document = ChatbotDocumentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("ChatbotDocument", id)))?;
    Ok(Json(DataResponse::with_media(
        ChatbotDocumentView::from(document),
        &state.media,
    )))
}

/// DELETE /api/v1/chatbot/documents/{id}
pub async fn delete_document(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ChatbotDocumentRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("ChatbotDocument", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct ChatbotQuery {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub query: String,
    pub session_id: Option<String>,
}

/// Flat response of the query endpoint.
#[derive(Debug, Serialize)]
pub struct ChatbotReply {
    pub answer: String,
    pub document_name: String,
    pub document_url: String,
    pub confidence: f64,
    pub session_id: String,
}

/// POST /api/v1/chatbot/query (public)
///
/// Greetings and thanks get a canned reply without touching the model.
/// Questions are answered from the most relevant PDF under the media root.
pub async fn query(
    ClientMeta(client): ClientMeta,
    State(state): State<AppState>,
    Json(input): Json<ChatbotQuery>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let question = input.query.trim();
    if question.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "query: This field may not be blank.".into(),
        )));
    }

    let session_id = input
        .session_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let intent = classify_intent(question);

    // Resolved before the conversation row is created.
    let model = match intent {
        Intent::Question => {
            let llm = state
                .llm
                .clone()
                .ok_or_else(|| AppError::Chatbot("Claude API key is not configured".into()))?;
            let documents = load_documents(&state.config.media.root, &state.media).await?;
            Some((llm, documents))
        }
        Intent::Greeting | Intent::Appreciation => None,
    };

    let conversation = ConversationRepo::get_or_create(
        &state.pool,
        &session_id,
        client.ip_address.as_deref(),
        &client.user_agent,
    )
    .await
    .map_err(processing_error)?;

    let answer = match model {
        None if intent == Intent::Greeting => canned(GREETING_REPLY),
        None => canned(APPRECIATION_REPLY),
        Some((llm, documents)) => {
            let history: Vec<HistoryTurn> = ConversationRepo::messages(&state.pool, conversation.id)
                .await
                .map_err(processing_error)?
                .into_iter()
                .filter_map(|m| {
                    MessageRole::parse(&m.role).map(|role| HistoryTurn {
                        role,
                        content: m.content,
                    })
                })
                .collect();

            answer_question(llm.as_ref(), question, &documents, &history)
                .await
                .map_err(processing_error)?
        }
    };

    ConversationRepo::append_exchange(
        &state.pool,
        conversation.id,
        &NewChatMessage {
            role: MessageRole::User.value(),
            content: question,
            document_name: "",
            document_url: "",
        },
        &NewChatMessage {
            role: MessageRole::Assistant.value(),
            content: &answer.answer,
            document_name: &answer.document_name,
            document_url: &answer.document_url,
        },
    )
    .await
    .map_err(processing_error)?;

    tracing::info!(
        conversation_id = conversation.id,
        document = %answer.document_name,
        "Chatbot query answered",
    );

    Ok(Json(ChatbotReply {
        answer: answer.answer,
        document_name: answer.document_name,
        document_url: answer.document_url,
        confidence: answer.confidence,
        session_id,
    }))
}

/// Failures inside the query pipeline surface as `CHATBOT_ERROR`.
fn processing_error(err: impl std::fmt::Display) -> AppError {
    AppError::Chatbot(err.to_string())
}

fn canned(reply: &str) -> Answer {
    Answer {
        answer: reply.to_string(),
        document_name: String::new(),
        document_url: String::new(),
        confidence: CANNED_CONFIDENCE,
    }
}

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

/// GET /api/v1/chatbot/conversations
pub async fn list_conversations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let page = ConversationRepo::list(&state.pool, &params.into_query()).await?;
    Ok(Json(PaginatedResponse::from(page)))
}

/// GET /api/v1/chatbot/conversations/{session_id}
pub async fn get_conversation(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let conversation = ConversationRepo::find_by_session(&state.pool, &session_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Conversation", &session_id)))?;
    let messages = ConversationRepo::messages(&state.pool, conversation.id).await?;

    Ok(Json(DataResponse {
        data: ConversationDetail {
            conversation,
            messages,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_reply_has_no_document() {
        let answer = canned(GREETING_REPLY);
        assert_eq!(answer.confidence, CANNED_CONFIDENCE);
        assert!(answer.document_name.is_empty());
        assert!(answer.document_url.is_empty());
    }

    #[test]
    fn storage_failures_read_as_processing_errors() {
        let err = processing_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AppError::Chatbot(_)));
        assert!(err.to_string().starts_with("Error processing request: "));
    }

    #[test]
    fn blank_query_fails_validation() {
        let input = ChatbotQuery {
            query: String::new(),
            session_id: None,
        };
        assert!(input.validate().is_err());
    }
}
