//! The two-pass question answering flow.
//!
//! 1. Ask the model which document is most relevant, from short previews.
//! 2. Ask it to answer from that document's text, with recent history.

use pwatch_core::chatbot::{
    answer_prompt, parse_document_choice, recent_history, relevance_prompt, truncate_chars,
    DocumentPreview, HistoryTurn, ANSWER_MAX_TOKENS, ANSWER_SYSTEM_PROMPT, DOCUMENT_CONFIDENCE,
    HISTORY_PAIRS, PREVIEW_CHARS, RELEVANCE_MAX_TOKENS,
};
use pwatch_core::choices::MessageRole;
use pwatch_llm::{ChatTurn, CompletionClient, CompletionRequest, LlmError};

use super::documents::LoadedDocument;

/// An answer grounded in one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub answer: String,
    pub document_name: String,
    pub document_url: String,
    pub confidence: f64,
}

/// Pick the most relevant document and answer `query` from it.
///
/// `documents` must not be empty. `history` is the session's stored
/// messages, oldest first; only the last few complete exchanges are sent.
pub async fn answer_question(
    llm: &dyn CompletionClient,
    query: &str,
    documents: &[LoadedDocument],
    history: &[HistoryTurn],
) -> Result<Answer, LlmError> {
    let previews: Vec<DocumentPreview<'_>> = documents
        .iter()
        .map(|doc| DocumentPreview {
            name: &doc.name,
            preview: truncate_chars(&doc.text, PREVIEW_CHARS),
        })
        .collect();

    let choice = llm
        .complete(CompletionRequest::single(
            relevance_prompt(query, &previews),
            RELEVANCE_MAX_TOKENS,
        ))
        .await?;
    let index = parse_document_choice(&choice, documents.len());
    let selected = &documents[index];

    tracing::debug!(reply = %choice.trim(), document = %selected.name, "Selected chatbot document");

    let mut messages: Vec<ChatTurn> = recent_history(history, HISTORY_PAIRS)
        .into_iter()
        .map(|turn| match turn.role {
            MessageRole::User => ChatTurn::user(turn.content),
            MessageRole::Assistant => ChatTurn::assistant(turn.content),
        })
        .collect();
    messages.push(ChatTurn::user(answer_prompt(query, &selected.name, &selected.text)));

    let answer = llm
        .complete(CompletionRequest {
            system: Some(ANSWER_SYSTEM_PROMPT.to_string()),
            messages,
            max_tokens: ANSWER_MAX_TOKENS,
        })
        .await?;

    Ok(Answer {
        answer: answer.trim().to_string(),
        document_name: selected.name.clone(),
        document_url: selected.url.clone(),
        confidence: DOCUMENT_CONFIDENCE,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays canned replies and records every request.
    struct Scripted {
        replies: Mutex<VecDeque<String>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl Scripted {
        fn new(replies: &[&str]) -> Self {
            Self {
                replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl CompletionClient for Scripted {
        async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(LlmError::EmptyResponse)
        }
    }

    fn docs() -> Vec<LoadedDocument> {
        vec![
            LoadedDocument {
                name: "Budget Speech".into(),
                url: "http://localhost:8000/media/budget_speech.pdf".into(),
                text: "The budget for 2025 is 72 trillion shillings.".into(),
            },
            LoadedDocument {
                name: "Order Paper".into(),
                url: "http://localhost:8000/media/order_paper.pdf".into(),
                text: "Item 1: prayers. Item 2: the roads bill.".into(),
            },
        ]
    }

    fn turn(role: MessageRole, content: &str) -> HistoryTurn {
        HistoryTurn {
            role,
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn answers_from_the_selected_document() {
        let llm = Scripted::new(&["2", "  The roads bill is item 2.  "]);
        let answer = answer_question(&llm, "What is on the order paper?", &docs(), &[])
            .await
            .unwrap();

        assert_eq!(answer.answer, "The roads bill is item 2.");
        assert_eq!(answer.document_name, "Order Paper");
        assert_eq!(answer.document_url, "http://localhost:8000/media/order_paper.pdf");
        assert_eq!(answer.confidence, DOCUMENT_CONFIDENCE);

        let requests = llm.requests.lock().unwrap();
        assert_eq!(requests[0].max_tokens, RELEVANCE_MAX_TOKENS);
        assert!(requests[0].system.is_none());
        assert_eq!(requests[1].max_tokens, ANSWER_MAX_TOKENS);
        assert_eq!(requests[1].system.as_deref(), Some(ANSWER_SYSTEM_PROMPT));
        assert!(requests[1].messages[0].content.contains("Document Name: Order Paper"));
    }

    #[tokio::test]
    async fn irrelevant_reply_falls_back_to_first_document() {
        let llm = Scripted::new(&["0", "Not covered."]);
        let answer = answer_question(&llm, "Who won the league?", &docs(), &[])
            .await
            .unwrap();
        assert_eq!(answer.document_name, "Budget Speech");
    }

    #[tokio::test]
    async fn history_precedes_the_question() {
        let history = vec![
            turn(MessageRole::User, "hello"),
            turn(MessageRole::Assistant, "Hi there"),
            turn(MessageRole::User, "orphaned"),
        ];
        let llm = Scripted::new(&["1", "72 trillion."]);
        answer_question(&llm, "How big is the budget?", &docs(), &history)
            .await
            .unwrap();

        let requests = llm.requests.lock().unwrap();
        let messages = &requests[1].messages;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], ChatTurn::user("hello"));
        assert_eq!(messages[1], ChatTurn::assistant("Hi there"));
        assert!(messages[2].content.contains("How big is the budget?"));
    }

    #[tokio::test]
    async fn llm_failure_propagates() {
        let llm = Scripted::new(&[]);
        let err = answer_question(&llm, "anything", &docs(), &[]).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }
}
