//! Text heuristics and prompt construction for the document chatbot.
//!
//! The HTTP pipeline (document scan, PDF extraction, model calls,
//! persistence) lives in the api crate; everything here is pure so the
//! prompt shapes and parsing rules are unit tested.

use std::sync::LazyLock;

use regex::Regex;

use crate::choices::MessageRole;

// ---------------------------------------------------------------------------
// Budgets
// ---------------------------------------------------------------------------

/// Characters of each document kept for the relevance pass.
pub const PREVIEW_CHARS: usize = 10_000;

/// Characters of each preview actually shown in the relevance prompt.
pub const SUMMARY_PREVIEW_CHARS: usize = 500;

/// Characters of the selected document sent with the answer prompt.
pub const ANSWER_CONTEXT_CHARS: usize = 50_000;

/// Token cap for the relevance call (a single number is expected).
pub const RELEVANCE_MAX_TOKENS: u32 = 10;

/// Token cap for the answer call.
pub const ANSWER_MAX_TOKENS: u32 = 500;

/// Number of prior (user, assistant) pairs replayed to the model.
pub const HISTORY_PAIRS: usize = 5;

/// Confidence reported for document-grounded answers.
pub const DOCUMENT_CONFIDENCE: f64 = 0.8;

/// Confidence reported for canned greeting/appreciation replies.
pub const CANNED_CONFIDENCE: f64 = 1.0;

pub const GREETING_REPLY: &str = "Hello! I'm the Parliament Watch assistant. Ask me anything about \
bills, Hansards, order papers or reports and I'll look it up in our documents.";

pub const APPRECIATION_REPLY: &str = "You're welcome! Let me know if there is anything else you \
would like to know about Parliament.";

// ---------------------------------------------------------------------------
// Intent classification
// ---------------------------------------------------------------------------

/// What kind of message the user sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Appreciation,
    Question,
}

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "greetings",
    "howdy",
    "good morning",
    "good afternoon",
    "good evening",
];

const APPRECIATIONS: &[&str] = &[
    "thank",
    "thanks",
    "appreciate",
    "helpful",
    "great help",
    "awesome",
    "much obliged",
];

const QUESTION_WORDS: &[&str] = &[
    "what", "when", "where", "who", "whom", "which", "why", "how", "explain", "tell", "list",
    "describe", "summarize", "summarise",
];

const MAX_GREETING_WORDS: usize = 6;
const MAX_APPRECIATION_WORDS: usize = 10;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]+").expect("static regex"));

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("static regex"));

/// Classify a query with keyword heuristics.
///
/// Anything that looks like a question (a `?` or a leading question word
/// anywhere in the text) is a [`Intent::Question`], even when it opens with
/// a greeting.
pub fn classify_intent(query: &str) -> Intent {
    let normalized = normalize(query);
    let words: Vec<&str> = normalized.split_whitespace().collect();

    if query.contains('?') || words.iter().any(|w| QUESTION_WORDS.contains(w)) {
        return Intent::Question;
    }

    let joined = words.join(" ");
    let is_greeting = GREETINGS
        .iter()
        .any(|g| joined == *g || joined.starts_with(&format!("{g} ")));
    if is_greeting && words.len() <= MAX_GREETING_WORDS {
        return Intent::Greeting;
    }

    let is_appreciation = APPRECIATIONS.iter().any(|a| joined.contains(a));
    if is_appreciation && words.len() <= MAX_APPRECIATION_WORDS {
        return Intent::Appreciation;
    }

    Intent::Question
}

fn normalize(text: &str) -> String {
    NON_WORD.replace_all(&text.to_lowercase(), " ").into_owned()
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Derive a display name from a PDF file name.
///
/// Drops the `.pdf` extension, turns `_` and `-` into spaces and title-cases
/// each word.
///
/// # Examples
///
/// ```
/// use pwatch_core::chatbot::document_display_name;
/// assert_eq!(document_display_name("order_paper-2025.PDF"), "Order Paper 2025");
/// ```
pub fn document_display_name(file_name: &str) -> String {
    let stem = match file_name.len().checked_sub(4) {
        Some(cut) if file_name.is_char_boundary(cut) && file_name[cut..].eq_ignore_ascii_case(".pdf") => {
            &file_name[..cut]
        }
        _ => file_name,
    };

    let spaced = stem.replace(['_', '-'], " ");
    title_case(&spaced)
}

/// Upper-case the first letter after any non-letter, lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Return at most `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// A document as offered to the relevance pass.
#[derive(Debug, Clone, Copy)]
pub struct DocumentPreview<'a> {
    pub name: &'a str,
    /// Leading text of the document (already cut to [`PREVIEW_CHARS`]).
    pub preview: &'a str,
}

/// Build the prompt asking the model to pick the most relevant document.
pub fn relevance_prompt(query: &str, documents: &[DocumentPreview<'_>]) -> String {
    let summaries: Vec<String> = documents
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            format!(
                "Document {}: {}\nPreview: {}...",
                i + 1,
                doc.name,
                truncate_chars(doc.preview, SUMMARY_PREVIEW_CHARS)
            )
        })
        .collect();

    format!(
        "You are a document search assistant. Given a user question and a list of documents, \
identify which document is most relevant.\n\n\
User Question: {query}\n\n\
Available Documents:\n{}\n\n\
Respond with ONLY the document number (1, 2, 3, etc.) that is most relevant to the question. \
If no document is relevant, respond with \"0\".",
        summaries.join("\n\n")
    )
}

/// Turn the model's relevance reply into a 0-based document index.
///
/// Takes the first integer in the reply. `0`, out-of-range numbers and
/// replies without a number all select the first document.
pub fn parse_document_choice(reply: &str, document_count: usize) -> usize {
    FIRST_NUMBER
        .find(reply)
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .filter(|n| (1..=document_count).contains(n))
        .map_or(0, |n| n - 1)
}

/// System instructions for the answer pass.
pub const ANSWER_SYSTEM_PROMPT: &str = "You are a helpful assistant answering questions about \
parliamentary proceedings in Uganda based on the provided document. Provide a clear, concise \
answer to the user's question based on the document content. If the answer is not in the \
document, say so clearly. Keep your answer under 300 words.";

/// Build the user turn for the answer pass.
pub fn answer_prompt(query: &str, document_name: &str, document_text: &str) -> String {
    format!(
        "User Question: {query}\n\n\
Document Name: {document_name}\n\n\
Document Content:\n{}",
        truncate_chars(document_text, ANSWER_CONTEXT_CHARS)
    )
}

// ---------------------------------------------------------------------------
// Conversation history
// ---------------------------------------------------------------------------

/// One stored chat message, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTurn {
    pub role: MessageRole,
    pub content: String,
}

/// Keep the last `pairs` (user, assistant) exchanges.
///
/// The returned window always starts with a user message and strictly
/// alternates roles, which is what the completion API accepts. Orphaned
/// turns (e.g. a user message whose reply was never stored) are dropped.
pub fn recent_history(turns: &[HistoryTurn], pairs: usize) -> Vec<HistoryTurn> {
    let mut exchanges: Vec<(&HistoryTurn, &HistoryTurn)> = Vec::new();
    let mut iter = turns.iter().peekable();

    while let Some(turn) = iter.next() {
        if turn.role != MessageRole::User {
            continue;
        }
        if let Some(next) = iter.peek() {
            if next.role == MessageRole::Assistant {
                exchanges.push((turn, next));
                iter.next();
            }
        }
    }

    let skip = exchanges.len().saturating_sub(pairs);
    exchanges
        .into_iter()
        .skip(skip)
        .flat_map(|(user, assistant)| [user.clone(), assistant.clone()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: MessageRole, content: &str) -> HistoryTurn {
        HistoryTurn {
            role,
            content: content.to_string(),
        }
    }

    // -- intent -------------------------------------------------------------

    #[test]
    fn short_greetings_are_greetings() {
        assert_eq!(classify_intent("Hello"), Intent::Greeting);
        assert_eq!(classify_intent("hi there!"), Intent::Greeting);
        assert_eq!(classify_intent("Good morning, team"), Intent::Greeting);
    }

    #[test]
    fn greeting_with_question_is_a_question() {
        assert_eq!(
            classify_intent("Hi, what is the status of the budget bill?"),
            Intent::Question
        );
        assert_eq!(classify_intent("hello tell me about hansard"), Intent::Question);
    }

    #[test]
    fn greeting_prefix_must_be_a_whole_word() {
        assert_eq!(classify_intent("history of parliament"), Intent::Question);
    }

    #[test]
    fn thanks_is_appreciation() {
        assert_eq!(classify_intent("Thanks a lot!"), Intent::Appreciation);
        assert_eq!(classify_intent("that was really helpful"), Intent::Appreciation);
    }

    #[test]
    fn long_messages_are_questions() {
        let text = "thanks but I would also like details on the committee report from last sitting";
        assert_eq!(classify_intent(text), Intent::Question);
    }

    // -- documents ----------------------------------------------------------

    #[test]
    fn display_name_title_cases_words() {
        assert_eq!(
            document_display_name("national_budget-framework.pdf"),
            "National Budget Framework"
        );
        assert_eq!(document_display_name("NOTES.txt"), "Notes.Txt");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("ñandú", 2), "ña");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn relevance_prompt_numbers_documents_from_one() {
        let docs = [
            DocumentPreview { name: "Budget", preview: "Allocation for education" },
            DocumentPreview { name: "Hansard", preview: "The House met at 2 pm" },
        ];
        let prompt = relevance_prompt("education spending", &docs);
        assert!(prompt.contains("User Question: education spending"));
        assert!(prompt.contains("Document 1: Budget\nPreview: Allocation for education..."));
        assert!(prompt.contains("Document 2: Hansard"));
    }

    #[test]
    fn relevance_prompt_cuts_previews() {
        let long = "x".repeat(SUMMARY_PREVIEW_CHARS + 100);
        let docs = [DocumentPreview { name: "Long", preview: &long }];
        let prompt = relevance_prompt("q", &docs);
        assert!(!prompt.contains(&"x".repeat(SUMMARY_PREVIEW_CHARS + 1)));
    }

    #[test]
    fn document_choice_parsing() {
        assert_eq!(parse_document_choice("2", 3), 1);
        assert_eq!(parse_document_choice("Document 3 is best", 3), 2);
        assert_eq!(parse_document_choice("0", 3), 0);
        assert_eq!(parse_document_choice("7", 3), 0);
        assert_eq!(parse_document_choice("none", 3), 0);
    }

    #[test]
    fn answer_prompt_truncates_content() {
        let text = "y".repeat(ANSWER_CONTEXT_CHARS + 10);
        let prompt = answer_prompt("q", "Doc", &text);
        assert!(prompt.starts_with("User Question: q"));
        assert!(prompt.contains("Document Name: Doc"));
        assert_eq!(prompt.matches('y').count(), ANSWER_CONTEXT_CHARS);
    }

    // -- history ------------------------------------------------------------

    #[test]
    fn recent_history_keeps_last_pairs() {
        let mut turns = Vec::new();
        for i in 0..7 {
            turns.push(turn(MessageRole::User, &format!("q{i}")));
            turns.push(turn(MessageRole::Assistant, &format!("a{i}")));
        }
        let window = recent_history(&turns, HISTORY_PAIRS);
        assert_eq!(window.len(), 10);
        assert_eq!(window[0].content, "q2");
        assert_eq!(window[9].content, "a6");
    }

    #[test]
    fn recent_history_drops_orphans() {
        let turns = vec![
            turn(MessageRole::Assistant, "stray"),
            turn(MessageRole::User, "q1"),
            turn(MessageRole::User, "q2"),
            turn(MessageRole::Assistant, "a2"),
            turn(MessageRole::User, "q3"),
        ];
        let window = recent_history(&turns, HISTORY_PAIRS);
        assert_eq!(
            window,
            vec![turn(MessageRole::User, "q2"), turn(MessageRole::Assistant, "a2")]
        );
    }
}
