//! Pure domain logic for the Parliament Watch CMS.
//!
//! Nothing in this crate performs I/O: it holds the shared error type,
//! choice enums, slug and media URL helpers, list-query parsing, and the
//! chatbot's text heuristics so every other crate can depend on it.

pub mod chatbot;
pub mod choices;
pub mod error;
pub mod listing;
pub mod media;
pub mod roles;
pub mod slug;
pub mod types;
