//! Document-grounded chatbot: PDF discovery and the answer pipeline.

pub mod documents;
pub mod pipeline;

pub use documents::{load_documents, LoadedDocument};
pub use pipeline::{answer_question, Answer};
