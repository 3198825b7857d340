//! Parliament Watch API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! chatbot pipeline) so integration tests and the binary entrypoint can
//! both access them.

pub mod auth;
pub mod chatbot;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
