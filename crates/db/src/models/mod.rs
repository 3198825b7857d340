//! Row structs and request DTOs, one module per content area.

pub mod about;
pub mod article;
pub mod chatbot;
pub mod contact;
pub mod home;
pub mod multimedia;
pub mod resource;
pub mod tracker;
pub mod user;
