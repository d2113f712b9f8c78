//! Conversation orchestration for medchat
//!
//! This crate drives one chat round trip: record the human message,
//! ask the completion provider for a reply, record the outcome.

pub mod controller;

pub use controller::ConversationController;
