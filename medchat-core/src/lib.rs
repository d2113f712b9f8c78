//! Core types and logic for medchat
//!
//! This crate provides the session store, the markdown rendering
//! pipeline, and the configuration and logging foundation used by the
//! other medchat components.

pub mod config;
pub mod error;
pub mod logging;
pub mod markdown;
pub mod session;
pub mod utils;

pub use error::{Error, Result};
