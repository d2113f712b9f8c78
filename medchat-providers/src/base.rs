//! Base trait for completion providers

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport-level failure
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Success status but a body we cannot parse
    #[error("invalid response: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx status from the endpoint
    #[error("API error: {0}")]
    Api(u16),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Trait for completion providers.
///
/// A provider turns one human prompt into one assistant reply; the
/// caller owns conversation state.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Request a completion for the given prompt
    async fn generate(&self, prompt: &str) -> ProviderResult<String>;

    /// The model this provider currently sends requests with
    fn model(&self) -> String;
}
