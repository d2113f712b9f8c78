//! Completion provider integrations for medchat
//!
//! This crate provides the provider abstraction and the Ollama-style
//! generate client used for assistant replies.

pub mod base;
pub mod ollama;

pub use base::{CompletionProvider, ProviderError, ProviderResult};
pub use ollama::OllamaClient;

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// A provider that allows hot-swapping the underlying implementation.
///
/// Backs the runtime model switcher: the conversation flow holds one
/// `Arc<DynamicProvider>` while the active model changes underneath it.
pub struct DynamicProvider {
    inner: RwLock<Arc<dyn CompletionProvider>>,
}

impl DynamicProvider {
    /// Create a new dynamic provider
    pub fn new(initial: Arc<dyn CompletionProvider>) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }

    /// Update the underlying provider
    pub fn update(&self, new_provider: Arc<dyn CompletionProvider>) {
        if let Ok(mut lock) = self.inner.write() {
            *lock = new_provider;
        }
    }

    /// Get the current provider (for read operations)
    pub fn current(&self) -> Arc<dyn CompletionProvider> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl CompletionProvider for DynamicProvider {
    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        let provider = self.current();
        provider.generate(prompt).await
    }

    fn model(&self) -> String {
        self.current().model()
    }
}
