//! Ollama HTTP client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use medchat_core::utils::truncate;

use crate::base::{CompletionProvider, ProviderError, ProviderResult};

/// Generate API request format
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Generate API response format
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for an Ollama-style `/api/generate` endpoint
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a new client against the given base URL
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OllamaClient {
    async fn generate(&self, prompt: &str) -> ProviderResult<String> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        debug!(
            "Sending generate request to {} with model {}: {}",
            self.base_url,
            self.model,
            truncate(prompt, 80)
        );

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Generate request failed with {}: {}", status, truncate(&body, 200));
            return Err(ProviderError::Api(status));
        }

        let body = response.text().await?;
        let data: GenerateResponse = serde_json::from_str(&body)?;
        Ok(data.response)
    }

    fn model(&self) -> String {
        self.model.clone()
    }
}
