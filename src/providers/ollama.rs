use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Ollama client for the `/api/generate` endpoint
#[derive(Debug, Clone)]
pub struct Ollama {
    /// Full URL of the generate endpoint
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

/// Generate request for the Ollama API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    pub model: String,
    /// Prompt to generate from
    pub prompt: String,
    /// Whether to stream the response
    pub stream: bool,
}

/// Generation response from the Ollama API
///
/// Only `response` is needed; the rest is informational and may be absent
/// on compatible servers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: String,
    /// Generated text, `null` on some compatible servers
    #[serde(default)]
    pub response: Option<String>,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
    /// Number of prompt tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

impl GenerationRequest {
    /// Create a new non-streaming generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
        }
    }
}

impl Ollama {
    /// Create a new Ollama client from the complete generate URL
    ///
    /// No request timeout is set: a slow local model is waited for.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            endpoint: url.into(),
            client: Client::builder().build().unwrap_or_default(),
        }
    }

    /// Generate text, one attempt, no retries
    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        debug!("POST {} (model {})", self.endpoint, request.model);

        let response = self.client.post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Ollama API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let response_text = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to get response text: {}", e)))?;

        serde_json::from_str::<GenerationResponse>(&response_text).map_err(|e| {
            error!("Failed to parse Ollama API response: {}. Raw response (first 500 chars): {}",
                e, response_text.chars().take(500).collect::<String>());
            ProviderError::ParseError(e.to_string())
        })
    }
}

#[async_trait]
impl Provider for Ollama {
    type Request = GenerationRequest;
    type Response = GenerationResponse;

    fn build_request(&self, model: &str, prompt: &str) -> Self::Request {
        GenerationRequest::new(model, prompt)
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.generate(request).await
    }

    fn extract_text(response: &Self::Response) -> String {
        response.response.clone().unwrap_or_default()
    }
}
