/*!
 * Inference endpoint clients.
 *
 * This module contains the client for the locally hosted generation
 * endpoint:
 * - Ollama: `/api/generate` compatible server
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for text generation backends
///
/// The translation client only needs to build a request from a model
/// identifier and a prompt, send it, and read the generated text back.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Build a non-streaming generation request
    ///
    /// # Arguments
    /// * `model` - Model identifier understood by the endpoint
    /// * `prompt` - Full prompt text
    fn build_request(&self, model: &str, prompt: &str) -> Self::Request;

    /// Complete a request using this provider
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Extract the generated text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

pub mod ollama;
