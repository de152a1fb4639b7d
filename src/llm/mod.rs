//! Chat-completion providers used by the recipe generator.
//!
//! The generator only needs "send a system + user message, get text back",
//! so providers hide the wire format behind [`LlmProvider`].

mod fake;
mod openai;

pub use fake::FakeProvider;
pub use openai::OpenAiProvider;

use crate::config::{LlmConfig, LlmProviderKind};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} request failed: {message}")]
    RequestFailed {
        provider: &'static str,
        message: String,
    },

    /// Non-success HTTP status. `reason` is the status text and is what the
    /// caller sees.
    #[error("{provider} API error: {reason}")]
    ApiError {
        provider: &'static str,
        status: u16,
        reason: String,
    },

    #[error("Failed to parse {provider} response: {message}")]
    ParseError {
        provider: &'static str,
        message: String,
    },
}

/// One chat turn: a fixed system instruction plus the user prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Sends the request once and returns the text of the first choice.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;

    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

/// Builds the configured provider. `None` means the OpenAI credential is
/// missing; generation then fails with a configuration error.
pub fn provider_from_config(config: &LlmConfig) -> Option<Arc<dyn LlmProvider>> {
    match config.provider {
        LlmProviderKind::Fake => {
            Some(Arc::new(FakeProvider::with_sample_recipe()) as Arc<dyn LlmProvider>)
        }
        LlmProviderKind::OpenAi => config.api_key.as_ref().map(|key| {
            Arc::new(OpenAiProvider::new(
                key.clone(),
                config.model.clone(),
                config.base_url.clone(),
            )) as Arc<dyn LlmProvider>
        }),
    }
}
