//! HTTP client for the generation endpoint plus the UI-side session state.

mod session;

pub use session::{GeneratorSession, SessionError};

use crate::models::{GenerateRecipeRequest, Recipe};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to reach recipe service: {0}")]
    Transport(String),

    /// Message from the service's `{ error }` body
    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("Unexpected response from recipe service: {0}")]
    Decode(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct RecipeClient {
    base_url: String,
    client: reqwest::Client,
}

impl RecipeClient {
    /// `base_url` is the service root, e.g. `http://localhost:3002`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Envia uma requisição de geração; sem retry
    pub async fn generate(&self, request: &GenerateRecipeRequest) -> Result<Recipe, ClientError> {
        let url = format!("{}/api/v1/recipes/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("Recipe service returned {}", status));
            return Err(ClientError::Service {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Recipe>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
