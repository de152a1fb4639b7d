//! OpenAI chat-completions provider.

use super::{ChatRequest, LlmError, LlmProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "OpenAI";

#[derive(Debug)]
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// `base_url` is the API root, e.g. `https://api.openai.com/v1`.
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let body = CompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: &request.system,
                },
                Message {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        log::debug!("🤖 POST {} (model {})", url, self.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            log::error!("❌ OpenAI returned {}: {}", status, detail);
            return Err(LlmError::ApiError {
                provider: PROVIDER,
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown status").to_string(),
            });
        }

        let completion: CompletionResponse =
            response.json().await.map_err(|e| LlmError::ParseError {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::ParseError {
                provider: PROVIDER,
                message: "No message content in first choice".to_string(),
            })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn chat_request() -> ChatRequest {
        ChatRequest {
            system: "Respond with JSON".into(),
            user: "Create a recipe".into(),
            temperature: 0.7,
        }
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice_content() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [
                    { "role": "system", "content": "Respond with JSON" },
                    { "role": "user", "content": "Create a recipe" }
                ],
                "temperature": 0.7
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-1",
                "choices": [
                    { "index": 0, "message": { "role": "assistant", "content": "{\"title\":\"Soup\"}" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(
            "sk-test".into(),
            "gpt-4o-mini".into(),
            format!("{}/v1/", server.uri()),
        );

        let content = provider.complete(&chat_request()).await.unwrap();
        assert_eq!(content, "{\"title\":\"Soup\"}");
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let provider =
            OpenAiProvider::new("sk-test".into(), "gpt-4o-mini".into(), format!("{}/v1", server.uri()));

        let err = provider.complete(&chat_request()).await.unwrap_err();
        assert!(matches!(err, LlmError::ApiError { status: 429, .. }));
        assert_eq!(err.to_string(), "OpenAI API error: Too Many Requests");
    }

    #[tokio::test]
    async fn test_empty_choices_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
            .mount(&server)
            .await;

        let provider =
            OpenAiProvider::new("sk-test".into(), "gpt-4o-mini".into(), format!("{}/v1", server.uri()));

        let err = provider.complete(&chat_request()).await.unwrap_err();
        assert!(matches!(err, LlmError::ParseError { .. }));
    }
}
