//! Fake provider for tests and offline development (`LLM_PROVIDER=fake`).

use super::{ChatRequest, LlmError, LlmProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

const SAMPLE_RECIPE: &str = r#"{
  "title": "Mediterranean Herb Pasta",
  "description": "A fresh and flavorful pasta dish with aromatic herbs and seasonal vegetables.",
  "ingredients": ["pasta", "garlic", "olive oil", "fresh herbs"],
  "instructions": [
    "Boil pasta according to package directions",
    "Saute garlic and herbs in olive oil",
    "Toss with pasta and serve hot"
  ],
  "cookTime": 25,
  "servings": 4,
  "difficulty": "Easy",
  "cuisineType": "Mediterranean"
}"#;

#[derive(Debug, Clone)]
enum Reply {
    Content(String),
    Status { status: u16, reason: String },
}

#[derive(Debug)]
pub struct FakeProvider {
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl FakeProvider {
    /// Replies with `content` verbatim on every call.
    pub fn with_content(content: &str) -> Self {
        Self::new(Reply::Content(content.to_string()))
    }

    pub fn with_sample_recipe() -> Self {
        Self::with_content(SAMPLE_RECIPE)
    }

    /// Fails every call as if the API answered with `status`.
    pub fn with_api_error(status: u16, reason: &str) -> Self {
        Self::new(Reply::Status {
            status,
            reason: reason.to_string(),
        })
    }

    fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.reply {
            Reply::Content(content) => Ok(content.clone()),
            Reply::Status { status, reason } => Err(LlmError::ApiError {
                provider: "fake",
                status: *status,
                reason: reason.clone(),
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
