use crate::{
    database::{RecipeStore, StoreError},
    llm::{ChatRequest, LlmError, LlmProvider},
    models::{GenerateRecipeRequest, GeneratedRecipe, NewRecipe, Preferences, Recipe},
    services::prompt::{build_recipe_prompt, SYSTEM_PROMPT},
};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Configuration(String),

    #[error(transparent)]
    Upstream(#[from] LlmError),

    #[error("Invalid recipe format received from AI")]
    InvalidFormat(String),

    #[error("Failed to save recipe")]
    Persistence(#[source] StoreError),
}

/// Gera receitas via LLM e persiste no store
pub struct RecipeService {
    provider: Option<Arc<dyn LlmProvider>>,
    store: Arc<dyn RecipeStore>,
    temperature: f32,
}

impl RecipeService {
    /// `provider` is `None` when no model credential is configured.
    pub fn new(
        provider: Option<Arc<dyn LlmProvider>>,
        store: Arc<dyn RecipeStore>,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            store,
            temperature,
        }
    }

    pub fn store(&self) -> &dyn RecipeStore {
        self.store.as_ref()
    }

    /// One prompt, one model call, one insert. Every call creates a new row.
    pub async fn generate(&self, request: &GenerateRecipeRequest) -> Result<Recipe, GenerationError> {
        let ingredients = normalized_ingredients(&request.ingredients);
        if ingredients.is_empty() {
            return Err(GenerationError::InvalidRequest(
                "At least one ingredient is required".to_string(),
            ));
        }
        if request.user_id.trim().is_empty() {
            return Err(GenerationError::InvalidRequest("userId is required".to_string()));
        }

        let provider = self.provider.as_ref().ok_or_else(|| {
            GenerationError::Configuration("OpenAI API key not configured".to_string())
        })?;

        log::info!("🍳 Generating recipe for user: {}", request.user_id);

        let chat = ChatRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: build_recipe_prompt(
                &ingredients,
                &request.dietary_preferences,
                &request.cuisine_types,
            ),
            temperature: self.temperature,
        };

        let content = provider.complete(&chat).await?;

        let generated = parse_generated_recipe(&content).map_err(|reason| {
            log::error!("❌ Failed to parse recipe JSON ({}): {}", reason, content);
            GenerationError::InvalidFormat(reason)
        })?;

        let new_recipe = NewRecipe::from_generated(
            generated,
            &request.user_id,
            &request.dietary_preferences,
        );

        let saved = self.store.insert(new_recipe).await.map_err(|e| {
            log::error!("❌ Error saving recipe: {}", e);
            GenerationError::Persistence(e)
        })?;

        log::info!("✅ Recipe saved successfully: {}", saved.id);
        Ok(saved)
    }

    pub async fn recipes_for_user(&self, user_id: &str) -> Result<Vec<Recipe>, StoreError> {
        self.store.list_for_user(user_id).await
    }

    pub async fn recipe_for_user(&self, id: &str, user_id: &str) -> Result<Option<Recipe>, StoreError> {
        self.store.find_for_user(id, user_id).await
    }
}

/// Trimmed, non-blank, first occurrence wins; same rules as the collector.
fn normalized_ingredients(raw: &[String]) -> Vec<String> {
    let mut preferences = Preferences::default();
    for ingredient in raw {
        preferences.add_ingredient(ingredient);
    }
    preferences.ingredients().to_vec()
}

/// Parses the model reply as-is (no repair) and checks it can become a row.
pub fn parse_generated_recipe(content: &str) -> Result<GeneratedRecipe, String> {
    let generated: GeneratedRecipe = serde_json::from_str(content).map_err(|e| e.to_string())?;
    generated.validate()?;
    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryRecipeStore;
    use crate::llm::FakeProvider;
    use async_trait::async_trait;

    const REPLY: &str = r#"{
        "title": "Tomato Basil Bruschetta",
        "description": "Classic Italian starter",
        "ingredients": ["tomato", "basil", "bread", "olive oil"],
        "instructions": ["Toast bread", "Top with tomato and basil"],
        "cookTime": 15,
        "servings": 4,
        "difficulty": "Easy",
        "cuisineType": "Italian"
    }"#;

    fn request(ingredients: &[&str], dietary: &[&str], cuisines: &[&str]) -> GenerateRecipeRequest {
        GenerateRecipeRequest {
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            dietary_preferences: dietary.iter().map(|s| s.to_string()).collect(),
            cuisine_types: cuisines.iter().map(|s| s.to_string()).collect(),
            user_id: "user-1".to_string(),
        }
    }

    fn service_with(provider: Option<Arc<FakeProvider>>, store: Arc<InMemoryRecipeStore>) -> RecipeService {
        RecipeService::new(
            provider.map(|p| p as Arc<dyn LlmProvider>),
            store as Arc<dyn RecipeStore>,
            0.7,
        )
    }

    /// Store whose inserts always fail
    struct FailingStore;

    #[async_trait]
    impl RecipeStore for FailingStore {
        async fn insert(&self, _recipe: NewRecipe) -> Result<Recipe, StoreError> {
            Err(StoreError::Backend {
                status: 500,
                message: "insert failed".into(),
            })
        }

        async fn list_for_user(&self, _user_id: &str) -> Result<Vec<Recipe>, StoreError> {
            Ok(vec![])
        }

        async fn find_for_user(&self, _id: &str, _user_id: &str) -> Result<Option<Recipe>, StoreError> {
            Ok(None)
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_generate_persists_recipe_with_caller_tags() {
        let provider = Arc::new(FakeProvider::with_content(REPLY));
        let store = Arc::new(InMemoryRecipeStore::new());
        let service = service_with(Some(provider.clone()), store.clone());

        let recipe = service
            .generate(&request(&["tomato", "basil"], &["Vegetarian"], &["Italian"]))
            .await
            .unwrap();

        assert!(!recipe.id.is_empty());
        assert_eq!(recipe.user_id, "user-1");
        assert_eq!(recipe.title, "Tomato Basil Bruschetta");
        assert_eq!(recipe.dietary_tags, vec!["Vegetarian"]);
        assert!(recipe.is_ai_generated);
        assert!(!recipe.ingredients.is_empty());
        assert!(recipe.cook_time > 0 && recipe.servings > 0);
        assert_eq!(provider.call_count(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_prompt_sent_to_provider() {
        let provider = Arc::new(FakeProvider::with_content(REPLY));
        let service = service_with(Some(provider.clone()), Arc::new(InMemoryRecipeStore::new()));

        service
            .generate(&request(&["tomato", "basil"], &[], &["Italian"]))
            .await
            .unwrap();

        let sent = provider.last_request().unwrap();
        assert_eq!(sent.system, SYSTEM_PROMPT);
        assert!(sent.user.contains("tomato, basil"));
        assert!(sent.user.contains("Dietary preferences: None"));
        assert!(sent.user.contains("Cuisine types: Italian"));
        assert!(sent.temperature > 0.0);
    }

    #[tokio::test]
    async fn test_blank_and_duplicate_ingredients_are_dropped_from_prompt() {
        let provider = Arc::new(FakeProvider::with_content(REPLY));
        let service = service_with(Some(provider.clone()), Arc::new(InMemoryRecipeStore::new()));

        service
            .generate(&request(&["tomato", "  ", " tomato ", "basil"], &[], &[]))
            .await
            .unwrap();

        let sent = provider.last_request().unwrap();
        assert!(sent
            .user
            .contains("Create a detailed recipe using these ingredients: tomato, basil."));
    }

    #[tokio::test]
    async fn test_only_blank_ingredients_is_invalid_request() {
        let provider = Arc::new(FakeProvider::with_content(REPLY));
        let store = Arc::new(InMemoryRecipeStore::new());
        let service = service_with(Some(provider.clone()), store.clone());

        let err = service.generate(&request(&[" ", ""], &[], &[])).await.unwrap_err();

        assert!(matches!(err, GenerationError::InvalidRequest(_)));
        assert_eq!(provider.call_count(), 0);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_call_and_no_write() {
        let store = Arc::new(InMemoryRecipeStore::new());
        let service = service_with(None, store.clone());

        let err = service.generate(&request(&["egg"], &[], &[])).await.unwrap_err();

        assert!(matches!(err, GenerationError::Configuration(_)));
        assert_eq!(err.to_string(), "OpenAI API key not configured");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_non_json_reply_is_format_error_without_write() {
        let provider = Arc::new(FakeProvider::with_content("Sure! Here is a recipe: pasta."));
        let store = Arc::new(InMemoryRecipeStore::new());
        let service = service_with(Some(provider.clone()), store.clone());

        let err = service.generate(&request(&["pasta"], &[], &[])).await.unwrap_err();

        assert!(matches!(err, GenerationError::InvalidFormat(_)));
        assert_eq!(err.to_string(), "Invalid recipe format received from AI");
        assert_eq!(provider.call_count(), 1);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_reply_with_blank_title_is_format_error() {
        let provider = Arc::new(FakeProvider::with_content(
            r#"{"title": "", "ingredients": ["egg"], "cookTime": 5, "servings": 1}"#,
        ));
        let store = Arc::new(InMemoryRecipeStore::new());
        let service = service_with(Some(provider), store.clone());

        let err = service.generate(&request(&["egg"], &[], &[])).await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidFormat(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_error_is_surfaced_verbatim() {
        let provider = Arc::new(FakeProvider::with_api_error(401, "Unauthorized"));
        let store = Arc::new(InMemoryRecipeStore::new());
        let service = service_with(Some(provider), store.clone());

        let err = service.generate(&request(&["egg"], &[], &[])).await.unwrap_err();
        assert!(matches!(err, GenerationError::Upstream(_)));
        assert_eq!(err.to_string(), "fake API error: Unauthorized");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_persistence_error() {
        let provider: Arc<dyn LlmProvider> = Arc::new(FakeProvider::with_content(REPLY));
        let service = RecipeService::new(Some(provider), Arc::new(FailingStore), 0.7);

        let err = service.generate(&request(&["tomato"], &[], &[])).await.unwrap_err();
        assert!(matches!(err, GenerationError::Persistence(_)));
        assert_eq!(err.to_string(), "Failed to save recipe");
    }

    #[tokio::test]
    async fn test_identical_requests_create_distinct_rows() {
        let provider = Arc::new(FakeProvider::with_content(REPLY));
        let store = Arc::new(InMemoryRecipeStore::new());
        let service = service_with(Some(provider.clone()), store.clone());
        let req = request(&["tomato", "basil"], &[], &["Italian"]);

        let first = service.generate(&req).await.unwrap();
        let second = service.generate(&req).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.len(), 2);
        assert_eq!(provider.call_count(), 2);

        let listed = service.recipes_for_user("user-1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert!(service.recipe_for_user(&first.id, "user-1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_empty_ingredients_rejected_before_any_call() {
        let provider = Arc::new(FakeProvider::with_content(REPLY));
        let store = Arc::new(InMemoryRecipeStore::new());
        let service = service_with(Some(provider.clone()), store.clone());

        let err = service.generate(&request(&[], &[], &[])).await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidRequest(_)));

        let mut anonymous = request(&["egg"], &[], &[]);
        anonymous.user_id = "  ".into();
        assert!(matches!(
            service.generate(&anonymous).await,
            Err(GenerationError::InvalidRequest(_))
        ));

        assert_eq!(provider.call_count(), 0);
        assert!(store.is_empty());
    }
}
