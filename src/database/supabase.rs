use super::{RecipeStore, StoreError};
use crate::models::{NewRecipe, Recipe};
use async_trait::async_trait;

const TABLE: &str = "recipes";

/// Tabela `recipes` exposta pelo PostgREST do Supabase
#[derive(Debug, Clone)]
pub struct SupabaseRecipeStore {
    table_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl SupabaseRecipeStore {
    /// `project_url` is the project root, e.g. `https://abc.supabase.co`.
    pub fn new(project_url: &str, api_key: &str) -> Self {
        Self {
            table_url: format!("{}/rest/v1/{}", project_url.trim_end_matches('/'), TABLE),
            api_key: api_key.to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, &self.table_url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select(&self, filters: &[(&str, String)]) -> Result<Vec<Recipe>, StoreError> {
        let response = self
            .request(reqwest::Method::GET)
            .query(&[("select", "*".to_string()), ("order", "created_at.desc".to_string())])
            .query(filters)
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let response = error_for_status(response).await?;
        response
            .json::<Vec<Recipe>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Backend {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl RecipeStore for SupabaseRecipeStore {
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let response = self
            .request(reqwest::Method::POST)
            .header("Prefer", "return=representation")
            // Objeto único em vez de array
            .header("Accept", "application/vnd.pgrst.object+json")
            .json(&recipe)
            .send()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let response = error_for_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        // A linha já foi gravada; sem o corpo não dá para achá-la depois
        serde_json::from_str::<Recipe>(&body).map_err(|e| {
            log::error!("❌ Recipe inserted but returned row did not decode ({}): {}", e, body);
            StoreError::Decode(e.to_string())
        })
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Recipe>, StoreError> {
        self.select(&[("user_id", format!("eq.{}", user_id))]).await
    }

    async fn find_for_user(&self, id: &str, user_id: &str) -> Result<Option<Recipe>, StoreError> {
        let rows = self
            .select(&[
                ("id", format!("eq.{}", id)),
                ("user_id", format!("eq.{}", user_id)),
            ])
            .await?;
        Ok(rows.into_iter().next())
    }

    fn backend_name(&self) -> &'static str {
        "supabase"
    }
}
