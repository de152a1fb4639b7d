//! Recipe persistence.
//!
//! The generator only inserts and selects, keyed by the store-assigned id and
//! the owning user, so every backend implements the small [`RecipeStore`]
//! trait.

mod memory;
mod mongo;
mod supabase;

pub use self::memory::InMemoryRecipeStore;
pub use self::mongo::MongoRecipeStore;
pub use self::supabase::SupabaseRecipeStore;

use crate::config::StoreConfig;
use crate::models::{NewRecipe, Recipe};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(String),

    #[error("Store returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Unexpected store response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Inserts one row and returns it with its assigned id.
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError>;

    /// The user's recipes, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Recipe>, StoreError>;

    async fn find_for_user(&self, id: &str, user_id: &str) -> Result<Option<Recipe>, StoreError>;

    fn backend_name(&self) -> &'static str;
}

/// Conecta no backend configurado
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn RecipeStore>, StoreError> {
    let store: Arc<dyn RecipeStore> = match config {
        StoreConfig::Supabase { url, api_key } => {
            Arc::new(SupabaseRecipeStore::new(url, api_key))
        }
        StoreConfig::MongoDb { uri } => Arc::new(MongoRecipeStore::new(uri).await?),
        StoreConfig::Memory => Arc::new(InMemoryRecipeStore::new()),
    };

    log::info!("✅ Recipe store ready: {}", store.backend_name());
    Ok(store)
}
