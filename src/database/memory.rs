use super::{RecipeStore, StoreError};
use crate::models::{NewRecipe, Recipe};
use async_trait::async_trait;
use std::sync::RwLock;
use uuid::Uuid;

/// Process-local store (`RECIPE_STORE=memory`); contents vanish on restart.
#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.recipes.read().map(|recipes| recipes.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Query("recipe store lock poisoned".to_string())
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let saved = recipe.into_recipe(Uuid::new_v4().to_string(), chrono::Utc::now());
        self.recipes.write().map_err(|_| poisoned())?.push(saved.clone());
        Ok(saved)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Recipe>, StoreError> {
        let recipes = self.recipes.read().map_err(|_| poisoned())?;
        // Inserção é cronológica; inverte para mais recentes primeiro
        Ok(recipes
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_for_user(&self, id: &str, user_id: &str) -> Result<Option<Recipe>, StoreError> {
        let recipes = self.recipes.read().map_err(|_| poisoned())?;
        Ok(recipes
            .iter()
            .find(|r| r.id == id && r.user_id == user_id)
            .cloned())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
