use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Receita persistida (linha da tabela `recipes`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Recipe {
    /// Identificador atribuído pelo store
    pub id: String,

    /// Dono da receita
    pub user_id: String,

    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Tempo de preparo em minutos
    pub cook_time: u32,

    pub servings: u32,

    /// Rótulo de dificuldade ("Easy", "Medium", "Hard")
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub cuisine_type: String,

    /// Preferências alimentares enviadas pelo usuário (não as do modelo)
    #[serde(default, deserialize_with = "null_as_default")]
    pub dietary_tags: Vec<String>,

    pub is_ai_generated: bool,

    pub created_at: DateTime<Utc>,
}

impl Recipe {
    /// First `limit` ingredients plus how many were left out ("+N more").
    pub fn key_ingredients(&self, limit: usize) -> (&[String], usize) {
        let shown = self.ingredients.len().min(limit);
        (&self.ingredients[..shown], self.ingredients.len() - shown)
    }

    pub fn cook_time_label(&self) -> String {
        format!("{} min", self.cook_time)
    }
}

/// Receita ainda não persistida, pronta para o insert
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecipe {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: String,
    pub cuisine_type: String,
    pub dietary_tags: Vec<String>,
    pub is_ai_generated: bool,
}

impl NewRecipe {
    /// Combines model output with the caller's user id and dietary tags.
    pub fn from_generated(generated: GeneratedRecipe, user_id: &str, dietary_tags: &[String]) -> Self {
        NewRecipe {
            user_id: user_id.to_string(),
            title: generated.title,
            description: generated.description,
            ingredients: generated.ingredients,
            instructions: generated.instructions,
            cook_time: generated.cook_time,
            servings: generated.servings,
            difficulty: generated.difficulty,
            cuisine_type: generated.cuisine_type,
            dietary_tags: dietary_tags.to_vec(),
            is_ai_generated: true,
        }
    }

    pub fn into_recipe(self, id: String, created_at: DateTime<Utc>) -> Recipe {
        Recipe {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            cook_time: self.cook_time,
            servings: self.servings,
            difficulty: self.difficulty,
            ingredients: self.ingredients,
            instructions: self.instructions,
            cuisine_type: self.cuisine_type,
            dietary_tags: self.dietary_tags,
            is_ai_generated: self.is_ai_generated,
            created_at,
        }
    }
}

/// JSON object the model is asked to return.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: Vec<String>,
    pub cook_time: u32,
    pub servings: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cuisine_type: String,
}

impl GeneratedRecipe {
    /// Rejects replies that parse but could not become a valid recipe row.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is empty".to_string());
        }
        if self.ingredients.is_empty() {
            return Err("ingredients list is empty".to_string());
        }
        if self.cook_time == 0 {
            return Err("cookTime must be positive".to_string());
        }
        if self.servings == 0 {
            return Err("servings must be positive".to_string());
        }
        Ok(())
    }
}

/// Request para gerar receita
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRecipeRequest {
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub cuisine_types: Vec<String>,
    pub user_id: String,
}
