use super::{RecipeStore, StoreError};
use crate::models::recipe::null_as_default;
use crate::models::{NewRecipe, Recipe};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};

const COLLECTION: &str = "recipes";
const DEFAULT_DB_NAME: &str = "pantry_chef";

/// Documento da coleção `recipes`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RecipeDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    user_id: String,
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    cook_time: u32,
    servings: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    difficulty: String,
    #[serde(default, deserialize_with = "null_as_default")]
    ingredients: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    instructions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    cuisine_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    dietary_tags: Vec<String>,
    is_ai_generated: bool,
    /// Unix timestamp em milissegundos
    created_at: i64,
}

impl RecipeDocument {
    fn from_new(recipe: NewRecipe, created_at: i64) -> Self {
        RecipeDocument {
            id: None,
            user_id: recipe.user_id,
            title: recipe.title,
            description: recipe.description,
            cook_time: recipe.cook_time,
            servings: recipe.servings,
            difficulty: recipe.difficulty,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            cuisine_type: recipe.cuisine_type,
            dietary_tags: recipe.dietary_tags,
            is_ai_generated: recipe.is_ai_generated,
            created_at,
        }
    }
}

impl From<RecipeDocument> for Recipe {
    fn from(document: RecipeDocument) -> Self {
        Recipe {
            id: document.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: document.user_id,
            title: document.title,
            description: document.description,
            cook_time: document.cook_time,
            servings: document.servings,
            difficulty: document.difficulty,
            ingredients: document.ingredients,
            instructions: document.instructions,
            cuisine_type: document.cuisine_type,
            dietary_tags: document.dietary_tags,
            is_ai_generated: document.is_ai_generated,
            created_at: Utc
                .timestamp_millis_opt(document.created_at)
                .single()
                .unwrap_or_default(),
        }
    }
}

#[derive(Clone)]
pub struct MongoRecipeStore {
    db: Database,
}

impl MongoRecipeStore {
    pub async fn new(uri: &str) -> Result<Self, StoreError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let db = client.database(database_name(uri));

        // Test connection
        db.list_collection_names()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let store = Self { db };
        store.ensure_indexes().await;

        Ok(store)
    }

    /// Creates the indexes used by per-user listing
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let recipes = self.db.collection::<mongodb::bson::Document>(COLLECTION);

        let user_index = IndexModel::builder().keys(doc! { "user_id": 1 }).build();
        match recipes.create_index(user_index).await {
            Ok(_) => log::info!("   ✅ Index created: recipes(user_id)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let recent_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .build();
        match recipes.create_index(recent_index).await {
            Ok(_) => log::info!("   ✅ Index created: recipes(user_id, created_at)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");
    }

    fn recipes(&self) -> Collection<RecipeDocument> {
        self.db.collection(COLLECTION)
    }
}

/// Nome do banco extraído da URI, ou o padrão
fn database_name(uri: &str) -> &str {
    uri.split_once("://")
        .map(|(_, rest)| rest)
        .and_then(|rest| rest.split_once('/'))
        .map(|(_, path)| path.split('?').next().unwrap_or(""))
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DB_NAME)
}

#[async_trait]
impl RecipeStore for MongoRecipeStore {
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let mut document = RecipeDocument::from_new(recipe, Utc::now().timestamp_millis());

        let result = self
            .recipes()
            .insert_one(&document)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Decode("inserted _id is not an ObjectId".to_string()))?;
        document.id = Some(id);

        Ok(document.into())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Recipe>, StoreError> {
        let cursor = self
            .recipes()
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let documents: Vec<RecipeDocument> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(documents.into_iter().map(Recipe::from).collect())
    }

    async fn find_for_user(&self, id: &str, user_id: &str) -> Result<Option<Recipe>, StoreError> {
        let object_id = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        let document = self
            .recipes()
            .find_one(doc! { "_id": object_id, "user_id": user_id })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(document.map(Recipe::from))
    }

    fn backend_name(&self) -> &'static str {
        "mongodb"
    }
}
