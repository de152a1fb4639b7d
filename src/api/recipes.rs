use crate::api::metrics;
use crate::models::{GenerateRecipeRequest, Recipe};
use crate::services::RecipeService;
use crate::utils::AppError;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct UserQuery {
    /// Dono das receitas
    pub user_id: String,
}

impl UserQuery {
    fn user_id(&self) -> Result<&str, AppError> {
        let user_id = self.user_id.trim();
        if user_id.is_empty() {
            return Err(AppError::InvalidRequest("user_id is required".to_string()));
        }
        Ok(user_id)
    }
}

/// POST /api/v1/recipes/generate
/// Gera uma receita com IA e salva para o usuário
#[utoipa::path(
    post,
    path = "/api/v1/recipes/generate",
    tag = "Recipes",
    request_body = GenerateRecipeRequest,
    responses(
        (status = 200, description = "Recipe generated and saved", body = Recipe),
        (status = 400, description = "No ingredients or missing userId"),
        (status = 500, description = "Configuration, model, format or save failure")
    )
)]
pub async fn generate_recipe(
    service: web::Data<RecipeService>,
    request: web::Json<GenerateRecipeRequest>,
) -> Result<HttpResponse, AppError> {
    metrics::increment_request_count();
    log::info!(
        "🍳 POST /recipes/generate - user: {}, {} ingredients",
        request.user_id,
        request.ingredients.len()
    );

    match service.generate(&request).await {
        Ok(recipe) => {
            metrics::increment_recipes_generated();
            log::info!("✅ Recipe generated: {} ({})", recipe.title, recipe.id);
            Ok(HttpResponse::Ok().json(recipe))
        }
        Err(e) => {
            log::error!("❌ Error in generate-recipe: {}", e);
            Err(e.into())
        }
    }
}

/// Pre-flight; CORS headers are added by the middleware
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// GET /api/v1/recipes?user_id=...
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    tag = "Recipes",
    params(UserQuery),
    responses(
        (status = 200, description = "User recipes, newest first", body = [Recipe])
    )
)]
pub async fn list_recipes(
    service: web::Data<RecipeService>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse, AppError> {
    metrics::increment_request_count();
    let user_id = query.user_id()?;
    log::info!("📋 GET /recipes - user: {}", user_id);

    let recipes = service.recipes_for_user(user_id).await.map_err(|e| {
        log::error!("❌ Failed to list recipes: {}", e);
        AppError::from(e)
    })?;

    Ok(HttpResponse::Ok().json(recipes))
}

/// GET /api/v1/recipes/{id}?user_id=...
#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    tag = "Recipes",
    params(
        ("id" = String, Path, description = "Recipe id"),
        UserQuery
    ),
    responses(
        (status = 200, description = "Recipe", body = Recipe),
        (status = 404, description = "Recipe not found")
    )
)]
pub async fn get_recipe(
    service: web::Data<RecipeService>,
    path: web::Path<String>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse, AppError> {
    metrics::increment_request_count();
    let user_id = query.user_id()?;
    let recipe_id = path.into_inner();

    match service.recipe_for_user(&recipe_id, user_id).await? {
        Some(recipe) => Ok(HttpResponse::Ok().json(recipe)),
        None => Err(AppError::NotFound(format!("Recipe '{}'", recipe_id))),
    }
}
