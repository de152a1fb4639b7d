use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pantry Chef API",
        version = "1.0.0",
        description = "AI recipe generation from the ingredients in your kitchen.\n\n**Features:**\n- Recipe generation via chat-completion model\n- Per-user recipe history\n- Health monitoring and metrics"
    ),
    paths(
        // Recipes
        crate::api::recipes::generate_recipe,
        crate::api::recipes::list_recipes,
        crate::api::recipes::get_recipe,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::GenerateRecipeRequest,
            crate::models::Recipe,
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Recipes", description = "Generate recipes from ingredients and browse a user's saved recipes."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_recipe_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/recipes/generate"));
        assert!(doc.paths.paths.contains_key("/api/v1/recipes/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
