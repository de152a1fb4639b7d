pub mod health;
pub mod metrics;
pub mod recipes;
pub mod swagger;

use crate::utils::AppError;
use actix_web::{http::Method, web};

/// Rotas da API (compartilhadas entre `main` e os testes)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Recipes
        .service(
            web::scope("/api/v1/recipes")
                .route("/generate", web::post().to(recipes::generate_recipe))
                .route("/generate", web::method(Method::OPTIONS).to(recipes::preflight))
                .route("", web::get().to(recipes::list_recipes))
                .route("/{id}", web::get().to(recipes::get_recipe)),
        );
}

/// Malformed JSON bodies answer 400 with the same `{ error }` shape
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("⚠️  Rejected request body: {}", err);
        AppError::InvalidRequest(err.to_string()).into()
    })
}

/// Missing or malformed query strings (e.g. no `user_id`) answer 400 as well
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::warn!("⚠️  Rejected query string: {}", err);
        AppError::InvalidRequest(err.to_string()).into()
    })
}
