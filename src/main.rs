use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use pantry_chef::{api, config::AppConfig, database, llm, middleware, services::RecipeService};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("❌ Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    log::info!("🚀 Starting Pantry Chef...");

    let provider = llm::provider_from_config(&config.llm);
    match &provider {
        Some(p) => log::info!("🤖 LLM provider: {} ({})", p.provider_name(), p.model_name()),
        None => log::warn!("⚠️  OPENAI_API_KEY not set - recipe generation will fail until configured"),
    }

    let store = database::connect(&config.store).await.map_err(|e| {
        log::error!("❌ Failed to connect recipe store: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let service = web::Data::new(RecipeService::new(provider, store, config.llm.temperature));

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(service.clone())
            .wrap(middleware::cors())
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
