use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use legal_query_service::config::Config;
use legal_query_service::handlers::not_found;
use legal_query_service::routes::api;
use legal_query_service::services::LegalService;
use legal_query_service::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let legal_service = match LegalService::from_config(&config.search) {
        Ok(service) => service,
        Err(e) => {
            error!("Failed to load legal knowledge base: {:#}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} legal topics, starting on port {}",
        legal_service.topic_count(),
        config.server.port
    );

    let state = AppState::new(config.clone(), legal_service);
    let max_form_payload_size = config.server.max_form_payload_size;
    let allowed_origins = config.security.allowed_origins.clone();
    let any_origin = config.allows_any_origin();

    let server = HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);
        if any_origin {
            cors = cors.allow_any_origin();
        } else {
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .configure(|cfg| api::configure(cfg, max_form_payload_size))
            .default_service(web::route().to(not_found))
    })
    .bind(format!("{}:{}", config.server.host, config.server.port))?;

    info!(
        "Server started successfully at http://{}:{}",
        config.server.host, config.server.port
    );

    server.workers(config.server.workers).run().await
}
