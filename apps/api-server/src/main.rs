//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use api_server::config::AppConfig;
use api_server::handlers;
use api_server::middleware::cors::cors_policy;
use api_server::observability::AccessLog;
use api_server::state::AppState;
use api_server::telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Blog API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize application state");
        std::io::Error::other(e)
    })?;

    HttpServer::new(move || {
        App::new()
            .wrap(cors_policy())
            .wrap(AccessLog)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
