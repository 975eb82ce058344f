use axum::{Extension, Router};
use tower_http::cors::CorsLayer;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::diagnosis::GatewayClient;
use crate::routes::create_routes;

/// Initialize tracing and logging for the application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "crop_doctor_svc=info,tower_http=debug,axum::rejection=info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create and configure the Axum application with all routes and middleware.
/// The permissive CORS layer also answers OPTIONS preflights.
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    info!("Initializing application router");

    if config.api_key.is_none() {
        warn!("AI_GATEWAY_API_KEY is not set; diagnose requests will fail until it is configured");
    }
    let gateway = GatewayClient::new(config)?;

    Ok(create_routes()
        .layer(Extension(gateway)) // Add gateway client as shared state
        .layer(CorsLayer::permissive()))
}
