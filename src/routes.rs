use crate::handlers::{diagnose_handler, health_check, index_page, ui_config};
use axum::{Router, routing::get, routing::post};

/// Creates and configures all application routes
pub fn create_routes() -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health_check))
        .route("/api/ui-config", get(ui_config))
        .route("/api/diagnose", post(diagnose_handler))
}
