// HTTP surface for the reporting platform

pub mod connectors;

pub use connectors::{create_connector_router, ConnectorAppState};

use axum::{response::Json, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

/// Full application router: connector callbacks, health check, permissive CORS.
pub fn create_router(state: ConnectorAppState) -> Router {
    create_connector_router(state)
        .route("/health", get(health_check))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

/// GET /health
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
