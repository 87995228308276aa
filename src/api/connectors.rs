//! Connector callback API endpoints.
//!
//! Exposes the four platform callbacks of the configured connector over HTTP:
//! - `GET|POST /api/connector/config` — configuration description
//! - `GET|POST /api/connector/schema` — full field catalog
//! - `GET /api/connector/auth-type` — authentication mechanism
//! - `POST /api/connector/data` — projected schema plus rows

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use crm_connector::{
    AuthTypeResponse, ConfigSchema, Connector, ConnectorError, GetDataRequest, GetDataResponse,
    GetSchemaResponse,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, warn};


/// Shared application state for connector API
#[derive(Clone)]
pub struct ConnectorAppState {
    pub connector: Arc<dyn Connector>,
}

/// Error response
#[derive(Serialize, Debug, PartialEq)]
struct ErrorResponse {
    error: String,
    kind: String,
}

/// Create the connector callback router
pub fn create_connector_router(state: ConnectorAppState) -> Router {
    Router::new()
        .route("/api/connector/config", get(get_config).post(get_config))
        .route("/api/connector/schema", get(get_schema).post(get_schema))
        .route("/api/connector/auth-type", get(get_auth_type))
        .route("/api/connector/data", post(get_data))
        .with_state(Arc::new(state))
}

/// GET|POST /api/connector/config
async fn get_config(State(state): State<Arc<ConnectorAppState>>) -> Json<ConfigSchema> {
    Json(state.connector.get_config())
}

/// GET|POST /api/connector/schema
async fn get_schema(State(state): State<Arc<ConnectorAppState>>) -> Json<GetSchemaResponse> {
    Json(state.connector.get_schema())
}

/// GET /api/connector/auth-type
async fn get_auth_type(State(state): State<Arc<ConnectorAppState>>) -> Json<AuthTypeResponse> {
    Json(state.connector.get_auth_type())
}

/// POST /api/connector/data
///
/// Fails as a whole on any auth or query error; never answers with an empty
/// row set in place of an error.
async fn get_data(
    State(state): State<Arc<ConnectorAppState>>,
    Json(request): Json<GetDataRequest>,
) -> Result<Json<GetDataResponse>, AppError> {
    debug!(
        connector = state.connector.name(),
        fields = ?request.field_names(),
        "getData requested"
    );

    let response = state.connector.get_data(&request).await?;
    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum AppError {
    /// Provider-side failure (token exchange or query).
    Upstream { kind: &'static str, message: String },
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        let message = format!("{:#}", e);
        match e.downcast_ref::<ConnectorError>() {
            Some(classified) => AppError::Upstream {
                kind: classified.kind(),
                message,
            },
            None => AppError::Internal(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::Upstream { kind, message } => {
                warn!(kind, error = %message, "getData failed upstream");
                (StatusCode::BAD_GATEWAY, kind, message)
            }
            AppError::Internal(message) => {
                error!(error = %message, "getData failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: message,
                kind: kind.to_string(),
            }),
        )
            .into_response()
    }
}
