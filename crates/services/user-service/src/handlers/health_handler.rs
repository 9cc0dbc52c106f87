//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use common::AppResult;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub services: ServiceStatus,
}

/// Individual service status.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub database: ServiceHealth,
    pub cache: ServiceHealth,
}

/// Service health with optional error message.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

impl From<AppResult<()>> for ServiceHealth {
    fn from(result: AppResult<()>) -> Self {
        match result {
            Ok(()) => ServiceHealth {
                status: "healthy".to_string(),
                error: None,
            },
            Err(e) => ServiceHealth {
                status: "unhealthy".to_string(),
                error: Some(e.to_string()),
            },
        }
    }
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Health check endpoint - verifies store and cache connectivity.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let (database, cache) = tokio::join!(state.store.ping(), state.cache.ping());
    let database = ServiceHealth::from(database);
    let cache = ServiceHealth::from(cache);

    let all_healthy = database.is_healthy() && cache.is_healthy();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        services: ServiceStatus { database, cache },
    };

    if all_healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
