use crate::api::SharedState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
}

/// Public liveness check; 503 when the storage backend is unreachable
pub async fn health(State(state): State<SharedState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, label) = match state.health.test_connection().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, backend = state.health.backend(), "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let body = HealthResponse {
        status: label.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.health.backend().to_string(),
    };
    (status, Json(body))
}
