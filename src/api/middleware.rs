//! Request logging and timeouts

use super::error::ApiError;
use super::SharedState;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::time::Instant;

/// Logs method, path, status and latency of every request
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    crate::log_request_completed!(method, path, response.status().as_u16(), started.elapsed());
    response
}

/// Answers 408 when the handler outlives `server.request_timeout_seconds`
pub async fn request_timeout(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(state.request_timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(timeout = ?state.request_timeout, "Request timed out");
            ApiError::new(
                StatusCode::REQUEST_TIMEOUT,
                "request_timeout",
                "tempo limite da requisição excedido",
            )
            .into_response()
        }
    }
}
