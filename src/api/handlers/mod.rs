//! Route handlers, one module per resource

pub mod auth;
pub mod consultas;
pub mod especialidades;
pub mod exames;
pub mod health;
pub mod historicos;
pub mod instituicoes;
pub mod medicos;
pub mod pacientes;

use super::error::ApiError;
use axum::http::StatusCode;

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "not_found", "rota não encontrada")
}
