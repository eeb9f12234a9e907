//! `/api/Pacientes` handlers
//!
//! Clinical staff read every patient; a patient account reads and updates
//! its own record.

use crate::api::auth::AuthUser;
use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::SharedState;
use crate::core::auth::Policy;
use crate::core::dto::{PacienteRequest, PacienteResponse};
use crate::domain::{PacienteId, Role};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn list(
    State(state): State<SharedState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<PacienteResponse>>> {
    user.require(Policy::Clinical)?;
    Ok(Json(state.services.pacientes.list().await?))
}

pub async fn create(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiJson(body): ApiJson<PacienteRequest>,
) -> ApiResult<(StatusCode, Json<PacienteResponse>)> {
    user.require(Policy::InstitutionStaff)?;
    let paciente = state.services.pacientes.create(body).await?;
    Ok((StatusCode::CREATED, Json(paciente)))
}

pub async fn get(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<PacienteId>,
) -> ApiResult<Json<PacienteResponse>> {
    user.require_or_owner(Policy::Clinical, Role::Paciente, id.into_inner())?;
    Ok(Json(state.services.pacientes.get(id).await?))
}

pub async fn update(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<PacienteId>,
    ApiJson(body): ApiJson<PacienteRequest>,
) -> ApiResult<Json<PacienteResponse>> {
    user.require_or_owner(Policy::InstitutionStaff, Role::Paciente, id.into_inner())?;
    Ok(Json(state.services.pacientes.update(id, body).await?))
}

pub async fn delete(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<PacienteId>,
) -> ApiResult<StatusCode> {
    user.require(Policy::InstitutionStaff)?;
    state.services.pacientes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn by_cpf(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(cpf): ApiPath<String>,
) -> ApiResult<Json<PacienteResponse>> {
    user.require(Policy::Clinical)?;
    Ok(Json(state.services.pacientes.find_by_cpf(&cpf).await?))
}
