//! `/api/Consultas` handlers
//!
//! A patient account may read its own appointments, and another patient's
//! appointment answers 404 like a missing one. Every other access
//! needs a clinical role.

use crate::api::auth::AuthUser;
use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::SharedState;
use crate::core::auth::Policy;
use crate::core::dto::{ConsultaRequest, ConsultaResponse};
use crate::domain::{ConsultaId, MedicoId, PacienteId, Role};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn list(
    State(state): State<SharedState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<ConsultaResponse>>> {
    user.require(Policy::Clinical)?;
    Ok(Json(state.services.consultas.list().await?))
}

pub async fn create(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiJson(body): ApiJson<ConsultaRequest>,
) -> ApiResult<(StatusCode, Json<ConsultaResponse>)> {
    user.require(Policy::Clinical)?;
    let consulta = state.services.consultas.create(body).await?;
    Ok((StatusCode::CREATED, Json(consulta)))
}

pub async fn get(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<ConsultaId>,
) -> ApiResult<Json<ConsultaResponse>> {
    let consulta = state.services.consultas.get(id).await?;
    user.require_visible(
        Policy::Clinical,
        Role::Paciente,
        consulta.paciente_id.into_inner(),
        "Consulta",
        id,
    )?;
    Ok(Json(consulta))
}

pub async fn update(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<ConsultaId>,
    ApiJson(body): ApiJson<ConsultaRequest>,
) -> ApiResult<Json<ConsultaResponse>> {
    user.require(Policy::Clinical)?;
    Ok(Json(state.services.consultas.update(id, body).await?))
}

pub async fn delete(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<ConsultaId>,
) -> ApiResult<StatusCode> {
    user.require(Policy::Clinical)?;
    state.services.consultas.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn by_paciente(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<PacienteId>,
) -> ApiResult<Json<Vec<ConsultaResponse>>> {
    user.require_or_owner(Policy::Clinical, Role::Paciente, id.into_inner())?;
    Ok(Json(state.services.consultas.list_by_paciente(id).await?))
}

pub async fn by_medico(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<MedicoId>,
) -> ApiResult<Json<Vec<ConsultaResponse>>> {
    user.require(Policy::Clinical)?;
    Ok(Json(state.services.consultas.list_by_medico(id).await?))
}
