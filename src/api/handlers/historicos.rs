//! `/api/HistoricosMedicos` handlers

use crate::api::auth::AuthUser;
use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::SharedState;
use crate::core::auth::Policy;
use crate::core::dto::{HistoricoRequest, HistoricoResponse};
use crate::domain::{HistoricoMedicoId, PacienteId, Role};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn create(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiJson(body): ApiJson<HistoricoRequest>,
) -> ApiResult<(StatusCode, Json<HistoricoResponse>)> {
    user.require(Policy::Clinical)?;
    let historico = state.services.historicos.create(body).await?;
    Ok((StatusCode::CREATED, Json(historico)))
}

pub async fn get(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<HistoricoMedicoId>,
) -> ApiResult<Json<HistoricoResponse>> {
    let historico = state.services.historicos.get(id).await?;
    user.require_visible(
        Policy::Clinical,
        Role::Paciente,
        historico.paciente_id.into_inner(),
        "HistoricoMedico",
        id,
    )?;
    Ok(Json(historico))
}

pub async fn update(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<HistoricoMedicoId>,
    ApiJson(body): ApiJson<HistoricoRequest>,
) -> ApiResult<Json<HistoricoResponse>> {
    user.require(Policy::Clinical)?;
    Ok(Json(state.services.historicos.update(id, body).await?))
}

pub async fn delete(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<HistoricoMedicoId>,
) -> ApiResult<StatusCode> {
    user.require(Policy::Clinical)?;
    state.services.historicos.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn by_paciente(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<PacienteId>,
) -> ApiResult<Json<Vec<HistoricoResponse>>> {
    user.require_or_owner(Policy::Clinical, Role::Paciente, id.into_inner())?;
    Ok(Json(state.services.historicos.list_by_paciente(id).await?))
}
