//! `/api/Exames` handlers

use crate::api::auth::AuthUser;
use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::SharedState;
use crate::core::auth::Policy;
use crate::core::dto::{ExameRequest, ExameResponse};
use crate::domain::{ExameId, PacienteId, Role};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn create(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiJson(body): ApiJson<ExameRequest>,
) -> ApiResult<(StatusCode, Json<ExameResponse>)> {
    user.require(Policy::Clinical)?;
    let exame = state.services.exames.create(body).await?;
    Ok((StatusCode::CREATED, Json(exame)))
}

pub async fn get(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<ExameId>,
) -> ApiResult<Json<ExameResponse>> {
    let exame = state.services.exames.get(id).await?;
    user.require_visible(
        Policy::Clinical,
        Role::Paciente,
        exame.paciente_id.into_inner(),
        "Exame",
        id,
    )?;
    Ok(Json(exame))
}

pub async fn update(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<ExameId>,
    ApiJson(body): ApiJson<ExameRequest>,
) -> ApiResult<Json<ExameResponse>> {
    user.require(Policy::Clinical)?;
    Ok(Json(state.services.exames.update(id, body).await?))
}

pub async fn delete(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<ExameId>,
) -> ApiResult<StatusCode> {
    user.require(Policy::Clinical)?;
    state.services.exames.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn by_paciente(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<PacienteId>,
) -> ApiResult<Json<Vec<ExameResponse>>> {
    user.require_or_owner(Policy::Clinical, Role::Paciente, id.into_inner())?;
    Ok(Json(state.services.exames.list_by_paciente(id).await?))
}
