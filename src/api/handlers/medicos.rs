//! `/api/Medicos` handlers

use crate::api::auth::AuthUser;
use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::SharedState;
use crate::core::auth::Policy;
use crate::core::dto::{MedicoRequest, MedicoResponse};
use crate::domain::{EspecialidadeId, MedicoId, Role};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn list(
    State(state): State<SharedState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<MedicoResponse>>> {
    user.require(Policy::Authenticated)?;
    Ok(Json(state.services.medicos.list().await?))
}

pub async fn create(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiJson(body): ApiJson<MedicoRequest>,
) -> ApiResult<(StatusCode, Json<MedicoResponse>)> {
    user.require(Policy::InstitutionStaff)?;
    let medico = state.services.medicos.create(body).await?;
    Ok((StatusCode::CREATED, Json(medico)))
}

pub async fn get(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<MedicoId>,
) -> ApiResult<Json<MedicoResponse>> {
    user.require(Policy::Authenticated)?;
    Ok(Json(state.services.medicos.get(id).await?))
}

/// Staff, or the doctor editing their own record
pub async fn update(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<MedicoId>,
    ApiJson(body): ApiJson<MedicoRequest>,
) -> ApiResult<Json<MedicoResponse>> {
    user.require_or_owner(Policy::InstitutionStaff, Role::Medico, id.into_inner())?;
    Ok(Json(state.services.medicos.update(id, body).await?))
}

pub async fn delete(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<MedicoId>,
) -> ApiResult<StatusCode> {
    user.require(Policy::InstitutionStaff)?;
    state.services.medicos.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn by_especialidade(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<EspecialidadeId>,
) -> ApiResult<Json<Vec<MedicoResponse>>> {
    user.require(Policy::Authenticated)?;
    Ok(Json(state.services.medicos.list_by_especialidade(id).await?))
}
