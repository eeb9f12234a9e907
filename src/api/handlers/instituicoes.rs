//! `/api/Instituicoes` and `/api/MedicoInstituicao` handlers
//!
//! An institution account manages its own registration and doctor links.

use crate::api::auth::AuthUser;
use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::SharedState;
use crate::core::auth::Policy;
use crate::core::dto::{InstituicaoRequest, InstituicaoResponse, MedicoResponse};
use crate::domain::{InstituicaoId, MedicoId, Role};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn list(
    State(state): State<SharedState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<InstituicaoResponse>>> {
    user.require(Policy::Authenticated)?;
    Ok(Json(state.services.instituicoes.list().await?))
}

pub async fn create(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiJson(body): ApiJson<InstituicaoRequest>,
) -> ApiResult<(StatusCode, Json<InstituicaoResponse>)> {
    user.require(Policy::AdminOnly)?;
    let instituicao = state.services.instituicoes.create(body).await?;
    Ok((StatusCode::CREATED, Json(instituicao)))
}

pub async fn get(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<InstituicaoId>,
) -> ApiResult<Json<InstituicaoResponse>> {
    user.require(Policy::Authenticated)?;
    Ok(Json(state.services.instituicoes.get(id).await?))
}

pub async fn update(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<InstituicaoId>,
    ApiJson(body): ApiJson<InstituicaoRequest>,
) -> ApiResult<Json<InstituicaoResponse>> {
    user.require_or_owner(Policy::AdminOnly, Role::Instituicao, id.into_inner())?;
    Ok(Json(state.services.instituicoes.update(id, body).await?))
}

pub async fn delete(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<InstituicaoId>,
) -> ApiResult<StatusCode> {
    user.require(Policy::AdminOnly)?;
    state.services.instituicoes.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_medicos(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<InstituicaoId>,
) -> ApiResult<Json<Vec<MedicoResponse>>> {
    user.require(Policy::Authenticated)?;
    Ok(Json(state.services.instituicoes.list_medicos(id).await?))
}

pub async fn vincular_medico(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath((id, medico_id)): ApiPath<(InstituicaoId, MedicoId)>,
) -> ApiResult<Json<InstituicaoResponse>> {
    user.require_or_owner(Policy::AdminOnly, Role::Instituicao, id.into_inner())?;
    Ok(Json(
        state.services.instituicoes.vincular_medico(id, medico_id).await?,
    ))
}

pub async fn desvincular_medico(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath((id, medico_id)): ApiPath<(InstituicaoId, MedicoId)>,
) -> ApiResult<StatusCode> {
    user.require_or_owner(Policy::AdminOnly, Role::Instituicao, id.into_inner())?;
    state
        .services
        .instituicoes
        .desvincular_medico(id, medico_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
