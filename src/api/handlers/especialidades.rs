use crate::api::auth::AuthUser;
use crate::api::error::ApiResult;
use crate::api::extract::{ApiJson, ApiPath};
use crate::api::SharedState;
use crate::core::auth::Policy;
use crate::core::dto::{EspecialidadeRequest, EspecialidadeResponse};
use crate::domain::EspecialidadeId;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn list(
    State(state): State<SharedState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<EspecialidadeResponse>>> {
    user.require(Policy::Authenticated)?;
    Ok(Json(state.services.especialidades.list().await?))
}

pub async fn create(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiJson(body): ApiJson<EspecialidadeRequest>,
) -> ApiResult<(StatusCode, Json<EspecialidadeResponse>)> {
    user.require(Policy::AdminOnly)?;
    let especialidade = state.services.especialidades.create(body).await?;
    Ok((StatusCode::CREATED, Json(especialidade)))
}

pub async fn get(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<EspecialidadeId>,
) -> ApiResult<Json<EspecialidadeResponse>> {
    user.require(Policy::Authenticated)?;
    Ok(Json(state.services.especialidades.get(id).await?))
}

pub async fn delete(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<EspecialidadeId>,
) -> ApiResult<StatusCode> {
    user.require(Policy::AdminOnly)?;
    state.services.especialidades.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
