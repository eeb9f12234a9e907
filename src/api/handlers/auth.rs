//! `/api/Auth` handlers

use crate::api::auth::AuthUser;
use crate::api::error::ApiResult;
use crate::api::extract::ApiJson;
use crate::api::SharedState;
use crate::core::auth::Claims;
use crate::core::dto::{
    LoginRequest, RegisterInstituicaoRequest, RegisterMedicoRequest, RegisterPacienteRequest,
    TokenResponse,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

type Created = (StatusCode, Json<TokenResponse>);

pub async fn register_paciente(
    State(state): State<SharedState>,
    ApiJson(body): ApiJson<RegisterPacienteRequest>,
) -> ApiResult<Created> {
    let token = state.services.auth.register_paciente(body).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

pub async fn register_medico(
    State(state): State<SharedState>,
    ApiJson(body): ApiJson<RegisterMedicoRequest>,
) -> ApiResult<Created> {
    let token = state.services.auth.register_medico(body).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

pub async fn register_instituicao(
    State(state): State<SharedState>,
    ApiJson(body): ApiJson<RegisterInstituicaoRequest>,
) -> ApiResult<Created> {
    let token = state.services.auth.register_instituicao(body).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

pub async fn login(
    State(state): State<SharedState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    Ok(Json(state.services.auth.login(body).await?))
}

pub async fn me(AuthUser(claims): AuthUser) -> Json<Claims> {
    Json(claims)
}
