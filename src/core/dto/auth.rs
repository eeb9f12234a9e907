//! Authentication bodies

use super::{InstituicaoRequest, MedicoRequest, PacienteRequest};
use crate::domain::Role;
use serde::{Deserialize, Serialize};

/// Self-registration of a patient; the account e-mail is the patient's
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPacienteRequest {
    #[serde(flatten)]
    pub paciente: PacienteRequest,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterMedicoRequest {
    #[serde(flatten)]
    pub medico: MedicoRequest,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInstituicaoRequest {
    #[serde(flatten)]
    pub instituicao: InstituicaoRequest,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub role: Role,
}
