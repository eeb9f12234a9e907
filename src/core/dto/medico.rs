//! Medico and Especialidade bodies

use crate::domain::{
    Crm, DadosMedico, DomainError, Email, Especialidade, EspecialidadeId, Medico, MedicoId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicoRequest {
    pub nome: String,
    pub crm: String,
    pub especialidade_id: EspecialidadeId,
    pub telefone: String,
    pub email: String,
}

impl MedicoRequest {
    pub fn into_dados(self) -> Result<DadosMedico, DomainError> {
        Ok(DadosMedico {
            nome: self.nome,
            crm: Crm::parse(&self.crm)?,
            especialidade_id: self.especialidade_id,
            telefone: self.telefone,
            email: Email::parse(&self.email)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicoResponse {
    pub id: MedicoId,
    pub nome: String,
    pub crm: String,
    pub especialidade_id: EspecialidadeId,
    pub telefone: String,
    pub email: String,
}

impl From<&Medico> for MedicoResponse {
    fn from(m: &Medico) -> Self {
        Self {
            id: m.id(),
            nome: m.nome().to_string(),
            crm: m.crm().as_str().to_string(),
            especialidade_id: m.especialidade_id(),
            telefone: m.telefone().to_string(),
            email: m.email().as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EspecialidadeRequest {
    pub nome: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EspecialidadeResponse {
    pub id: EspecialidadeId,
    pub nome: String,
}

impl From<&Especialidade> for EspecialidadeResponse {
    fn from(e: &Especialidade) -> Self {
        Self {
            id: e.id(),
            nome: e.nome().to_string(),
        }
    }
}
