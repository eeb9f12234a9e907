//! Paciente bodies

use super::{EnderecoRequest, EnderecoResponse};
use crate::domain::{Cpf, DadosPaciente, DomainError, Email, Paciente, PacienteId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacienteRequest {
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub sexo: String,
    pub cpf: String,
    pub telefone: String,
    pub email: String,
    pub endereco: EnderecoRequest,
    #[serde(default)]
    pub nome_responsavel: Option<String>,
}

impl PacienteRequest {
    pub fn into_dados(self) -> Result<DadosPaciente, DomainError> {
        Ok(DadosPaciente {
            nome: self.nome,
            data_nascimento: self.data_nascimento,
            sexo: self.sexo.parse()?,
            cpf: Cpf::parse(&self.cpf)?,
            telefone: self.telefone,
            email: Email::parse(&self.email)?,
            endereco: self.endereco.into_endereco()?,
            nome_responsavel: self.nome_responsavel,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacienteResponse {
    pub id: PacienteId,
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub idade: u32,
    pub sexo: String,
    pub cpf: String,
    pub telefone: String,
    pub email: String,
    pub endereco: EnderecoResponse,
    pub nome_responsavel: Option<String>,
}

impl PacienteResponse {
    /// Renders a patient, computing the age at `hoje`
    pub fn from_entity(p: &Paciente, hoje: NaiveDate) -> Self {
        Self {
            id: p.id(),
            nome: p.nome().to_string(),
            data_nascimento: p.data_nascimento(),
            idade: p.idade_em(hoje),
            sexo: p.sexo().as_str().to_string(),
            cpf: p.cpf().formatted(),
            telefone: p.telefone().to_string(),
            email: p.email().as_str().to_string(),
            endereco: EnderecoResponse::from(p.endereco()),
            nome_responsavel: p.nome_responsavel().map(str::to_string),
        }
    }
}
