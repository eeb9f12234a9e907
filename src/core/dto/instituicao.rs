//! Instituicao bodies

use super::{EnderecoRequest, EnderecoResponse};
use crate::domain::{
    Cnpj, DadosInstituicao, DomainError, Email, Instituicao, InstituicaoId, MedicoId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstituicaoRequest {
    pub nome: String,
    pub cnpj: String,
    pub telefone: String,
    pub email: String,
    pub endereco: EnderecoRequest,
}

impl InstituicaoRequest {
    pub fn into_dados(self) -> Result<DadosInstituicao, DomainError> {
        Ok(DadosInstituicao {
            nome: self.nome,
            cnpj: Cnpj::parse(&self.cnpj)?,
            telefone: self.telefone,
            email: Email::parse(&self.email)?,
            endereco: self.endereco.into_endereco()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstituicaoResponse {
    pub id: InstituicaoId,
    pub nome: String,
    pub cnpj: String,
    pub telefone: String,
    pub email: String,
    pub endereco: EnderecoResponse,
    pub medicos: Vec<MedicoId>,
}

impl From<&Instituicao> for InstituicaoResponse {
    fn from(i: &Instituicao) -> Self {
        Self {
            id: i.id(),
            nome: i.nome().to_string(),
            cnpj: i.cnpj().formatted(),
            telefone: i.telefone().to_string(),
            email: i.email().as_str().to_string(),
            endereco: EnderecoResponse::from(i.endereco()),
            medicos: i.medicos().iter().copied().collect(),
        }
    }
}
