//! Request builders and an in-memory service stack for unit tests

use super::dto::{EnderecoRequest, InstituicaoRequest, MedicoRequest, PacienteRequest};
use crate::adapters::database::Repositories;
use crate::adapters::memory::MemoryStore;
use crate::config::ClinidataConfig;
use crate::domain::EspecialidadeId;
use chrono::NaiveDate;
use std::sync::Arc;

pub const JWT_SECRET: &str = "0123456789abcdef0123456789abcdef";

pub fn config() -> ClinidataConfig {
    toml::from_str(&format!(
        r#"
database_target = "memory"

[auth]
jwt_secret = "{JWT_SECRET}"
issuer = "clinidata-test"
"#
    ))
    .unwrap()
}

pub fn repos() -> Repositories {
    Repositories::from_backend(Arc::new(MemoryStore::new()))
}

pub fn endereco() -> EnderecoRequest {
    EnderecoRequest {
        logradouro: "Av. Paulista".to_string(),
        numero: "1000".to_string(),
        complemento: None,
        bairro: "Bela Vista".to_string(),
        cidade: "São Paulo".to_string(),
        uf: "sp".to_string(),
        cep: "01310-100".to_string(),
    }
}

pub fn paciente(nome: &str, cpf: &str) -> PacienteRequest {
    PacienteRequest {
        nome: nome.to_string(),
        data_nascimento: NaiveDate::from_ymd_opt(1980, 1, 20).unwrap(),
        sexo: "F".to_string(),
        cpf: cpf.to_string(),
        telefone: "11 98888-7777".to_string(),
        email: format!("{}@pacientes.com", nome.to_lowercase()),
        endereco: endereco(),
        nome_responsavel: None,
    }
}

pub fn medico(nome: &str, crm: &str, especialidade_id: EspecialidadeId) -> MedicoRequest {
    MedicoRequest {
        nome: nome.to_string(),
        crm: crm.to_string(),
        especialidade_id,
        telefone: "11 3333-4444".to_string(),
        email: format!("{}@medicos.com", nome.to_lowercase()),
    }
}

pub fn instituicao(nome: &str, cnpj: &str) -> InstituicaoRequest {
    InstituicaoRequest {
        nome: nome.to_string(),
        cnpj: cnpj.to_string(),
        telefone: "11 2222-0000".to_string(),
        email: format!("contato@{}.com", nome.to_lowercase()),
        endereco: endereco(),
    }
}
