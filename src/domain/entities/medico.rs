//! Medico domain model

use super::obrigatorio;
use crate::domain::errors::DomainError;
use crate::domain::ids::{EspecialidadeId, MedicoId};
use crate::domain::value_objects::{Crm, Email};
use serde::Serialize;

/// Input for creating or fully updating a [`Medico`]
#[derive(Debug, Clone)]
pub struct DadosMedico {
    pub nome: String,
    pub crm: Crm,
    pub especialidade_id: EspecialidadeId,
    pub telefone: String,
    pub email: Email,
}

/// A doctor, identified by a unique CRM and e-mail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Medico {
    id: MedicoId,
    nome: String,
    crm: Crm,
    especialidade_id: EspecialidadeId,
    telefone: String,
    email: Email,
}

impl Medico {
    pub fn new(dados: DadosMedico) -> Result<Self, DomainError> {
        let mut medico = Self::from_parts(MedicoId::new(), dados.clone());
        medico.atualizar(dados)?;
        Ok(medico)
    }

    /// Rehydrates a persisted doctor without validation
    pub fn from_parts(id: MedicoId, dados: DadosMedico) -> Self {
        Self {
            id,
            nome: dados.nome,
            crm: dados.crm,
            especialidade_id: dados.especialidade_id,
            telefone: dados.telefone,
            email: dados.email,
        }
    }

    /// Replaces every field but the id
    pub fn atualizar(&mut self, dados: DadosMedico) -> Result<(), DomainError> {
        let nome = obrigatorio(&dados.nome, "nome")?;
        let telefone = obrigatorio(&dados.telefone, "telefone")?;
        *self = Self {
            id: self.id,
            nome,
            crm: dados.crm,
            especialidade_id: dados.especialidade_id,
            telefone,
            email: dados.email,
        };
        Ok(())
    }

    pub fn id(&self) -> MedicoId {
        self.id
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn crm(&self) -> &Crm {
        &self.crm
    }

    pub fn especialidade_id(&self) -> EspecialidadeId {
        self.especialidade_id
    }

    pub fn telefone(&self) -> &str {
        &self.telefone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }
}
