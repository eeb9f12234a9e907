//! Especialidade domain model

use super::obrigatorio;
use crate::domain::errors::DomainError;
use crate::domain::ids::EspecialidadeId;
use serde::Serialize;

/// Medical specialty; names are unique ignoring case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Especialidade {
    id: EspecialidadeId,
    nome: String,
}

impl Especialidade {
    pub fn new(nome: &str) -> Result<Self, DomainError> {
        Ok(Self {
            id: EspecialidadeId::new(),
            nome: obrigatorio(nome, "nome")?,
        })
    }

    pub fn from_parts(id: EspecialidadeId, nome: String) -> Self {
        Self { id, nome }
    }

    pub fn id(&self) -> EspecialidadeId {
        self.id
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    /// Lower-cased name used for uniqueness comparisons
    pub fn chave(&self) -> String {
        chave_nome(&self.nome)
    }
}

pub fn chave_nome(nome: &str) -> String {
    nome.trim().to_lowercase()
}
