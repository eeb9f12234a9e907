//! Instituicao domain model

use super::obrigatorio;
use crate::domain::errors::DomainError;
use crate::domain::ids::{InstituicaoId, MedicoId};
use crate::domain::value_objects::{Cnpj, Email, Endereco};
use serde::Serialize;
use std::collections::BTreeSet;

/// Input for creating or fully updating an [`Instituicao`]
#[derive(Debug, Clone)]
pub struct DadosInstituicao {
    pub nome: String,
    pub cnpj: Cnpj,
    pub telefone: String,
    pub email: Email,
    pub endereco: Endereco,
}

/// A healthcare institution (tenant) and the doctors linked to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instituicao {
    id: InstituicaoId,
    nome: String,
    cnpj: Cnpj,
    telefone: String,
    email: Email,
    endereco: Endereco,
    medicos: BTreeSet<MedicoId>,
}

impl Instituicao {
    pub fn new(dados: DadosInstituicao) -> Result<Self, DomainError> {
        let mut instituicao =
            Self::from_parts(InstituicaoId::new(), dados.clone(), BTreeSet::new());
        instituicao.atualizar(dados)?;
        Ok(instituicao)
    }

    /// Rehydrates a persisted institution without validation
    pub fn from_parts(
        id: InstituicaoId,
        dados: DadosInstituicao,
        medicos: BTreeSet<MedicoId>,
    ) -> Self {
        Self {
            id,
            nome: dados.nome,
            cnpj: dados.cnpj,
            telefone: dados.telefone,
            email: dados.email,
            endereco: dados.endereco,
            medicos,
        }
    }

    /// Replaces every registration field; the doctor links are kept
    pub fn atualizar(&mut self, dados: DadosInstituicao) -> Result<(), DomainError> {
        let nome = obrigatorio(&dados.nome, "nome")?;
        let telefone = obrigatorio(&dados.telefone, "telefone")?;
        self.nome = nome;
        self.telefone = telefone;
        self.cnpj = dados.cnpj;
        self.email = dados.email;
        self.endereco = dados.endereco;
        Ok(())
    }

    /// Links a doctor; returns false when already linked
    pub fn vincular_medico(&mut self, medico_id: MedicoId) -> bool {
        self.medicos.insert(medico_id)
    }

    /// Unlinks a doctor; returns false when it was not linked
    pub fn desvincular_medico(&mut self, medico_id: MedicoId) -> bool {
        self.medicos.remove(&medico_id)
    }

    pub fn possui_medico(&self, medico_id: MedicoId) -> bool {
        self.medicos.contains(&medico_id)
    }

    pub fn id(&self) -> InstituicaoId {
        self.id
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn cnpj(&self) -> &Cnpj {
        &self.cnpj
    }

    pub fn telefone(&self) -> &str {
        &self.telefone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn endereco(&self) -> &Endereco {
        &self.endereco
    }

    pub fn medicos(&self) -> &BTreeSet<MedicoId> {
        &self.medicos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Cep, Uf};

    fn dados() -> DadosInstituicao {
        DadosInstituicao {
            nome: "Hospital Central".to_string(),
            cnpj: Cnpj::parse("11.222.333/0001-81").unwrap(),
            telefone: "1133334444".to_string(),
            email: Email::parse("contato@central.org").unwrap(),
            endereco: Endereco::builder()
                .logradouro("Av. Brasil")
                .numero("500")
                .bairro("Jardins")
                .cidade("São Paulo")
                .uf(Uf::SP)
                .cep(Cep::parse("01430-000").unwrap())
                .build()
                .unwrap(),
        }
    }

    #[test]
    fn test_vincular_is_idempotent() {
        let mut instituicao = Instituicao::new(dados()).unwrap();
        let medico = MedicoId::new();
        assert!(instituicao.vincular_medico(medico));
        assert!(!instituicao.vincular_medico(medico));
        assert_eq!(instituicao.medicos().len(), 1);
        assert!(instituicao.possui_medico(medico));

        assert!(instituicao.desvincular_medico(medico));
        assert!(!instituicao.desvincular_medico(medico));
        assert!(instituicao.medicos().is_empty());
    }

    #[test]
    fn test_update_keeps_links() {
        let mut instituicao = Instituicao::new(dados()).unwrap();
        let medico = MedicoId::new();
        instituicao.vincular_medico(medico);

        let mut input = dados();
        input.nome = "Hospital Central Norte".to_string();
        instituicao.atualizar(input).unwrap();
        assert_eq!(instituicao.nome(), "Hospital Central Norte");
        assert!(instituicao.possui_medico(medico));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut input = dados();
        input.nome = String::new();
        assert_eq!(
            Instituicao::new(input).unwrap_err(),
            DomainError::CampoObrigatorio("nome")
        );
    }
}
