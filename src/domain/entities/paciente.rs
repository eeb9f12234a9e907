//! Paciente domain model

use super::{obrigatorio, opcional};
use crate::domain::errors::DomainError;
use crate::domain::ids::PacienteId;
use crate::domain::value_objects::{Cpf, Email, Endereco};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Age below which a legal guardian is required
pub const MAIORIDADE: u32 = 18;

/// Biological sex as recorded at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sexo {
    Masculino,
    Feminino,
    Outro,
}

impl Sexo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sexo::Masculino => "Masculino",
            Sexo::Feminino => "Feminino",
            Sexo::Outro => "Outro",
        }
    }
}

impl fmt::Display for Sexo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sexo {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "masculino" | "m" => Ok(Sexo::Masculino),
            "feminino" | "f" => Ok(Sexo::Feminino),
            "outro" | "o" => Ok(Sexo::Outro),
            _ => Err(DomainError::ValorInvalido {
                campo: "sexo",
                valor: s.to_string(),
            }),
        }
    }
}

/// Input for creating or fully updating a [`Paciente`]
#[derive(Debug, Clone)]
pub struct DadosPaciente {
    pub nome: String,
    pub data_nascimento: NaiveDate,
    pub sexo: Sexo,
    pub cpf: Cpf,
    pub telefone: String,
    pub email: Email,
    pub endereco: Endereco,
    pub nome_responsavel: Option<String>,
}

/// A patient
///
/// Invariants, checked against a reference date `hoje`:
/// - the birth date is not after `hoje`
/// - a patient younger than [`MAIORIDADE`] has a non-blank `nome_responsavel`
///
/// Every mutator applies its change to a copy, validates the copy and only
/// then commits it, so a failed mutation leaves the patient untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paciente {
    id: PacienteId,
    nome: String,
    data_nascimento: NaiveDate,
    sexo: Sexo,
    cpf: Cpf,
    telefone: String,
    email: Email,
    endereco: Endereco,
    nome_responsavel: Option<String>,
}

impl Paciente {
    /// Creates a new patient with a fresh id
    pub fn new(dados: DadosPaciente, hoje: NaiveDate) -> Result<Self, DomainError> {
        let paciente = Self::from_parts(PacienteId::new(), dados);
        paciente.normalizado()?.validar(hoje)
    }

    /// Rehydrates a persisted patient without validation
    pub fn from_parts(id: PacienteId, dados: DadosPaciente) -> Self {
        Self {
            id,
            nome: dados.nome,
            data_nascimento: dados.data_nascimento,
            sexo: dados.sexo,
            cpf: dados.cpf,
            telefone: dados.telefone,
            email: dados.email,
            endereco: dados.endereco,
            nome_responsavel: dados.nome_responsavel,
        }
    }

    /// Replaces every field but the id
    pub fn atualizar_dados(
        &mut self,
        dados: DadosPaciente,
        hoje: NaiveDate,
    ) -> Result<(), DomainError> {
        let candidato = Self::from_parts(self.id, dados);
        self.commit(candidato.normalizado()?, hoje)
    }

    pub fn alterar_data_nascimento(
        &mut self,
        data_nascimento: NaiveDate,
        hoje: NaiveDate,
    ) -> Result<(), DomainError> {
        let mut candidato = self.clone();
        candidato.data_nascimento = data_nascimento;
        self.commit(candidato, hoje)
    }

    pub fn alterar_responsavel(
        &mut self,
        nome_responsavel: Option<String>,
        hoje: NaiveDate,
    ) -> Result<(), DomainError> {
        let mut candidato = self.clone();
        candidato.nome_responsavel = opcional(nome_responsavel);
        self.commit(candidato, hoje)
    }

    pub fn alterar_endereco(
        &mut self,
        endereco: Endereco,
        hoje: NaiveDate,
    ) -> Result<(), DomainError> {
        let mut candidato = self.clone();
        candidato.endereco = endereco;
        self.commit(candidato, hoje)
    }

    pub fn alterar_email(&mut self, email: Email, hoje: NaiveDate) -> Result<(), DomainError> {
        let mut candidato = self.clone();
        candidato.email = email;
        self.commit(candidato, hoje)
    }

    pub fn alterar_telefone(&mut self, telefone: &str, hoje: NaiveDate) -> Result<(), DomainError> {
        let mut candidato = self.clone();
        candidato.telefone = obrigatorio(telefone, "telefone")?;
        self.commit(candidato, hoje)
    }

    /// Completed years at `hoje`
    pub fn idade_em(&self, hoje: NaiveDate) -> u32 {
        idade(self.data_nascimento, hoje)
    }

    pub fn menor_de_idade(&self, hoje: NaiveDate) -> bool {
        self.idade_em(hoje) < MAIORIDADE
    }

    pub fn id(&self) -> PacienteId {
        self.id
    }

    pub fn nome(&self) -> &str {
        &self.nome
    }

    pub fn data_nascimento(&self) -> NaiveDate {
        self.data_nascimento
    }

    pub fn sexo(&self) -> Sexo {
        self.sexo
    }

    pub fn cpf(&self) -> &Cpf {
        &self.cpf
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

    pub fn nome_responsavel(&self) -> Option<&str> {
        self.nome_responsavel.as_deref()
    }

    fn normalizado(mut self) -> Result<Self, DomainError> {
        self.nome = obrigatorio(&self.nome, "nome")?;
        self.telefone = obrigatorio(&self.telefone, "telefone")?;
        self.nome_responsavel = opcional(self.nome_responsavel);
        Ok(self)
    }

    fn validar(self, hoje: NaiveDate) -> Result<Self, DomainError> {
        if self.data_nascimento > hoje {
            return Err(DomainError::DataNascimentoFutura);
        }
        if self.menor_de_idade(hoje) && self.nome_responsavel.is_none() {
            return Err(DomainError::ResponsavelObrigatorio {
                idade: self.idade_em(hoje),
            });
        }
        Ok(self)
    }

    fn commit(&mut self, candidato: Self, hoje: NaiveDate) -> Result<(), DomainError> {
        *self = candidato.validar(hoje)?;
        Ok(())
    }
}

/// Completed years between `nascimento` and `hoje`, zero when `hoje` is earlier
pub fn idade(nascimento: NaiveDate, hoje: NaiveDate) -> u32 {
    let mut anos = hoje.year() - nascimento.year();
    if (hoje.month(), hoje.day()) < (nascimento.month(), nascimento.day()) {
        anos -= 1;
    }
    u32::try_from(anos).unwrap_or(0)
}
