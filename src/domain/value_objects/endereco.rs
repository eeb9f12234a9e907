//! Postal address value object

use super::cep::Cep;
use super::uf::Uf;
use crate::domain::errors::DomainError;
use serde::Serialize;

/// Postal address
///
/// Street, number, neighborhood and city are required and stored trimmed.
/// Construct it through [`Endereco::builder`].
///
/// # Examples
///
/// ```
/// use clinidata::domain::value_objects::{Cep, Endereco, Uf};
///
/// let endereco = Endereco::builder()
///     .logradouro("Av. Paulista")
///     .numero("1000")
///     .bairro("Bela Vista")
///     .cidade("São Paulo")
///     .uf(Uf::SP)
///     .cep(Cep::parse("01310-100").unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(endereco.cep().formatted(), "01310-100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endereco {
    logradouro: String,
    numero: String,
    complemento: Option<String>,
    bairro: String,
    cidade: String,
    uf: Uf,
    cep: Cep,
}

impl Endereco {
    /// Returns a builder for constructing an address
    pub fn builder() -> EnderecoBuilder {
        EnderecoBuilder::default()
    }

    pub fn logradouro(&self) -> &str {
        &self.logradouro
    }

    pub fn numero(&self) -> &str {
        &self.numero
    }

    pub fn complemento(&self) -> Option<&str> {
        self.complemento.as_deref()
    }

    pub fn bairro(&self) -> &str {
        &self.bairro
    }

    pub fn cidade(&self) -> &str {
        &self.cidade
    }

    pub fn uf(&self) -> Uf {
        self.uf
    }

    pub fn cep(&self) -> &Cep {
        &self.cep
    }
}

/// Builder for [`Endereco`]
#[derive(Debug, Default)]
pub struct EnderecoBuilder {
    logradouro: Option<String>,
    numero: Option<String>,
    complemento: Option<String>,
    bairro: Option<String>,
    cidade: Option<String>,
    uf: Option<Uf>,
    cep: Option<Cep>,
}

impl EnderecoBuilder {
    pub fn logradouro(mut self, value: impl Into<String>) -> Self {
        self.logradouro = Some(value.into());
        self
    }

    pub fn numero(mut self, value: impl Into<String>) -> Self {
        self.numero = Some(value.into());
        self
    }

    pub fn complemento(mut self, value: Option<String>) -> Self {
        self.complemento = value;
        self
    }

    pub fn bairro(mut self, value: impl Into<String>) -> Self {
        self.bairro = Some(value.into());
        self
    }

    pub fn cidade(mut self, value: impl Into<String>) -> Self {
        self.cidade = Some(value.into());
        self
    }

    pub fn uf(mut self, uf: Uf) -> Self {
        self.uf = Some(uf);
        self
    }

    pub fn cep(mut self, cep: Cep) -> Self {
        self.cep = Some(cep);
        self
    }

    /// Builds the address
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CampoObrigatorio`] naming the first missing or
    /// blank field.
    pub fn build(self) -> Result<Endereco, DomainError> {
        Ok(Endereco {
            logradouro: required(self.logradouro, "logradouro")?,
            numero: required(self.numero, "numero")?,
            complemento: self
                .complemento
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            bairro: required(self.bairro, "bairro")?,
            cidade: required(self.cidade, "cidade")?,
            uf: self.uf.ok_or(DomainError::CampoObrigatorio("uf"))?,
            cep: self.cep.ok_or(DomainError::CampoObrigatorio("cep"))?,
        })
    }
}

/// Trims a required text field and rejects it when blank
pub(crate) fn required(value: Option<String>, campo: &'static str) -> Result<String, DomainError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(DomainError::CampoObrigatorio(campo))
}
