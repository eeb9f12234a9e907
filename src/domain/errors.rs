//! Domain error types
//!
//! This module defines the error hierarchy for CliniData. Validation failures of
//! value objects and entity invariants are [`DomainError`]s; everything the
//! service and adapter layers can fail with is a [`ClinidataError`].
//! Neither type exposes third-party error types.

use std::fmt;
use thiserror::Error;

/// Validation failures raised by value objects and entities
///
/// Messages are user-facing (pt-BR). Each variant also carries a stable
/// machine-readable code, see [`DomainError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// CPF did not normalize into 11 non-repeating digits
    #[error("CPF inválido: {0}")]
    InvalidCpf(String),

    /// CNPJ did not normalize into 14 non-repeating digits
    #[error("CNPJ inválido: {0}")]
    InvalidCnpj(String),

    /// CRM did not match `NUMBER[/ -]UF`
    #[error("CRM inválido: {0}")]
    InvalidCrm(String),

    /// Unknown federative unit abbreviation
    #[error("UF inválida: {0}")]
    InvalidUf(String),

    /// E-mail failed the regex or the structural parse
    #[error("E-mail inválido: {0}")]
    InvalidEmail(String),

    /// CEP did not contain exactly 8 digits
    #[error("CEP inválido: {0}")]
    InvalidCep(String),

    /// A required field was missing or blank
    #[error("Campo obrigatório não informado: {0}")]
    CampoObrigatorio(&'static str),

    /// Under-age patient without a legal guardian
    #[error("Paciente menor de idade ({idade} anos) deve ter um responsável informado")]
    ResponsavelObrigatorio { idade: u32 },

    /// Birth date after the reference date
    #[error("Data de nascimento não pode estar no futuro")]
    DataNascimentoFutura,

    /// Password shorter than the minimum length
    #[error("Senha deve ter pelo menos {min} caracteres")]
    SenhaFraca { min: usize },

    /// Check digits did not verify (only when enforcement is enabled)
    #[error("Dígitos verificadores inválidos para {0}")]
    DigitosVerificadores(&'static str),

    /// A value could not be interpreted for the given field
    #[error("Valor inválido para {campo}: {valor}")]
    ValorInvalido { campo: &'static str, valor: String },
}

impl DomainError {
    /// Stable snake_case code returned to API clients
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidCpf(_) => "invalid_cpf",
            DomainError::InvalidCnpj(_) => "invalid_cnpj",
            DomainError::InvalidCrm(_) => "invalid_crm",
            DomainError::InvalidUf(_) => "invalid_uf",
            DomainError::InvalidEmail(_) => "invalid_email",
            DomainError::InvalidCep(_) => "invalid_cep",
            DomainError::CampoObrigatorio(_) => "required_field",
            DomainError::ResponsavelObrigatorio { .. } => "guardian_required",
            DomainError::DataNascimentoFutura => "birth_date_in_future",
            DomainError::SenhaFraca { .. } => "weak_password",
            DomainError::DigitosVerificadores(_) => "invalid_check_digits",
            DomainError::ValorInvalido { .. } => "invalid_value",
        }
    }
}

/// Main CliniData error type
///
/// This is the primary error type used by services, repositories and the API.
#[derive(Debug, Error)]
pub enum ClinidataError {
    /// Validation errors from the domain layer
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A referenced resource does not exist
    #[error("{recurso} não encontrado(a): {id}")]
    NotFound { recurso: &'static str, id: String },

    /// Uniqueness or referential conflict
    #[error("Conflito: {0}")]
    Conflict(String),

    /// Missing, malformed or expired credentials
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Authenticated but not allowed
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ClinidataError {
    /// Builds a not-found error for the given resource label and id
    pub fn not_found(recurso: &'static str, id: impl fmt::Display) -> Self {
        ClinidataError::NotFound {
            recurso,
            id: id.to_string(),
        }
    }

    /// Stable snake_case code returned to API clients
    pub fn code(&self) -> &'static str {
        match self {
            ClinidataError::Domain(e) => e.code(),
            ClinidataError::NotFound { .. } => "not_found",
            ClinidataError::Conflict(_) => "conflict",
            ClinidataError::Authentication(_) => "unauthorized",
            ClinidataError::Authorization(_) => "forbidden",
            ClinidataError::Database(_) => "database_error",
            ClinidataError::Configuration(_) => "configuration_error",
            ClinidataError::Serialization(_) => "serialization_error",
            ClinidataError::Io(_) => "io_error",
            ClinidataError::Other(_) => "internal_error",
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ClinidataError {
    fn from(err: std::io::Error) -> Self {
        ClinidataError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ClinidataError {
    fn from(err: serde_json::Error) -> Self {
        ClinidataError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ClinidataError {
    fn from(err: toml::de::Error) -> Self {
        ClinidataError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display() {
        let err = DomainError::InvalidCpf("deve conter 11 dígitos".to_string());
        assert_eq!(err.to_string(), "CPF inválido: deve conter 11 dígitos");
    }

    #[test]
    fn test_domain_error_converts_transparently() {
        let err: ClinidataError = DomainError::CampoObrigatorio("nome").into();
        assert!(matches!(err, ClinidataError::Domain(_)));
        assert_eq!(err.to_string(), "Campo obrigatório não informado: nome");
        assert_eq!(err.code(), "required_field");
    }

    #[test]
    fn test_not_found_helper() {
        let err = ClinidataError::not_found("Paciente", 42);
        assert_eq!(err.to_string(), "Paciente não encontrado(a): 42");
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn test_guardian_error_mentions_age() {
        let err = DomainError::ResponsavelObrigatorio { idade: 12 };
        assert!(err.to_string().contains("12 anos"));
        assert_eq!(err.code(), "guardian_required");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: ClinidataError = io_err.into();
        assert!(matches!(err, ClinidataError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ClinidataError = json_err.into();
        assert!(matches!(err, ClinidataError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: ClinidataError = toml_err.into();
        assert!(matches!(err, ClinidataError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_clinidata_error_implements_std_error() {
        let err = ClinidataError::Conflict("CPF já cadastrado".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
