//! Domain entities
//!
//! Entities aggregate value objects and primitives. Constructors validate
//! their input and every mutator re-validates, so an entity held in memory
//! always satisfies its invariants. The `from_parts` constructors rehydrate
//! rows that were validated before they were persisted.

pub mod consulta;
pub mod especialidade;
pub mod exame;
pub mod historico;
pub mod instituicao;
pub mod medico;
pub mod paciente;
pub mod usuario;

pub use consulta::{Consulta, DadosConsulta};
pub use especialidade::Especialidade;
pub use exame::{DadosExame, Exame};
pub use historico::{DadosHistorico, HistoricoMedico};
pub use instituicao::{DadosInstituicao, Instituicao};
pub use medico::{DadosMedico, Medico};
pub use paciente::{DadosPaciente, Paciente, Sexo};
pub use usuario::{Role, Usuario};

use super::errors::DomainError;

/// Trims a required text field and rejects it when blank
pub(crate) fn obrigatorio(value: &str, campo: &'static str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::CampoObrigatorio(campo));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field, mapping blank to `None`
pub(crate) fn opcional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obrigatorio() {
        assert_eq!(obrigatorio("  Ana ", "nome").unwrap(), "Ana");
        assert_eq!(
            obrigatorio(" \t", "nome").unwrap_err(),
            DomainError::CampoObrigatorio("nome")
        );
    }

    #[test]
    fn test_opcional() {
        assert_eq!(opcional(Some(" x ".into())), Some("x".to_string()));
        assert_eq!(opcional(Some("   ".into())), None);
        assert_eq!(opcional(None), None);
    }
}
