//! Domain models and types for CliniData.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Value objects** ([`Cpf`], [`Cnpj`], [`Crm`], [`Email`], [`Cep`], [`Endereco`], [`Uf`])
//! - **Strongly-typed identifiers** ([`PacienteId`], [`MedicoId`], ...)
//! - **Entities** ([`Paciente`], [`Medico`], [`Instituicao`], [`Consulta`], ...)
//! - **Error types** ([`DomainError`], [`ClinidataError`]) and the [`Result`] alias
//!
//! Nothing in this module performs I/O.
//!
//! # Parsing
//!
//! Raw input becomes a value object exactly once, through `parse`:
//!
//! ```rust
//! use clinidata::domain::{Cpf, Crm, Email};
//!
//! # fn example() -> Result<(), clinidata::domain::DomainError> {
//! let cpf = Cpf::parse("529.982.247-25")?;
//! assert_eq!(cpf.as_str(), "52998224725");
//!
//! let crm: Crm = "123456 sp".parse()?;
//! assert_eq!(crm.as_str(), "123456/SP");
//!
//! let email = Email::parse(" Ana@Clinica.COM ")?;
//! assert_eq!(email.as_str(), "ana@clinica.com");
//! # Ok(())
//! # }
//! ```

pub mod entities;
pub mod errors;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod result;
pub mod value_objects;

// Re-export commonly used types for convenience
pub use entities::{
    Consulta, DadosConsulta, DadosExame, DadosHistorico, DadosInstituicao, DadosMedico,
    DadosPaciente, Especialidade, Exame, HistoricoMedico, Instituicao, Medico, Paciente, Role,
    Sexo, Usuario,
};
pub use errors::{ClinidataError, DomainError};
pub use ids::{
    ConsultaId, EspecialidadeId, ExameId, HistoricoMedicoId, InstituicaoId, MedicoId, PacienteId,
    UsuarioId,
};
pub use result::Result;
pub use value_objects::{Cep, Cnpj, Cpf, Crm, Email, Endereco, EnderecoBuilder, Uf};
