//! Application services
//!
//! One service per aggregate. Services own the cross-entity rules the
//! entities cannot see on their own: uniqueness of documents and e-mails,
//! existence of referenced records, and removal of the login account that
//! belongs to a deleted record. They return response DTOs, never entities.

pub mod clinico;
pub mod especialidade;
pub mod instituicao;
pub mod medico;
pub mod paciente;

pub use clinico::{ConsultaService, ExameService, HistoricoMedicoService};
pub use especialidade::EspecialidadeService;
pub use instituicao::InstituicaoService;
pub use medico::MedicoService;
pub use paciente::PacienteService;

use crate::adapters::database::{Repositories, UsuarioRepository};
use crate::config::{ClinidataConfig, ValidationConfig};
use crate::core::auth::{AuthService, TokenIssuer};
use crate::domain::{ClinidataError, Cnpj, Cpf, DomainError, Email, Result};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

/// Every service the HTTP layer needs
#[derive(Clone)]
pub struct Services {
    pub pacientes: PacienteService,
    pub medicos: MedicoService,
    pub especialidades: EspecialidadeService,
    pub instituicoes: InstituicaoService,
    pub consultas: ConsultaService,
    pub exames: ExameService,
    pub historicos: HistoricoMedicoService,
    pub auth: AuthService,
}

impl Services {
    pub fn new(repos: &Repositories, config: &ClinidataConfig) -> Self {
        let validation = config.validation.clone();
        Self {
            pacientes: PacienteService::new(repos, validation.clone()),
            medicos: MedicoService::new(repos),
            especialidades: EspecialidadeService::new(repos),
            instituicoes: InstituicaoService::new(repos, validation.clone()),
            consultas: ConsultaService::new(repos),
            exames: ExameService::new(repos),
            historicos: HistoricoMedicoService::new(repos),
            auth: AuthService::new(repos, TokenIssuer::new(&config.auth), validation),
        }
    }
}

/// Reference date for age rules
pub(crate) fn hoje() -> NaiveDate {
    Utc::now().date_naive()
}

pub(crate) fn conflito(message: &str) -> ClinidataError {
    ClinidataError::Conflict(message.to_string())
}

/// Rejects an e-mail another account already logs in with
pub(crate) async fn ensure_login_free(
    usuarios: &dyn UsuarioRepository,
    email: &Email,
    owner: Uuid,
) -> Result<()> {
    match usuarios.find_by_email(email).await? {
        Some(conta) if conta.entity_id != Some(owner) => Err(conflito("e-mail já cadastrado")),
        _ => Ok(()),
    }
}

pub(crate) fn check_cpf(cpf: &Cpf, validation: &ValidationConfig) -> Result<()> {
    if validation.enforce_check_digits && !cpf.has_valid_check_digits() {
        return Err(DomainError::DigitosVerificadores("CPF").into());
    }
    Ok(())
}

pub(crate) fn check_cnpj(cnpj: &Cnpj, validation: &ValidationConfig) -> Result<()> {
    if validation.enforce_check_digits && !cnpj.has_valid_check_digits() {
        return Err(DomainError::DigitosVerificadores("CNPJ").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_digits_switch() {
        let cpf = Cpf::parse("123.456.789-00").unwrap();
        assert!(!cpf.has_valid_check_digits());

        let lenient = ValidationConfig::default();
        assert!(check_cpf(&cpf, &lenient).is_ok());

        let strict = ValidationConfig {
            enforce_check_digits: true,
        };
        assert!(matches!(
            check_cpf(&cpf, &strict),
            Err(ClinidataError::Domain(DomainError::DigitosVerificadores("CPF")))
        ));
        assert!(check_cpf(&Cpf::parse("529.982.247-25").unwrap(), &strict).is_ok());
        assert!(check_cnpj(&Cnpj::parse("11.222.333/0001-81").unwrap(), &strict).is_ok());
    }
}
