//! Repository traits
//!
//! One trait per aggregate. Every storage backend implements all of them;
//! services only ever see `Arc<dyn …Repository>` trait objects.
//!
//! Conventions shared by all implementations:
//! - `insert` maps unique-key collisions to [`ClinidataError::Conflict`]
//! - `update` and `delete` report whether a row was affected
//! - deleting a row still referenced under a RESTRICT rule is a `Conflict`
//! - a Paciente, Medico or Instituicao and its login account change together:
//!   `update` moves the account to the record's e-mail (a clash with another
//!   account is a `Conflict`) and `delete` removes the account, each in one
//!   transaction

use crate::domain::{
    Consulta, ConsultaId, Cnpj, Cpf, Crm, Email, Especialidade, EspecialidadeId, Exame, ExameId,
    HistoricoMedico, HistoricoMedicoId, Instituicao, InstituicaoId, Medico, MedicoId, Paciente,
    PacienteId, Result, Usuario,
};
use async_trait::async_trait;
use std::sync::Arc;

#[cfg(doc)]
use crate::domain::ClinidataError;

/// Storage health check
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Short backend name reported by `/health`
    fn backend(&self) -> &'static str;

    /// Round-trips to the backend
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached.
    async fn test_connection(&self) -> Result<()>;
}

#[async_trait]
pub trait PacienteRepository: Send + Sync {
    async fn insert(&self, paciente: &Paciente) -> Result<()>;
    async fn update(&self, paciente: &Paciente) -> Result<bool>;
    /// Removes the patient together with their appointments, exams, history and login
    async fn delete(&self, id: PacienteId) -> Result<bool>;
    async fn find_by_id(&self, id: PacienteId) -> Result<Option<Paciente>>;
    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Option<Paciente>>;
    async fn list(&self) -> Result<Vec<Paciente>>;
}

#[async_trait]
pub trait MedicoRepository: Send + Sync {
    async fn insert(&self, medico: &Medico) -> Result<()>;
    async fn update(&self, medico: &Medico) -> Result<bool>;
    /// Fails with a conflict while appointments or exams reference the doctor
    ///
    /// Removes the doctor's login with the row.
    async fn delete(&self, id: MedicoId) -> Result<bool>;
    async fn find_by_id(&self, id: MedicoId) -> Result<Option<Medico>>;
    async fn find_by_crm(&self, crm: &Crm) -> Result<Option<Medico>>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<Medico>>;
    async fn list(&self) -> Result<Vec<Medico>>;
    async fn list_by_especialidade(&self, id: EspecialidadeId) -> Result<Vec<Medico>>;
    async fn list_by_ids(&self, ids: &[MedicoId]) -> Result<Vec<Medico>>;
}

#[async_trait]
pub trait EspecialidadeRepository: Send + Sync {
    async fn insert(&self, especialidade: &Especialidade) -> Result<()>;
    /// Fails with a conflict while a doctor references the specialty
    async fn delete(&self, id: EspecialidadeId) -> Result<bool>;
    async fn find_by_id(&self, id: EspecialidadeId) -> Result<Option<Especialidade>>;
    /// Case-insensitive lookup
    async fn find_by_nome(&self, nome: &str) -> Result<Option<Especialidade>>;
    async fn list(&self) -> Result<Vec<Especialidade>>;
}

#[async_trait]
pub trait InstituicaoRepository: Send + Sync {
    async fn insert(&self, instituicao: &Instituicao) -> Result<()>;
    /// Persists the registration fields; doctor links are managed separately
    async fn update(&self, instituicao: &Instituicao) -> Result<bool>;
    /// Removes the institution and its login
    async fn delete(&self, id: InstituicaoId) -> Result<bool>;
    /// Loads the institution with its linked doctor ids
    async fn find_by_id(&self, id: InstituicaoId) -> Result<Option<Instituicao>>;
    async fn find_by_cnpj(&self, cnpj: &Cnpj) -> Result<Option<Instituicao>>;
    async fn list(&self) -> Result<Vec<Instituicao>>;
    /// Returns false when the link already existed
    async fn vincular_medico(&self, id: InstituicaoId, medico_id: MedicoId) -> Result<bool>;
    /// Returns false when there was no link
    async fn desvincular_medico(&self, id: InstituicaoId, medico_id: MedicoId) -> Result<bool>;
}

#[async_trait]
pub trait ConsultaRepository: Send + Sync {
    async fn insert(&self, consulta: &Consulta) -> Result<()>;
    async fn update(&self, consulta: &Consulta) -> Result<bool>;
    async fn delete(&self, id: ConsultaId) -> Result<bool>;
    async fn find_by_id(&self, id: ConsultaId) -> Result<Option<Consulta>>;
    async fn list(&self) -> Result<Vec<Consulta>>;
    async fn list_by_paciente(&self, id: PacienteId) -> Result<Vec<Consulta>>;
    async fn list_by_medico(&self, id: MedicoId) -> Result<Vec<Consulta>>;
}

#[async_trait]
pub trait ExameRepository: Send + Sync {
    async fn insert(&self, exame: &Exame) -> Result<()>;
    async fn update(&self, exame: &Exame) -> Result<bool>;
    async fn delete(&self, id: ExameId) -> Result<bool>;
    async fn find_by_id(&self, id: ExameId) -> Result<Option<Exame>>;
    async fn list_by_paciente(&self, id: PacienteId) -> Result<Vec<Exame>>;
}

#[async_trait]
pub trait HistoricoMedicoRepository: Send + Sync {
    async fn insert(&self, historico: &HistoricoMedico) -> Result<()>;
    async fn update(&self, historico: &HistoricoMedico) -> Result<bool>;
    async fn delete(&self, id: HistoricoMedicoId) -> Result<bool>;
    async fn find_by_id(&self, id: HistoricoMedicoId) -> Result<Option<HistoricoMedico>>;
    async fn list_by_paciente(&self, id: PacienteId) -> Result<Vec<HistoricoMedico>>;
}

/// Entity created together with an account during self-registration
#[derive(Debug, Clone, Copy)]
pub enum NovaConta<'a> {
    Admin,
    Paciente(&'a Paciente),
    Medico(&'a Medico),
    Instituicao(&'a Instituicao),
}

#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    /// Inserts the account and the entity it represents atomically
    async fn register(&self, usuario: &Usuario, conta: NovaConta<'_>) -> Result<()>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<Usuario>>;
}

/// Every repository a running service needs
#[derive(Clone)]
pub struct Repositories {
    pub pacientes: Arc<dyn PacienteRepository>,
    pub medicos: Arc<dyn MedicoRepository>,
    pub especialidades: Arc<dyn EspecialidadeRepository>,
    pub instituicoes: Arc<dyn InstituicaoRepository>,
    pub consultas: Arc<dyn ConsultaRepository>,
    pub exames: Arc<dyn ExameRepository>,
    pub historicos: Arc<dyn HistoricoMedicoRepository>,
    pub usuarios: Arc<dyn UsuarioRepository>,
    pub health: Arc<dyn HealthCheck>,
}

impl Repositories {
    /// Uses one backend value for every repository
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: PacienteRepository
            + MedicoRepository
            + EspecialidadeRepository
            + InstituicaoRepository
            + ConsultaRepository
            + ExameRepository
            + HistoricoMedicoRepository
            + UsuarioRepository
            + HealthCheck
            + 'static,
    {
        Self {
            pacientes: backend.clone(),
            medicos: backend.clone(),
            especialidades: backend.clone(),
            instituicoes: backend.clone(),
            consultas: backend.clone(),
            exames: backend.clone(),
            historicos: backend.clone(),
            usuarios: backend.clone(),
            health: backend,
        }
    }
}
