//! Paciente service

use super::{check_cpf, conflito, ensure_login_free, hoje};
use crate::adapters::database::{PacienteRepository, Repositories, UsuarioRepository};
use crate::config::ValidationConfig;
use crate::core::dto::{PacienteRequest, PacienteResponse};
use crate::domain::{ClinidataError, Cpf, Paciente, PacienteId, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct PacienteService {
    pacientes: Arc<dyn PacienteRepository>,
    usuarios: Arc<dyn UsuarioRepository>,
    validation: ValidationConfig,
}

impl PacienteService {
    pub fn new(repos: &Repositories, validation: ValidationConfig) -> Self {
        Self {
            pacientes: repos.pacientes.clone(),
            usuarios: repos.usuarios.clone(),
            validation,
        }
    }

    async fn load(&self, id: PacienteId) -> Result<Paciente> {
        self.pacientes
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClinidataError::not_found("Paciente", id))
    }

    /// Rejects a CPF already held by another patient
    async fn ensure_cpf_free(&self, cpf: &Cpf, owner: Option<PacienteId>) -> Result<()> {
        match self.pacientes.find_by_cpf(cpf).await? {
            Some(other) if Some(other.id()) != owner => Err(conflito("CPF já cadastrado")),
            _ => Ok(()),
        }
    }

    /// Validates a new patient without storing it
    pub(crate) async fn prepare(&self, request: PacienteRequest) -> Result<Paciente> {
        let dados = request.into_dados()?;
        check_cpf(&dados.cpf, &self.validation)?;
        self.ensure_cpf_free(&dados.cpf, None).await?;
        Ok(Paciente::new(dados, hoje())?)
    }

    pub async fn create(&self, request: PacienteRequest) -> Result<PacienteResponse> {
        let paciente = self.prepare(request).await?;
        self.pacientes.insert(&paciente).await?;

        tracing::info!(paciente_id = %paciente.id(), "Paciente created");
        Ok(PacienteResponse::from_entity(&paciente, hoje()))
    }

    pub async fn get(&self, id: PacienteId) -> Result<PacienteResponse> {
        let paciente = self.load(id).await?;
        Ok(PacienteResponse::from_entity(&paciente, hoje()))
    }

    pub async fn list(&self) -> Result<Vec<PacienteResponse>> {
        let hoje = hoje();
        Ok(self
            .pacientes
            .list()
            .await?
            .iter()
            .map(|p| PacienteResponse::from_entity(p, hoje))
            .collect())
    }

    pub async fn update(
        &self,
        id: PacienteId,
        request: PacienteRequest,
    ) -> Result<PacienteResponse> {
        let mut paciente = self.load(id).await?;
        let dados = request.into_dados()?;
        check_cpf(&dados.cpf, &self.validation)?;
        if &dados.cpf != paciente.cpf() {
            self.ensure_cpf_free(&dados.cpf, Some(id)).await?;
        }
        if &dados.email != paciente.email() {
            ensure_login_free(self.usuarios.as_ref(), &dados.email, id.into_inner()).await?;
        }

        let hoje = hoje();
        paciente.atualizar_dados(dados, hoje)?;
        if !self.pacientes.update(&paciente).await? {
            return Err(ClinidataError::not_found("Paciente", id));
        }

        tracing::info!(paciente_id = %id, "Paciente updated");
        Ok(PacienteResponse::from_entity(&paciente, hoje))
    }

    /// Removes the patient, their clinical records and their login account
    pub async fn delete(&self, id: PacienteId) -> Result<()> {
        if !self.pacientes.delete(id).await? {
            return Err(ClinidataError::not_found("Paciente", id));
        }
        tracing::info!(paciente_id = %id, "Paciente deleted");
        Ok(())
    }

    pub async fn find_by_cpf(&self, raw: &str) -> Result<PacienteResponse> {
        let cpf = Cpf::parse(raw)?;
        let paciente = self
            .pacientes
            .find_by_cpf(&cpf)
            .await?
            .ok_or_else(|| ClinidataError::not_found("Paciente", cpf.formatted()))?;
        Ok(PacienteResponse::from_entity(&paciente, hoje()))
    }
}
