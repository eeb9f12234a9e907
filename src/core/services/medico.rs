//! Medico service

use super::{conflito, ensure_login_free};
use crate::adapters::database::{
    EspecialidadeRepository, MedicoRepository, Repositories, UsuarioRepository,
};
use crate::core::dto::{MedicoRequest, MedicoResponse};
use crate::domain::{ClinidataError, DadosMedico, EspecialidadeId, Medico, MedicoId, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct MedicoService {
    medicos: Arc<dyn MedicoRepository>,
    especialidades: Arc<dyn EspecialidadeRepository>,
    usuarios: Arc<dyn UsuarioRepository>,
}

impl MedicoService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            medicos: repos.medicos.clone(),
            especialidades: repos.especialidades.clone(),
            usuarios: repos.usuarios.clone(),
        }
    }

    async fn load(&self, id: MedicoId) -> Result<Medico> {
        self.medicos
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClinidataError::not_found("Medico", id))
    }

    async fn ensure_especialidade(&self, id: EspecialidadeId) -> Result<()> {
        self.especialidades
            .find_by_id(id)
            .await?
            .map(|_| ())
            .ok_or_else(|| ClinidataError::not_found("Especialidade", id))
    }

    /// Checks CRM and e-mail uniqueness against every other doctor
    pub(crate) async fn ensure_unique(
        &self,
        dados: &DadosMedico,
        owner: Option<MedicoId>,
    ) -> Result<()> {
        if let Some(other) = self.medicos.find_by_crm(&dados.crm).await? {
            if Some(other.id()) != owner {
                return Err(conflito("CRM já cadastrado"));
            }
        }
        if let Some(other) = self.medicos.find_by_email(&dados.email).await? {
            if Some(other.id()) != owner {
                return Err(conflito("e-mail de médico já cadastrado"));
            }
        }
        Ok(())
    }

    /// Validates a new doctor without storing it
    pub(crate) async fn prepare(&self, request: MedicoRequest) -> Result<Medico> {
        let dados = request.into_dados()?;
        self.ensure_especialidade(dados.especialidade_id).await?;
        self.ensure_unique(&dados, None).await?;
        Ok(Medico::new(dados)?)
    }

    pub async fn create(&self, request: MedicoRequest) -> Result<MedicoResponse> {
        let medico = self.prepare(request).await?;
        self.medicos.insert(&medico).await?;
        tracing::info!(medico_id = %medico.id(), crm = %medico.crm(), "Medico created");
        Ok(MedicoResponse::from(&medico))
    }

    pub async fn get(&self, id: MedicoId) -> Result<MedicoResponse> {
        Ok(MedicoResponse::from(&self.load(id).await?))
    }

    pub async fn list(&self) -> Result<Vec<MedicoResponse>> {
        Ok(self
            .medicos
            .list()
            .await?
            .iter()
            .map(MedicoResponse::from)
            .collect())
    }

    pub async fn update(&self, id: MedicoId, request: MedicoRequest) -> Result<MedicoResponse> {
        let mut medico = self.load(id).await?;
        let dados = request.into_dados()?;
        if dados.especialidade_id != medico.especialidade_id() {
            self.ensure_especialidade(dados.especialidade_id).await?;
        }
        self.ensure_unique(&dados, Some(id)).await?;
        if &dados.email != medico.email() {
            ensure_login_free(self.usuarios.as_ref(), &dados.email, id.into_inner()).await?;
        }

        medico.atualizar(dados)?;
        if !self.medicos.update(&medico).await? {
            return Err(ClinidataError::not_found("Medico", id));
        }
        tracing::info!(medico_id = %id, "Medico updated");
        Ok(MedicoResponse::from(&medico))
    }

    /// Removes the doctor and their login; fails with a conflict while
    /// appointments or exams reference the doctor
    pub async fn delete(&self, id: MedicoId) -> Result<()> {
        if !self.medicos.delete(id).await? {
            return Err(ClinidataError::not_found("Medico", id));
        }
        tracing::info!(medico_id = %id, "Medico deleted");
        Ok(())
    }

    pub async fn list_by_especialidade(
        &self,
        id: EspecialidadeId,
    ) -> Result<Vec<MedicoResponse>> {
        self.ensure_especialidade(id).await?;
        Ok(self
            .medicos
            .list_by_especialidade(id)
            .await?
            .iter()
            .map(MedicoResponse::from)
            .collect())
    }
}
