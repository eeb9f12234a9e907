//! Instituicao service, including the doctor links

use super::{check_cnpj, conflito, ensure_login_free};
use crate::adapters::database::{
    InstituicaoRepository, MedicoRepository, Repositories, UsuarioRepository,
};
use crate::config::ValidationConfig;
use crate::core::dto::{InstituicaoRequest, InstituicaoResponse, MedicoResponse};
use crate::domain::{ClinidataError, Cnpj, Instituicao, InstituicaoId, MedicoId, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct InstituicaoService {
    instituicoes: Arc<dyn InstituicaoRepository>,
    medicos: Arc<dyn MedicoRepository>,
    usuarios: Arc<dyn UsuarioRepository>,
    validation: ValidationConfig,
}

impl InstituicaoService {
    pub fn new(repos: &Repositories, validation: ValidationConfig) -> Self {
        Self {
            instituicoes: repos.instituicoes.clone(),
            medicos: repos.medicos.clone(),
            usuarios: repos.usuarios.clone(),
            validation,
        }
    }

    async fn load(&self, id: InstituicaoId) -> Result<Instituicao> {
        self.instituicoes
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClinidataError::not_found("Instituicao", id))
    }

    async fn ensure_cnpj_free(&self, cnpj: &Cnpj, owner: Option<InstituicaoId>) -> Result<()> {
        match self.instituicoes.find_by_cnpj(cnpj).await? {
            Some(other) if Some(other.id()) != owner => Err(conflito("CNPJ já cadastrado")),
            _ => Ok(()),
        }
    }

    /// Validates a new institution without storing it
    pub(crate) async fn prepare(&self, request: InstituicaoRequest) -> Result<Instituicao> {
        let dados = request.into_dados()?;
        check_cnpj(&dados.cnpj, &self.validation)?;
        self.ensure_cnpj_free(&dados.cnpj, None).await?;
        Ok(Instituicao::new(dados)?)
    }

    pub async fn create(&self, request: InstituicaoRequest) -> Result<InstituicaoResponse> {
        let instituicao = self.prepare(request).await?;
        self.instituicoes.insert(&instituicao).await?;
        tracing::info!(instituicao_id = %instituicao.id(), "Instituicao created");
        Ok(InstituicaoResponse::from(&instituicao))
    }

    pub async fn get(&self, id: InstituicaoId) -> Result<InstituicaoResponse> {
        Ok(InstituicaoResponse::from(&self.load(id).await?))
    }

    pub async fn list(&self) -> Result<Vec<InstituicaoResponse>> {
        Ok(self
            .instituicoes
            .list()
            .await?
            .iter()
            .map(InstituicaoResponse::from)
            .collect())
    }

    pub async fn update(
        &self,
        id: InstituicaoId,
        request: InstituicaoRequest,
    ) -> Result<InstituicaoResponse> {
        let mut instituicao = self.load(id).await?;
        let dados = request.into_dados()?;
        check_cnpj(&dados.cnpj, &self.validation)?;
        if &dados.cnpj != instituicao.cnpj() {
            self.ensure_cnpj_free(&dados.cnpj, Some(id)).await?;
        }
        if &dados.email != instituicao.email() {
            ensure_login_free(self.usuarios.as_ref(), &dados.email, id.into_inner()).await?;
        }

        instituicao.atualizar(dados)?;
        if !self.instituicoes.update(&instituicao).await? {
            return Err(ClinidataError::not_found("Instituicao", id));
        }
        tracing::info!(instituicao_id = %id, "Instituicao updated");
        Ok(InstituicaoResponse::from(&instituicao))
    }

    /// Removes the institution and its login; its appointments keep no
    /// institution
    pub async fn delete(&self, id: InstituicaoId) -> Result<()> {
        if !self.instituicoes.delete(id).await? {
            return Err(ClinidataError::not_found("Instituicao", id));
        }
        tracing::info!(instituicao_id = %id, "Instituicao deleted");
        Ok(())
    }

    /// Links a doctor; linking twice is a no-op
    pub async fn vincular_medico(
        &self,
        id: InstituicaoId,
        medico_id: MedicoId,
    ) -> Result<InstituicaoResponse> {
        let mut instituicao = self.load(id).await?;
        if self.medicos.find_by_id(medico_id).await?.is_none() {
            return Err(ClinidataError::not_found("Medico", medico_id));
        }

        if self.instituicoes.vincular_medico(id, medico_id).await? {
            tracing::info!(instituicao_id = %id, medico_id = %medico_id, "Medico linked");
        }
        instituicao.vincular_medico(medico_id);
        Ok(InstituicaoResponse::from(&instituicao))
    }

    pub async fn desvincular_medico(
        &self,
        id: InstituicaoId,
        medico_id: MedicoId,
    ) -> Result<InstituicaoResponse> {
        let mut instituicao = self.load(id).await?;
        if !self.instituicoes.desvincular_medico(id, medico_id).await? {
            return Err(ClinidataError::not_found(
                "Vínculo",
                format!("{id}/{medico_id}"),
            ));
        }
        instituicao.desvincular_medico(medico_id);
        tracing::info!(instituicao_id = %id, medico_id = %medico_id, "Medico unlinked");
        Ok(InstituicaoResponse::from(&instituicao))
    }

    pub async fn list_medicos(&self, id: InstituicaoId) -> Result<Vec<MedicoResponse>> {
        let instituicao = self.load(id).await?;
        let ids: Vec<MedicoId> = instituicao.medicos().iter().copied().collect();
        Ok(self
            .medicos
            .list_by_ids(&ids)
            .await?
            .iter()
            .map(MedicoResponse::from)
            .collect())
    }
}
