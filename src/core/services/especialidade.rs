//! Especialidade service

use super::conflito;
use crate::adapters::database::{EspecialidadeRepository, Repositories};
use crate::core::dto::{EspecialidadeRequest, EspecialidadeResponse};
use crate::domain::{ClinidataError, Especialidade, EspecialidadeId, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct EspecialidadeService {
    especialidades: Arc<dyn EspecialidadeRepository>,
}

impl EspecialidadeService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            especialidades: repos.especialidades.clone(),
        }
    }

    pub async fn create(&self, request: EspecialidadeRequest) -> Result<EspecialidadeResponse> {
        let especialidade = Especialidade::new(&request.nome)?;
        if self
            .especialidades
            .find_by_nome(especialidade.nome())
            .await?
            .is_some()
        {
            return Err(conflito("especialidade já cadastrada"));
        }
        self.especialidades.insert(&especialidade).await?;
        tracing::info!(
            especialidade_id = %especialidade.id(),
            nome = especialidade.nome(),
            "Especialidade created"
        );
        Ok(EspecialidadeResponse::from(&especialidade))
    }

    pub async fn get(&self, id: EspecialidadeId) -> Result<EspecialidadeResponse> {
        self.especialidades
            .find_by_id(id)
            .await?
            .map(|e| EspecialidadeResponse::from(&e))
            .ok_or_else(|| ClinidataError::not_found("Especialidade", id))
    }

    pub async fn list(&self) -> Result<Vec<EspecialidadeResponse>> {
        Ok(self
            .especialidades
            .list()
            .await?
            .iter()
            .map(EspecialidadeResponse::from)
            .collect())
    }

    pub async fn delete(&self, id: EspecialidadeId) -> Result<()> {
        if !self.especialidades.delete(id).await? {
            return Err(ClinidataError::not_found("Especialidade", id));
        }
        tracing::info!(especialidade_id = %id, "Especialidade deleted");
        Ok(())
    }
}
