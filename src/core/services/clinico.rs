//! Consulta, Exame and HistoricoMedico services
//!
//! Every clinical record points at an existing patient and doctor; optional
//! references (institution, appointment) must exist when given.

use crate::adapters::database::{
    ConsultaRepository, ExameRepository, HistoricoMedicoRepository, InstituicaoRepository,
    MedicoRepository, PacienteRepository, Repositories,
};
use crate::core::dto::{
    ConsultaRequest, ConsultaResponse, ExameRequest, ExameResponse, HistoricoRequest,
    HistoricoResponse,
};
use crate::domain::{
    ClinidataError, Consulta, ConsultaId, DadosConsulta, DadosExame, Exame, ExameId,
    HistoricoMedico, HistoricoMedicoId, MedicoId, PacienteId, Result,
};
use chrono::Utc;
use std::sync::Arc;

/// Existence checks shared by the clinical services
#[derive(Clone)]
struct Referencias {
    pacientes: Arc<dyn PacienteRepository>,
    medicos: Arc<dyn MedicoRepository>,
}

impl Referencias {
    fn new(repos: &Repositories) -> Self {
        Self {
            pacientes: repos.pacientes.clone(),
            medicos: repos.medicos.clone(),
        }
    }

    async fn paciente(&self, id: PacienteId) -> Result<()> {
        match self.pacientes.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(ClinidataError::not_found("Paciente", id)),
        }
    }

    async fn medico(&self, id: MedicoId) -> Result<()> {
        match self.medicos.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(ClinidataError::not_found("Medico", id)),
        }
    }
}

#[derive(Clone)]
pub struct ConsultaService {
    consultas: Arc<dyn ConsultaRepository>,
    instituicoes: Arc<dyn InstituicaoRepository>,
    refs: Referencias,
}

impl ConsultaService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            consultas: repos.consultas.clone(),
            instituicoes: repos.instituicoes.clone(),
            refs: Referencias::new(repos),
        }
    }

    async fn check_refs(&self, dados: &DadosConsulta) -> Result<()> {
        self.refs.paciente(dados.paciente_id).await?;
        self.refs.medico(dados.medico_id).await?;
        if let Some(id) = dados.instituicao_id {
            if self.instituicoes.find_by_id(id).await?.is_none() {
                return Err(ClinidataError::not_found("Instituicao", id));
            }
        }
        Ok(())
    }

    async fn load(&self, id: ConsultaId) -> Result<Consulta> {
        self.consultas
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClinidataError::not_found("Consulta", id))
    }

    pub async fn create(&self, request: ConsultaRequest) -> Result<ConsultaResponse> {
        let dados = DadosConsulta::from(request);
        self.check_refs(&dados).await?;

        let consulta = Consulta::new(dados);
        self.consultas.insert(&consulta).await?;
        tracing::info!(
            consulta_id = %consulta.id(),
            paciente_id = %consulta.paciente_id(),
            medico_id = %consulta.medico_id(),
            "Consulta scheduled"
        );
        Ok(ConsultaResponse::from(&consulta))
    }

    pub async fn get(&self, id: ConsultaId) -> Result<ConsultaResponse> {
        Ok(ConsultaResponse::from(&self.load(id).await?))
    }

    pub async fn list(&self) -> Result<Vec<ConsultaResponse>> {
        Ok(self
            .consultas
            .list()
            .await?
            .iter()
            .map(ConsultaResponse::from)
            .collect())
    }

    pub async fn list_by_paciente(&self, id: PacienteId) -> Result<Vec<ConsultaResponse>> {
        self.refs.paciente(id).await?;
        Ok(self
            .consultas
            .list_by_paciente(id)
            .await?
            .iter()
            .map(ConsultaResponse::from)
            .collect())
    }

    pub async fn list_by_medico(&self, id: MedicoId) -> Result<Vec<ConsultaResponse>> {
        self.refs.medico(id).await?;
        Ok(self
            .consultas
            .list_by_medico(id)
            .await?
            .iter()
            .map(ConsultaResponse::from)
            .collect())
    }

    pub async fn update(
        &self,
        id: ConsultaId,
        request: ConsultaRequest,
    ) -> Result<ConsultaResponse> {
        let mut consulta = self.load(id).await?;
        let dados = DadosConsulta::from(request);
        self.check_refs(&dados).await?;

        consulta.atualizar(dados);
        if !self.consultas.update(&consulta).await? {
            return Err(ClinidataError::not_found("Consulta", id));
        }
        tracing::info!(consulta_id = %id, "Consulta updated");
        Ok(ConsultaResponse::from(&consulta))
    }

    pub async fn delete(&self, id: ConsultaId) -> Result<()> {
        if !self.consultas.delete(id).await? {
            return Err(ClinidataError::not_found("Consulta", id));
        }
        tracing::info!(consulta_id = %id, "Consulta deleted");
        Ok(())
    }
}

#[derive(Clone)]
pub struct ExameService {
    exames: Arc<dyn ExameRepository>,
    consultas: Arc<dyn ConsultaRepository>,
    refs: Referencias,
}

impl ExameService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            exames: repos.exames.clone(),
            consultas: repos.consultas.clone(),
            refs: Referencias::new(repos),
        }
    }

    async fn check_refs(&self, dados: &DadosExame) -> Result<()> {
        self.refs.paciente(dados.paciente_id).await?;
        self.refs.medico(dados.medico_id).await?;
        if let Some(id) = dados.consulta_id {
            if self.consultas.find_by_id(id).await?.is_none() {
                return Err(ClinidataError::not_found("Consulta", id));
            }
        }
        Ok(())
    }

    async fn load(&self, id: ExameId) -> Result<Exame> {
        self.exames
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClinidataError::not_found("Exame", id))
    }

    pub async fn create(&self, request: ExameRequest) -> Result<ExameResponse> {
        let dados = DadosExame::from(request);
        self.check_refs(&dados).await?;

        let exame = Exame::new(dados)?;
        self.exames.insert(&exame).await?;
        tracing::info!(exame_id = %exame.id(), tipo = exame.tipo(), "Exame recorded");
        Ok(ExameResponse::from(&exame))
    }

    pub async fn get(&self, id: ExameId) -> Result<ExameResponse> {
        Ok(ExameResponse::from(&self.load(id).await?))
    }

    pub async fn list_by_paciente(&self, id: PacienteId) -> Result<Vec<ExameResponse>> {
        self.refs.paciente(id).await?;
        Ok(self
            .exames
            .list_by_paciente(id)
            .await?
            .iter()
            .map(ExameResponse::from)
            .collect())
    }

    pub async fn update(&self, id: ExameId, request: ExameRequest) -> Result<ExameResponse> {
        let mut exame = self.load(id).await?;
        let dados = DadosExame::from(request);
        self.check_refs(&dados).await?;

        exame.atualizar(dados)?;
        if !self.exames.update(&exame).await? {
            return Err(ClinidataError::not_found("Exame", id));
        }
        tracing::info!(exame_id = %id, "Exame updated");
        Ok(ExameResponse::from(&exame))
    }

    pub async fn delete(&self, id: ExameId) -> Result<()> {
        if !self.exames.delete(id).await? {
            return Err(ClinidataError::not_found("Exame", id));
        }
        tracing::info!(exame_id = %id, "Exame deleted");
        Ok(())
    }
}

#[derive(Clone)]
pub struct HistoricoMedicoService {
    historicos: Arc<dyn HistoricoMedicoRepository>,
    refs: Referencias,
}

impl HistoricoMedicoService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            historicos: repos.historicos.clone(),
            refs: Referencias::new(repos),
        }
    }

    async fn check_refs(
        &self,
        paciente_id: PacienteId,
        medico_id: Option<MedicoId>,
    ) -> Result<()> {
        self.refs.paciente(paciente_id).await?;
        if let Some(id) = medico_id {
            self.refs.medico(id).await?;
        }
        Ok(())
    }

    async fn load(&self, id: HistoricoMedicoId) -> Result<HistoricoMedico> {
        self.historicos
            .find_by_id(id)
            .await?
            .ok_or_else(|| ClinidataError::not_found("HistoricoMedico", id))
    }

    pub async fn create(&self, request: HistoricoRequest) -> Result<HistoricoResponse> {
        let dados = request.into_dados(Utc::now());
        self.check_refs(dados.paciente_id, dados.medico_id).await?;

        let historico = HistoricoMedico::new(dados)?;
        self.historicos.insert(&historico).await?;
        tracing::info!(
            historico_id = %historico.id(),
            paciente_id = %historico.paciente_id(),
            "HistoricoMedico recorded"
        );
        Ok(HistoricoResponse::from(&historico))
    }

    pub async fn get(&self, id: HistoricoMedicoId) -> Result<HistoricoResponse> {
        Ok(HistoricoResponse::from(&self.load(id).await?))
    }

    pub async fn list_by_paciente(&self, id: PacienteId) -> Result<Vec<HistoricoResponse>> {
        self.refs.paciente(id).await?;
        Ok(self
            .historicos
            .list_by_paciente(id)
            .await?
            .iter()
            .map(HistoricoResponse::from)
            .collect())
    }

    /// Replaces the record; an omitted `data_registro` keeps the stored one
    pub async fn update(
        &self,
        id: HistoricoMedicoId,
        request: HistoricoRequest,
    ) -> Result<HistoricoResponse> {
        let mut historico = self.load(id).await?;
        let dados = request.into_dados(historico.data_registro());
        self.check_refs(dados.paciente_id, dados.medico_id).await?;

        historico.atualizar(dados)?;
        if !self.historicos.update(&historico).await? {
            return Err(ClinidataError::not_found("HistoricoMedico", id));
        }
        tracing::info!(historico_id = %id, "HistoricoMedico updated");
        Ok(HistoricoResponse::from(&historico))
    }

    pub async fn delete(&self, id: HistoricoMedicoId) -> Result<()> {
        if !self.historicos.delete(id).await? {
            return Err(ClinidataError::not_found("HistoricoMedico", id));
        }
        tracing::info!(historico_id = %id, "HistoricoMedico deleted");
        Ok(())
    }
}
