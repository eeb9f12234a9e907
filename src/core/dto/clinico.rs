//! Consulta, Exame and HistoricoMedico bodies

use crate::domain::{
    Consulta, ConsultaId, DadosConsulta, DadosExame, DadosHistorico, Exame, ExameId,
    HistoricoMedico, HistoricoMedicoId, InstituicaoId, MedicoId, PacienteId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultaRequest {
    pub data_hora: DateTime<Utc>,
    pub paciente_id: PacienteId,
    pub medico_id: MedicoId,
    #[serde(default)]
    pub instituicao_id: Option<InstituicaoId>,
    #[serde(default)]
    pub observacao: Option<String>,
}

impl From<ConsultaRequest> for DadosConsulta {
    fn from(r: ConsultaRequest) -> Self {
        Self {
            data_hora: r.data_hora,
            paciente_id: r.paciente_id,
            medico_id: r.medico_id,
            instituicao_id: r.instituicao_id,
            observacao: r.observacao,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultaResponse {
    pub id: ConsultaId,
    pub data_hora: DateTime<Utc>,
    pub paciente_id: PacienteId,
    pub medico_id: MedicoId,
    pub instituicao_id: Option<InstituicaoId>,
    pub observacao: Option<String>,
}

impl From<&Consulta> for ConsultaResponse {
    fn from(c: &Consulta) -> Self {
        Self {
            id: c.id(),
            data_hora: c.data_hora(),
            paciente_id: c.paciente_id(),
            medico_id: c.medico_id(),
            instituicao_id: c.instituicao_id(),
            observacao: c.observacao().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExameRequest {
    pub paciente_id: PacienteId,
    pub medico_id: MedicoId,
    #[serde(default)]
    pub consulta_id: Option<ConsultaId>,
    pub tipo: String,
    pub data_realizacao: DateTime<Utc>,
    #[serde(default)]
    pub resultado: Option<String>,
    #[serde(default)]
    pub observacao: Option<String>,
}

impl From<ExameRequest> for DadosExame {
    fn from(r: ExameRequest) -> Self {
        Self {
            paciente_id: r.paciente_id,
            medico_id: r.medico_id,
            consulta_id: r.consulta_id,
            tipo: r.tipo,
            data_realizacao: r.data_realizacao,
            resultado: r.resultado,
            observacao: r.observacao,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExameResponse {
    pub id: ExameId,
    pub paciente_id: PacienteId,
    pub medico_id: MedicoId,
    pub consulta_id: Option<ConsultaId>,
    pub tipo: String,
    pub data_realizacao: DateTime<Utc>,
    pub resultado: Option<String>,
    pub observacao: Option<String>,
}

impl From<&Exame> for ExameResponse {
    fn from(x: &Exame) -> Self {
        Self {
            id: x.id(),
            paciente_id: x.paciente_id(),
            medico_id: x.medico_id(),
            consulta_id: x.consulta_id(),
            tipo: x.tipo().to_string(),
            data_realizacao: x.data_realizacao(),
            resultado: x.resultado().map(str::to_string),
            observacao: x.observacao().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricoRequest {
    pub paciente_id: PacienteId,
    #[serde(default)]
    pub medico_id: Option<MedicoId>,
    pub descricao: String,
    #[serde(default)]
    pub diagnostico: Option<String>,
    #[serde(default)]
    pub tratamento: Option<String>,
    /// Defaults to the time the record is received
    #[serde(default)]
    pub data_registro: Option<DateTime<Utc>>,
}

impl HistoricoRequest {
    pub fn into_dados(self, agora: DateTime<Utc>) -> DadosHistorico {
        DadosHistorico {
            paciente_id: self.paciente_id,
            medico_id: self.medico_id,
            descricao: self.descricao,
            diagnostico: self.diagnostico,
            tratamento: self.tratamento,
            data_registro: self.data_registro.unwrap_or(agora),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricoResponse {
    pub id: HistoricoMedicoId,
    pub paciente_id: PacienteId,
    pub medico_id: Option<MedicoId>,
    pub descricao: String,
    pub diagnostico: Option<String>,
    pub tratamento: Option<String>,
    pub data_registro: DateTime<Utc>,
}

impl From<&HistoricoMedico> for HistoricoResponse {
    fn from(h: &HistoricoMedico) -> Self {
        Self {
            id: h.id(),
            paciente_id: h.paciente_id(),
            medico_id: h.medico_id(),
            descricao: h.descricao().to_string(),
            diagnostico: h.diagnostico().map(str::to_string),
            tratamento: h.tratamento().map(str::to_string),
            data_registro: h.data_registro(),
        }
    }
}
