//! HistoricoMedico domain model

use super::{obrigatorio, opcional};
use crate::domain::errors::DomainError;
use crate::domain::ids::{HistoricoMedicoId, MedicoId, PacienteId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Input for creating or fully updating a [`HistoricoMedico`]
#[derive(Debug, Clone)]
pub struct DadosHistorico {
    pub paciente_id: PacienteId,
    pub medico_id: Option<MedicoId>,
    pub descricao: String,
    pub diagnostico: Option<String>,
    pub tratamento: Option<String>,
    pub data_registro: DateTime<Utc>,
}

/// A medical history entry for a patient
///
/// `medico_id` is optional so that entries outlive the doctor who wrote them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoricoMedico {
    id: HistoricoMedicoId,
    paciente_id: PacienteId,
    medico_id: Option<MedicoId>,
    descricao: String,
    diagnostico: Option<String>,
    tratamento: Option<String>,
    data_registro: DateTime<Utc>,
}

impl HistoricoMedico {
    pub fn new(dados: DadosHistorico) -> Result<Self, DomainError> {
        let descricao = obrigatorio(&dados.descricao, "descricao")?;
        Ok(Self {
            descricao,
            ..Self::from_parts(HistoricoMedicoId::new(), dados)
        })
    }

    pub fn from_parts(id: HistoricoMedicoId, dados: DadosHistorico) -> Self {
        Self {
            id,
            paciente_id: dados.paciente_id,
            medico_id: dados.medico_id,
            descricao: dados.descricao,
            diagnostico: opcional(dados.diagnostico),
            tratamento: opcional(dados.tratamento),
            data_registro: dados.data_registro,
        }
    }

    pub fn atualizar(&mut self, dados: DadosHistorico) -> Result<(), DomainError> {
        let descricao = obrigatorio(&dados.descricao, "descricao")?;
        *self = Self {
            descricao,
            ..Self::from_parts(self.id, dados)
        };
        Ok(())
    }

    pub fn id(&self) -> HistoricoMedicoId {
        self.id
    }

    pub fn paciente_id(&self) -> PacienteId {
        self.paciente_id
    }

    pub fn medico_id(&self) -> Option<MedicoId> {
        self.medico_id
    }

    pub fn descricao(&self) -> &str {
        &self.descricao
    }

    pub fn diagnostico(&self) -> Option<&str> {
        self.diagnostico.as_deref()
    }

    pub fn tratamento(&self) -> Option<&str> {
        self.tratamento.as_deref()
    }

    pub fn data_registro(&self) -> DateTime<Utc> {
        self.data_registro
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descricao_required() {
        let dados = DadosHistorico {
            paciente_id: PacienteId::new(),
            medico_id: None,
            descricao: "\n".to_string(),
            diagnostico: Some("".to_string()),
            tratamento: None,
            data_registro: Utc::now(),
        };
        assert_eq!(
            HistoricoMedico::new(dados.clone()).unwrap_err(),
            DomainError::CampoObrigatorio("descricao")
        );

        let historico = HistoricoMedico::new(DadosHistorico {
            descricao: "Alergia a dipirona".to_string(),
            ..dados
        })
        .unwrap();
        assert_eq!(historico.descricao(), "Alergia a dipirona");
        assert_eq!(historico.diagnostico(), None);
    }
}
