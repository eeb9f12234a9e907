//! Consulta domain model

use super::opcional;
use crate::domain::ids::{ConsultaId, InstituicaoId, MedicoId, PacienteId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Input for creating or fully updating a [`Consulta`]
#[derive(Debug, Clone)]
pub struct DadosConsulta {
    pub data_hora: DateTime<Utc>,
    pub paciente_id: PacienteId,
    pub medico_id: MedicoId,
    pub instituicao_id: Option<InstituicaoId>,
    pub observacao: Option<String>,
}

/// An appointment between a patient and a doctor
///
/// Overlapping appointments are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Consulta {
    id: ConsultaId,
    data_hora: DateTime<Utc>,
    paciente_id: PacienteId,
    medico_id: MedicoId,
    instituicao_id: Option<InstituicaoId>,
    observacao: Option<String>,
}

impl Consulta {
    pub fn new(dados: DadosConsulta) -> Self {
        Self::from_parts(ConsultaId::new(), dados)
    }

    pub fn from_parts(id: ConsultaId, dados: DadosConsulta) -> Self {
        Self {
            id,
            data_hora: dados.data_hora,
            paciente_id: dados.paciente_id,
            medico_id: dados.medico_id,
            instituicao_id: dados.instituicao_id,
            observacao: opcional(dados.observacao),
        }
    }

    pub fn atualizar(&mut self, dados: DadosConsulta) {
        *self = Self::from_parts(self.id, dados);
    }

    pub fn id(&self) -> ConsultaId {
        self.id
    }

    pub fn data_hora(&self) -> DateTime<Utc> {
        self.data_hora
    }

    pub fn paciente_id(&self) -> PacienteId {
        self.paciente_id
    }

    pub fn medico_id(&self) -> MedicoId {
        self.medico_id
    }

    pub fn instituicao_id(&self) -> Option<InstituicaoId> {
        self.instituicao_id
    }

    pub fn observacao(&self) -> Option<&str> {
        self.observacao.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_update_keeps_id() {
        let dados = DadosConsulta {
            data_hora: Utc.with_ymd_and_hms(2024, 7, 1, 14, 30, 0).unwrap(),
            paciente_id: PacienteId::new(),
            medico_id: MedicoId::new(),
            instituicao_id: None,
            observacao: Some("  ".to_string()),
        };
        let mut consulta = Consulta::new(dados.clone());
        assert_eq!(consulta.observacao(), None);

        let id = consulta.id();
        consulta.atualizar(DadosConsulta {
            observacao: Some("retorno".to_string()),
            ..dados
        });
        assert_eq!(consulta.id(), id);
        assert_eq!(consulta.observacao(), Some("retorno"));
    }
}
