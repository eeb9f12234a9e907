//! Exame domain model

use super::{obrigatorio, opcional};
use crate::domain::errors::DomainError;
use crate::domain::ids::{ConsultaId, ExameId, MedicoId, PacienteId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Input for creating or fully updating an [`Exame`]
#[derive(Debug, Clone)]
pub struct DadosExame {
    pub paciente_id: PacienteId,
    pub medico_id: MedicoId,
    pub consulta_id: Option<ConsultaId>,
    pub tipo: String,
    pub data_realizacao: DateTime<Utc>,
    pub resultado: Option<String>,
    pub observacao: Option<String>,
}

/// An exam requested by a doctor for a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exame {
    id: ExameId,
    paciente_id: PacienteId,
    medico_id: MedicoId,
    consulta_id: Option<ConsultaId>,
    tipo: String,
    data_realizacao: DateTime<Utc>,
    resultado: Option<String>,
    observacao: Option<String>,
}

impl Exame {
    pub fn new(dados: DadosExame) -> Result<Self, DomainError> {
        let tipo = obrigatorio(&dados.tipo, "tipo")?;
        Ok(Self {
            tipo,
            ..Self::from_parts(ExameId::new(), dados)
        })
    }

    pub fn from_parts(id: ExameId, dados: DadosExame) -> Self {
        Self {
            id,
            paciente_id: dados.paciente_id,
            medico_id: dados.medico_id,
            consulta_id: dados.consulta_id,
            tipo: dados.tipo,
            data_realizacao: dados.data_realizacao,
            resultado: opcional(dados.resultado),
            observacao: opcional(dados.observacao),
        }
    }

    pub fn atualizar(&mut self, dados: DadosExame) -> Result<(), DomainError> {
        let tipo = obrigatorio(&dados.tipo, "tipo")?;
        *self = Self {
            tipo,
            ..Self::from_parts(self.id, dados)
        };
        Ok(())
    }

    pub fn id(&self) -> ExameId {
        self.id
    }

    pub fn paciente_id(&self) -> PacienteId {
        self.paciente_id
    }

    pub fn medico_id(&self) -> MedicoId {
        self.medico_id
    }

    pub fn consulta_id(&self) -> Option<ConsultaId> {
        self.consulta_id
    }

    pub fn tipo(&self) -> &str {
        &self.tipo
    }

    pub fn data_realizacao(&self) -> DateTime<Utc> {
        self.data_realizacao
    }

    pub fn resultado(&self) -> Option<&str> {
        self.resultado.as_deref()
    }

    pub fn observacao(&self) -> Option<&str> {
        self.observacao.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dados(tipo: &str) -> DadosExame {
        DadosExame {
            paciente_id: PacienteId::new(),
            medico_id: MedicoId::new(),
            consulta_id: None,
            tipo: tipo.to_string(),
            data_realizacao: Utc::now(),
            resultado: None,
            observacao: None,
        }
    }

    #[test]
    fn test_tipo_required() {
        assert_eq!(
            Exame::new(dados(" ")).unwrap_err(),
            DomainError::CampoObrigatorio("tipo")
        );
        assert_eq!(Exame::new(dados(" Hemograma ")).unwrap().tipo(), "Hemograma");
    }

    #[test]
    fn test_atualizar_failure_leaves_exam_untouched() {
        let mut exame = Exame::new(dados("Glicemia")).unwrap();
        assert!(exame.atualizar(dados("")).is_err());
        assert_eq!(exame.tipo(), "Glicemia");

        let mut input = dados("Glicemia");
        input.resultado = Some("92 mg/dL".to_string());
        exame.atualizar(input).unwrap();
        assert_eq!(exame.resultado(), Some("92 mg/dL"));
    }
}
