//! Builders for unit tests

use super::*;
use chrono::{NaiveDate, TimeZone, Utc};

pub fn hoje() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

pub fn endereco() -> Endereco {
    Endereco::builder()
        .logradouro("Rua das Flores")
        .numero("100")
        .bairro("Centro")
        .cidade("São Paulo")
        .uf(Uf::SP)
        .cep(Cep::parse("01001-000").unwrap())
        .build()
        .unwrap()
}

pub fn dados_paciente(nome: &str, cpf: &str) -> DadosPaciente {
    DadosPaciente {
        nome: nome.to_string(),
        data_nascimento: NaiveDate::from_ymd_opt(1985, 3, 10).unwrap(),
        sexo: Sexo::Feminino,
        cpf: Cpf::parse(cpf).unwrap(),
        telefone: "11 99999-0000".to_string(),
        email: Email::parse(&format!("{}@exemplo.com", nome.to_lowercase())).unwrap(),
        endereco: endereco(),
        nome_responsavel: None,
    }
}

pub fn paciente(nome: &str, cpf: &str) -> Paciente {
    Paciente::new(dados_paciente(nome, cpf), hoje()).unwrap()
}

pub fn especialidade(nome: &str) -> Especialidade {
    Especialidade::new(nome).unwrap()
}

pub fn dados_medico(crm: &str, email: &str, especialidade_id: EspecialidadeId) -> DadosMedico {
    DadosMedico {
        nome: "Dr. Carlos".to_string(),
        crm: Crm::parse(crm).unwrap(),
        especialidade_id,
        telefone: "11 3333-4444".to_string(),
        email: Email::parse(email).unwrap(),
    }
}

pub fn medico(crm: &str, email: &str, especialidade_id: EspecialidadeId) -> Medico {
    Medico::new(dados_medico(crm, email, especialidade_id)).unwrap()
}

pub fn instituicao(nome: &str, cnpj: &str) -> Instituicao {
    Instituicao::new(DadosInstituicao {
        nome: nome.to_string(),
        cnpj: Cnpj::parse(cnpj).unwrap(),
        telefone: "11 2222-1111".to_string(),
        email: Email::parse("contato@hospital.com").unwrap(),
        endereco: endereco(),
    })
    .unwrap()
}

pub fn consulta(paciente_id: PacienteId, medico_id: MedicoId, dia: u32) -> Consulta {
    Consulta::new(DadosConsulta {
        data_hora: Utc.with_ymd_and_hms(2024, 7, dia, 14, 0, 0).unwrap(),
        paciente_id,
        medico_id,
        instituicao_id: None,
        observacao: None,
    })
}

pub fn exame(
    paciente_id: PacienteId,
    medico_id: MedicoId,
    consulta_id: Option<ConsultaId>,
) -> Exame {
    Exame::new(DadosExame {
        paciente_id,
        medico_id,
        consulta_id,
        tipo: "Hemograma".to_string(),
        data_realizacao: Utc.with_ymd_and_hms(2024, 7, 2, 9, 0, 0).unwrap(),
        resultado: None,
        observacao: None,
    })
    .unwrap()
}

pub fn historico(paciente_id: PacienteId, medico_id: Option<MedicoId>) -> HistoricoMedico {
    HistoricoMedico::new(DadosHistorico {
        paciente_id,
        medico_id,
        descricao: "Dor de cabeça recorrente".to_string(),
        diagnostico: Some("Enxaqueca".to_string()),
        tratamento: None,
        data_registro: Utc.with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap(),
    })
    .unwrap()
}
