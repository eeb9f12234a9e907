//! Row mapping for the PostgreSQL adapter
//!
//! Value objects are stored in canonical form and re-parsed on the way out;
//! a column that no longer parses is reported as a database error rather
//! than silently dropped.

use crate::domain::entities::{
    Consulta, DadosConsulta, DadosExame, DadosHistorico, DadosInstituicao, DadosMedico,
    DadosPaciente, Especialidade, Exame, HistoricoMedico, Instituicao, Medico, Paciente, Role,
    Usuario,
};
use crate::domain::ids::{
    ConsultaId, EspecialidadeId, ExameId, HistoricoMedicoId, InstituicaoId, MedicoId, PacienteId,
    UsuarioId,
};
use crate::domain::value_objects::{Cep, Cnpj, Cpf, Crm, Email, Endereco, Uf};
use crate::domain::{ClinidataError, DomainError, Result};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;
use tokio_postgres::types::FromSql;
use tokio_postgres::Row;
use uuid::Uuid;

pub const PACIENTE_COLUMNS: &str = "id, nome, data_nascimento, sexo, cpf, telefone, email, \
     logradouro, numero, complemento, bairro, cidade, uf, cep, nome_responsavel";

pub const MEDICO_COLUMNS: &str = "id, nome, crm, especialidade_id, telefone, email";

pub const INSTITUICAO_COLUMNS: &str = "id, nome, cnpj, telefone, email, \
     logradouro, numero, complemento, bairro, cidade, uf, cep";

pub const CONSULTA_COLUMNS: &str =
    "id, data_hora, paciente_id, medico_id, instituicao_id, observacao";

pub const EXAME_COLUMNS: &str = "id, paciente_id, medico_id, consulta_id, tipo, data_realizacao, \
     resultado, observacao";

pub const HISTORICO_COLUMNS: &str = "id, paciente_id, medico_id, descricao, diagnostico, \
     tratamento, data_registro";

pub const USUARIO_COLUMNS: &str = "id, email, password_hash, role, entity_id, created_at";

fn column<'a, T: FromSql<'a>>(row: &'a Row, name: &str) -> Result<T> {
    row.try_get(name)
        .map_err(|e| ClinidataError::Database(format!("Failed to read column {name}: {e}")))
}

fn parsed<T>(row: &Row, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: String = column(row, name)?;
    parse_stored(&raw, name)
}

/// CHAR columns come back space-padded
fn parse_stored<T>(raw: &str, name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ClinidataError::Database(format!("Corrupt value in column {name}: {e}")))
}

fn stored<T>(value: std::result::Result<T, DomainError>, name: &str) -> Result<T> {
    value.map_err(|e| ClinidataError::Database(format!("Corrupt value in column {name}: {e}")))
}

fn endereco_from_row(row: &Row) -> Result<Endereco> {
    let endereco = Endereco::builder()
        .logradouro(column::<String>(row, "logradouro")?)
        .numero(column::<String>(row, "numero")?)
        .complemento(column(row, "complemento")?)
        .bairro(column::<String>(row, "bairro")?)
        .cidade(column::<String>(row, "cidade")?)
        .uf(parsed::<Uf>(row, "uf")?)
        .cep(parsed::<Cep>(row, "cep")?)
        .build();
    stored(endereco, "endereco")
}

pub fn paciente_from_row(row: &Row) -> Result<Paciente> {
    let id: Uuid = column(row, "id")?;
    Ok(Paciente::from_parts(
        PacienteId::from_uuid(id),
        DadosPaciente {
            nome: column(row, "nome")?,
            data_nascimento: column(row, "data_nascimento")?,
            sexo: parsed(row, "sexo")?,
            cpf: parsed::<Cpf>(row, "cpf")?,
            telefone: column(row, "telefone")?,
            email: parsed::<Email>(row, "email")?,
            endereco: endereco_from_row(row)?,
            nome_responsavel: column(row, "nome_responsavel")?,
        },
    ))
}

pub fn medico_from_row(row: &Row) -> Result<Medico> {
    let id: Uuid = column(row, "id")?;
    let especialidade_id: Uuid = column(row, "especialidade_id")?;
    Ok(Medico::from_parts(
        MedicoId::from_uuid(id),
        DadosMedico {
            nome: column(row, "nome")?,
            crm: parsed::<Crm>(row, "crm")?,
            especialidade_id: EspecialidadeId::from_uuid(especialidade_id),
            telefone: column(row, "telefone")?,
            email: parsed::<Email>(row, "email")?,
        },
    ))
}

pub fn especialidade_from_row(row: &Row) -> Result<Especialidade> {
    let id: Uuid = column(row, "id")?;
    Ok(Especialidade::from_parts(
        EspecialidadeId::from_uuid(id),
        column(row, "nome")?,
    ))
}

pub fn instituicao_from_row(row: &Row, medicos: BTreeSet<MedicoId>) -> Result<Instituicao> {
    let id: Uuid = column(row, "id")?;
    Ok(Instituicao::from_parts(
        InstituicaoId::from_uuid(id),
        DadosInstituicao {
            nome: column(row, "nome")?,
            cnpj: parsed::<Cnpj>(row, "cnpj")?,
            telefone: column(row, "telefone")?,
            email: parsed::<Email>(row, "email")?,
            endereco: endereco_from_row(row)?,
        },
        medicos,
    ))
}

pub fn consulta_from_row(row: &Row) -> Result<Consulta> {
    let id: Uuid = column(row, "id")?;
    let paciente_id: Uuid = column(row, "paciente_id")?;
    let medico_id: Uuid = column(row, "medico_id")?;
    let instituicao_id: Option<Uuid> = column(row, "instituicao_id")?;
    Ok(Consulta::from_parts(
        ConsultaId::from_uuid(id),
        DadosConsulta {
            data_hora: column(row, "data_hora")?,
            paciente_id: PacienteId::from_uuid(paciente_id),
            medico_id: MedicoId::from_uuid(medico_id),
            instituicao_id: instituicao_id.map(InstituicaoId::from_uuid),
            observacao: column(row, "observacao")?,
        },
    ))
}

pub fn exame_from_row(row: &Row) -> Result<Exame> {
    let id: Uuid = column(row, "id")?;
    let paciente_id: Uuid = column(row, "paciente_id")?;
    let medico_id: Uuid = column(row, "medico_id")?;
    let consulta_id: Option<Uuid> = column(row, "consulta_id")?;
    Ok(Exame::from_parts(
        ExameId::from_uuid(id),
        DadosExame {
            paciente_id: PacienteId::from_uuid(paciente_id),
            medico_id: MedicoId::from_uuid(medico_id),
            consulta_id: consulta_id.map(ConsultaId::from_uuid),
            tipo: column(row, "tipo")?,
            data_realizacao: column(row, "data_realizacao")?,
            resultado: column(row, "resultado")?,
            observacao: column(row, "observacao")?,
        },
    ))
}

pub fn historico_from_row(row: &Row) -> Result<HistoricoMedico> {
    let id: Uuid = column(row, "id")?;
    let paciente_id: Uuid = column(row, "paciente_id")?;
    let medico_id: Option<Uuid> = column(row, "medico_id")?;
    Ok(HistoricoMedico::from_parts(
        HistoricoMedicoId::from_uuid(id),
        DadosHistorico {
            paciente_id: PacienteId::from_uuid(paciente_id),
            medico_id: medico_id.map(MedicoId::from_uuid),
            descricao: column(row, "descricao")?,
            diagnostico: column(row, "diagnostico")?,
            tratamento: column(row, "tratamento")?,
            data_registro: column(row, "data_registro")?,
        },
    ))
}

pub fn usuario_from_row(row: &Row) -> Result<Usuario> {
    let id: Uuid = column(row, "id")?;
    Ok(Usuario {
        id: UsuarioId::from_uuid(id),
        email: parsed::<Email>(row, "email")?,
        password_hash: column(row, "password_hash")?,
        role: parsed::<Role>(row, "role")?,
        entity_id: column(row, "entity_id")?,
        created_at: column(row, "created_at")?,
    })
}
