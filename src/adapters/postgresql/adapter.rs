//! PostgreSQL adapter implementing the repository traits

use crate::adapters::database::traits::{
    ConsultaRepository, EspecialidadeRepository, ExameRepository, HealthCheck,
    HistoricoMedicoRepository, InstituicaoRepository, MedicoRepository, NovaConta,
    PacienteRepository, UsuarioRepository,
};
use crate::adapters::postgresql::client::{begin, map_db_error, PostgreSQLClient};
use crate::adapters::postgresql::models::{
    consulta_from_row, especialidade_from_row, exame_from_row, historico_from_row,
    instituicao_from_row, medico_from_row, paciente_from_row, usuario_from_row, CONSULTA_COLUMNS,
    EXAME_COLUMNS, HISTORICO_COLUMNS, INSTITUICAO_COLUMNS, MEDICO_COLUMNS, PACIENTE_COLUMNS,
    USUARIO_COLUMNS,
};
use crate::domain::{
    Consulta, ConsultaId, Cnpj, Cpf, Crm, Email, Especialidade, EspecialidadeId, Exame, ExameId,
    HistoricoMedico, HistoricoMedicoId, Instituicao, InstituicaoId, Medico, MedicoId, Paciente,
    PacienteId, Result, Usuario,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio_postgres::GenericClient;
use uuid::Uuid;

/// PostgreSQL implementation of every repository trait
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Create a new PostgreSQL adapter with an Arc-wrapped client
    pub fn new_with_arc(client: Arc<PostgreSQLClient>) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PostgreSQLClient> {
        &self.client
    }

    async fn links_for(&self, ids: &[Uuid]) -> Result<BTreeMap<Uuid, BTreeSet<MedicoId>>> {
        let rows = self
            .client
            .query(
                "SELECT instituicao_id, medico_id FROM medico_instituicao \
                 WHERE instituicao_id = ANY($1)",
                &[&ids],
            )
            .await?;

        let mut links: BTreeMap<Uuid, BTreeSet<MedicoId>> = BTreeMap::new();
        for row in rows {
            let instituicao_id: Uuid = row.get("instituicao_id");
            let medico_id: Uuid = row.get("medico_id");
            links
                .entry(instituicao_id)
                .or_default()
                .insert(MedicoId::from_uuid(medico_id));
        }
        Ok(links)
    }

    async fn instituicoes_from_rows(
        &self,
        rows: Vec<tokio_postgres::Row>,
    ) -> Result<Vec<Instituicao>> {
        let ids: Vec<Uuid> = rows.iter().map(|row| row.get("id")).collect();
        let mut links = self.links_for(&ids).await?;
        rows.iter()
            .map(|row| {
                let id: Uuid = row.get("id");
                instituicao_from_row(row, links.remove(&id).unwrap_or_default())
            })
            .collect()
    }
}

async fn insert_paciente<C: GenericClient + Sync>(client: &C, p: &Paciente) -> Result<()> {
    let e = p.endereco();
    client
        .execute(
            &format!(
                "INSERT INTO paciente ({PACIENTE_COLUMNS}) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)"
            ),
            &[
                p.id().as_uuid(),
                &p.nome(),
                &p.data_nascimento(),
                &p.sexo().as_str(),
                &p.cpf().as_str(),
                &p.telefone(),
                &p.email().as_str(),
                &e.logradouro(),
                &e.numero(),
                &e.complemento(),
                &e.bairro(),
                &e.cidade(),
                &e.uf().as_str(),
                &e.cep().as_str(),
                &p.nome_responsavel(),
            ],
        )
        .await
        .map_err(|err| map_db_error("insert paciente", err))?;
    Ok(())
}

async fn insert_medico<C: GenericClient + Sync>(client: &C, m: &Medico) -> Result<()> {
    client
        .execute(
            &format!("INSERT INTO medico ({MEDICO_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"),
            &[
                m.id().as_uuid(),
                &m.nome(),
                &m.crm().as_str(),
                m.especialidade_id().as_uuid(),
                &m.telefone(),
                &m.email().as_str(),
            ],
        )
        .await
        .map_err(|err| map_db_error("insert medico", err))?;
    Ok(())
}

async fn insert_instituicao<C: GenericClient + Sync>(client: &C, i: &Instituicao) -> Result<()> {
    let e = i.endereco();
    client
        .execute(
            &format!(
                "INSERT INTO instituicao ({INSTITUICAO_COLUMNS}) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)"
            ),
            &[
                i.id().as_uuid(),
                &i.nome(),
                &i.cnpj().as_str(),
                &i.telefone(),
                &i.email().as_str(),
                &e.logradouro(),
                &e.numero(),
                &e.complemento(),
                &e.bairro(),
                &e.cidade(),
                &e.uf().as_str(),
                &e.cep().as_str(),
            ],
        )
        .await
        .map_err(|err| map_db_error("insert instituicao", err))?;
    Ok(())
}

async fn update_paciente<C: GenericClient + Sync>(client: &C, p: &Paciente) -> Result<bool> {
    let e = p.endereco();
    let affected = client
        .execute(
            "UPDATE paciente SET nome = $2, data_nascimento = $3, sexo = $4, cpf = $5, \
             telefone = $6, email = $7, logradouro = $8, numero = $9, complemento = $10, \
             bairro = $11, cidade = $12, uf = $13, cep = $14, nome_responsavel = $15 \
             WHERE id = $1",
            &[
                p.id().as_uuid(),
                &p.nome(),
                &p.data_nascimento(),
                &p.sexo().as_str(),
                &p.cpf().as_str(),
                &p.telefone(),
                &p.email().as_str(),
                &e.logradouro(),
                &e.numero(),
                &e.complemento(),
                &e.bairro(),
                &e.cidade(),
                &e.uf().as_str(),
                &e.cep().as_str(),
                &p.nome_responsavel(),
            ],
        )
        .await
        .map_err(|err| map_db_error("update paciente", err))?;
    Ok(affected == 1)
}

async fn update_medico<C: GenericClient + Sync>(client: &C, m: &Medico) -> Result<bool> {
    let affected = client
        .execute(
            "UPDATE medico SET nome = $2, crm = $3, especialidade_id = $4, telefone = $5, \
             email = $6 WHERE id = $1",
            &[
                m.id().as_uuid(),
                &m.nome(),
                &m.crm().as_str(),
                m.especialidade_id().as_uuid(),
                &m.telefone(),
                &m.email().as_str(),
            ],
        )
        .await
        .map_err(|err| map_db_error("update medico", err))?;
    Ok(affected == 1)
}

async fn update_instituicao<C: GenericClient + Sync>(client: &C, i: &Instituicao) -> Result<bool> {
    let e = i.endereco();
    let affected = client
        .execute(
            "UPDATE instituicao SET nome = $2, cnpj = $3, telefone = $4, email = $5, \
             logradouro = $6, numero = $7, complemento = $8, bairro = $9, cidade = $10, \
             uf = $11, cep = $12 WHERE id = $1",
            &[
                i.id().as_uuid(),
                &i.nome(),
                &i.cnpj().as_str(),
                &i.telefone(),
                &i.email().as_str(),
                &e.logradouro(),
                &e.numero(),
                &e.complemento(),
                &e.bairro(),
                &e.cidade(),
                &e.uf().as_str(),
                &e.cep().as_str(),
            ],
        )
        .await
        .map_err(|err| map_db_error("update instituicao", err))?;
    Ok(affected == 1)
}

/// Moves the login of `entity_id` to the record's new e-mail
async fn sync_account_email<C: GenericClient + Sync>(
    client: &C,
    entity_id: Uuid,
    email: &Email,
) -> Result<()> {
    client
        .execute(
            "UPDATE usuario SET email = $2 WHERE entity_id = $1 AND email <> $2",
            &[&entity_id, &email.as_str()],
        )
        .await
        .map_err(|err| map_db_error("update usuario", err))?;
    Ok(())
}

/// Deletes a registered record and its login in one transaction
///
/// `table` is one of the fixed table names of this module.
async fn delete_with_accounts(client: &PostgreSQLClient, table: &str, id: Uuid) -> Result<bool> {
    let mut conn = client.get_connection().await?;
    let tx = begin(&mut conn).await?;
    let affected = tx
        .execute(&format!("DELETE FROM {table} WHERE id = $1"), &[&id])
        .await
        .map_err(|err| map_db_error("delete", err))?;
    if affected == 1 {
        let contas = tx
            .execute("DELETE FROM usuario WHERE entity_id = $1", &[&id])
            .await
            .map_err(|err| map_db_error("delete usuario", err))?;
        tracing::debug!(entity_id = %id, contas, "Accounts removed");
    }
    tx.commit()
        .await
        .map_err(|err| map_db_error("commit delete", err))?;
    Ok(affected == 1)
}

#[async_trait]
impl HealthCheck for PostgreSQLAdapter {
    fn backend(&self) -> &'static str {
        "postgresql"
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }
}

#[async_trait]
impl PacienteRepository for PostgreSQLAdapter {
    async fn insert(&self, paciente: &Paciente) -> Result<()> {
        let conn = self.client.get_connection().await?;
        insert_paciente(&**conn, paciente).await?;
        tracing::debug!(paciente_id = %paciente.id(), "Paciente inserted");
        Ok(())
    }

    async fn update(&self, p: &Paciente) -> Result<bool> {
        let mut conn = self.client.get_connection().await?;
        let tx = begin(&mut conn).await?;
        let updated = update_paciente(&*tx, p).await?;
        if updated {
            sync_account_email(&*tx, p.id().into_inner(), p.email()).await?;
        }
        tx.commit()
            .await
            .map_err(|e| map_db_error("commit paciente", e))?;
        Ok(updated)
    }

    async fn delete(&self, id: PacienteId) -> Result<bool> {
        delete_with_accounts(&self.client, "paciente", id.into_inner()).await
    }

    async fn find_by_id(&self, id: PacienteId) -> Result<Option<Paciente>> {
        self.client
            .query_opt(
                &format!("SELECT {PACIENTE_COLUMNS} FROM paciente WHERE id = $1"),
                &[id.as_uuid()],
            )
            .await?
            .as_ref()
            .map(paciente_from_row)
            .transpose()
    }

    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Option<Paciente>> {
        self.client
            .query_opt(
                &format!("SELECT {PACIENTE_COLUMNS} FROM paciente WHERE cpf = $1"),
                &[&cpf.as_str()],
            )
            .await?
            .as_ref()
            .map(paciente_from_row)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Paciente>> {
        self.client
            .query(
                &format!("SELECT {PACIENTE_COLUMNS} FROM paciente ORDER BY nome, id"),
                &[],
            )
            .await?
            .iter()
            .map(paciente_from_row)
            .collect()
    }
}

#[async_trait]
impl MedicoRepository for PostgreSQLAdapter {
    async fn insert(&self, medico: &Medico) -> Result<()> {
        let conn = self.client.get_connection().await?;
        insert_medico(&**conn, medico).await?;
        tracing::debug!(medico_id = %medico.id(), "Medico inserted");
        Ok(())
    }

    async fn update(&self, m: &Medico) -> Result<bool> {
        let mut conn = self.client.get_connection().await?;
        let tx = begin(&mut conn).await?;
        let updated = update_medico(&*tx, m).await?;
        if updated {
            sync_account_email(&*tx, m.id().into_inner(), m.email()).await?;
        }
        tx.commit()
            .await
            .map_err(|e| map_db_error("commit medico", e))?;
        Ok(updated)
    }

    async fn delete(&self, id: MedicoId) -> Result<bool> {
        delete_with_accounts(&self.client, "medico", id.into_inner()).await
    }

    async fn find_by_id(&self, id: MedicoId) -> Result<Option<Medico>> {
        self.client
            .query_opt(
                &format!("SELECT {MEDICO_COLUMNS} FROM medico WHERE id = $1"),
                &[id.as_uuid()],
            )
            .await?
            .as_ref()
            .map(medico_from_row)
            .transpose()
    }

    async fn find_by_crm(&self, crm: &Crm) -> Result<Option<Medico>> {
        self.client
            .query_opt(
                &format!("SELECT {MEDICO_COLUMNS} FROM medico WHERE crm = $1"),
                &[&crm.as_str()],
            )
            .await?
            .as_ref()
            .map(medico_from_row)
            .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Medico>> {
        self.client
            .query_opt(
                &format!("SELECT {MEDICO_COLUMNS} FROM medico WHERE email = $1"),
                &[&email.as_str()],
            )
            .await?
            .as_ref()
            .map(medico_from_row)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Medico>> {
        self.client
            .query(
                &format!("SELECT {MEDICO_COLUMNS} FROM medico ORDER BY nome, id"),
                &[],
            )
            .await?
            .iter()
            .map(medico_from_row)
            .collect()
    }

    async fn list_by_especialidade(&self, id: EspecialidadeId) -> Result<Vec<Medico>> {
        self.client
            .query(
                &format!(
                    "SELECT {MEDICO_COLUMNS} FROM medico WHERE especialidade_id = $1 \
                     ORDER BY nome, id"
                ),
                &[id.as_uuid()],
            )
            .await?
            .iter()
            .map(medico_from_row)
            .collect()
    }

    async fn list_by_ids(&self, ids: &[MedicoId]) -> Result<Vec<Medico>> {
        let ids: Vec<Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.client
            .query(
                &format!(
                    "SELECT {MEDICO_COLUMNS} FROM medico WHERE id = ANY($1) ORDER BY nome, id"
                ),
                &[&ids],
            )
            .await?
            .iter()
            .map(medico_from_row)
            .collect()
    }
}

#[async_trait]
impl EspecialidadeRepository for PostgreSQLAdapter {
    async fn insert(&self, especialidade: &Especialidade) -> Result<()> {
        self.client
            .execute(
                "INSERT INTO especialidade (id, nome) VALUES ($1, $2)",
                &[especialidade.id().as_uuid(), &especialidade.nome()],
            )
            .await?;
        Ok(())
    }

    async fn delete(&self, id: EspecialidadeId) -> Result<bool> {
        let affected = self
            .client
            .execute("DELETE FROM especialidade WHERE id = $1", &[id.as_uuid()])
            .await?;
        Ok(affected == 1)
    }

    async fn find_by_id(&self, id: EspecialidadeId) -> Result<Option<Especialidade>> {
        self.client
            .query_opt(
                "SELECT id, nome FROM especialidade WHERE id = $1",
                &[id.as_uuid()],
            )
            .await?
            .as_ref()
            .map(especialidade_from_row)
            .transpose()
    }

    async fn find_by_nome(&self, nome: &str) -> Result<Option<Especialidade>> {
        self.client
            .query_opt(
                "SELECT id, nome FROM especialidade WHERE lower(nome) = lower($1)",
                &[&nome.trim()],
            )
            .await?
            .as_ref()
            .map(especialidade_from_row)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Especialidade>> {
        self.client
            .query("SELECT id, nome FROM especialidade ORDER BY nome, id", &[])
            .await?
            .iter()
            .map(especialidade_from_row)
            .collect()
    }
}

#[async_trait]
impl InstituicaoRepository for PostgreSQLAdapter {
    async fn insert(&self, instituicao: &Instituicao) -> Result<()> {
        let mut conn = self.client.get_connection().await?;
        let tx = begin(&mut conn).await?;
        insert_instituicao(&*tx, instituicao).await?;
        for medico_id in instituicao.medicos() {
            tx.execute(
                "INSERT INTO medico_instituicao (instituicao_id, medico_id) VALUES ($1, $2)",
                &[instituicao.id().as_uuid(), medico_id.as_uuid()],
            )
            .await
            .map_err(|e| map_db_error("insert medico_instituicao", e))?;
        }
        tx.commit()
            .await
            .map_err(|e| map_db_error("commit instituicao", e))
    }

    async fn update(&self, i: &Instituicao) -> Result<bool> {
        let mut conn = self.client.get_connection().await?;
        let tx = begin(&mut conn).await?;
        let updated = update_instituicao(&*tx, i).await?;
        if updated {
            sync_account_email(&*tx, i.id().into_inner(), i.email()).await?;
        }
        tx.commit()
            .await
            .map_err(|e| map_db_error("commit instituicao", e))?;
        Ok(updated)
    }

    async fn delete(&self, id: InstituicaoId) -> Result<bool> {
        delete_with_accounts(&self.client, "instituicao", id.into_inner()).await
    }

    async fn find_by_id(&self, id: InstituicaoId) -> Result<Option<Instituicao>> {
        let rows = self
            .client
            .query(
                &format!("SELECT {INSTITUICAO_COLUMNS} FROM instituicao WHERE id = $1"),
                &[id.as_uuid()],
            )
            .await?;
        Ok(self.instituicoes_from_rows(rows).await?.into_iter().next())
    }

    async fn find_by_cnpj(&self, cnpj: &Cnpj) -> Result<Option<Instituicao>> {
        let rows = self
            .client
            .query(
                &format!("SELECT {INSTITUICAO_COLUMNS} FROM instituicao WHERE cnpj = $1"),
                &[&cnpj.as_str()],
            )
            .await?;
        Ok(self.instituicoes_from_rows(rows).await?.into_iter().next())
    }

    async fn list(&self) -> Result<Vec<Instituicao>> {
        let rows = self
            .client
            .query(
                &format!("SELECT {INSTITUICAO_COLUMNS} FROM instituicao ORDER BY nome, id"),
                &[],
            )
            .await?;
        self.instituicoes_from_rows(rows).await
    }

    async fn vincular_medico(&self, id: InstituicaoId, medico_id: MedicoId) -> Result<bool> {
        let affected = self
            .client
            .execute(
                "INSERT INTO medico_instituicao (instituicao_id, medico_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
                &[id.as_uuid(), medico_id.as_uuid()],
            )
            .await?;
        Ok(affected == 1)
    }

    async fn desvincular_medico(&self, id: InstituicaoId, medico_id: MedicoId) -> Result<bool> {
        let affected = self
            .client
            .execute(
                "DELETE FROM medico_instituicao WHERE instituicao_id = $1 AND medico_id = $2",
                &[id.as_uuid(), medico_id.as_uuid()],
            )
            .await?;
        Ok(affected == 1)
    }
}

#[async_trait]
impl ConsultaRepository for PostgreSQLAdapter {
    async fn insert(&self, c: &Consulta) -> Result<()> {
        let instituicao_id = c.instituicao_id().map(|id| id.into_inner());
        self.client
            .execute(
                &format!(
                    "INSERT INTO consulta ({CONSULTA_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"
                ),
                &[
                    c.id().as_uuid(),
                    &c.data_hora(),
                    c.paciente_id().as_uuid(),
                    c.medico_id().as_uuid(),
                    &instituicao_id,
                    &c.observacao(),
                ],
            )
            .await?;
        Ok(())
    }

    async fn update(&self, c: &Consulta) -> Result<bool> {
        let instituicao_id = c.instituicao_id().map(|id| id.into_inner());
        let affected = self
            .client
            .execute(
                "UPDATE consulta SET data_hora = $2, paciente_id = $3, medico_id = $4, \
                 instituicao_id = $5, observacao = $6 WHERE id = $1",
                &[
                    c.id().as_uuid(),
                    &c.data_hora(),
                    c.paciente_id().as_uuid(),
                    c.medico_id().as_uuid(),
                    &instituicao_id,
                    &c.observacao(),
                ],
            )
            .await?;
        Ok(affected == 1)
    }

    async fn delete(&self, id: ConsultaId) -> Result<bool> {
        let affected = self
            .client
            .execute("DELETE FROM consulta WHERE id = $1", &[id.as_uuid()])
            .await?;
        Ok(affected == 1)
    }

    async fn find_by_id(&self, id: ConsultaId) -> Result<Option<Consulta>> {
        self.client
            .query_opt(
                &format!("SELECT {CONSULTA_COLUMNS} FROM consulta WHERE id = $1"),
                &[id.as_uuid()],
            )
            .await?
            .as_ref()
            .map(consulta_from_row)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Consulta>> {
        self.client
            .query(
                &format!("SELECT {CONSULTA_COLUMNS} FROM consulta ORDER BY data_hora, id"),
                &[],
            )
            .await?
            .iter()
            .map(consulta_from_row)
            .collect()
    }

    async fn list_by_paciente(&self, id: PacienteId) -> Result<Vec<Consulta>> {
        self.client
            .query(
                &format!(
                    "SELECT {CONSULTA_COLUMNS} FROM consulta WHERE paciente_id = $1 \
                     ORDER BY data_hora, id"
                ),
                &[id.as_uuid()],
            )
            .await?
            .iter()
            .map(consulta_from_row)
            .collect()
    }

    async fn list_by_medico(&self, id: MedicoId) -> Result<Vec<Consulta>> {
        self.client
            .query(
                &format!(
                    "SELECT {CONSULTA_COLUMNS} FROM consulta WHERE medico_id = $1 \
                     ORDER BY data_hora, id"
                ),
                &[id.as_uuid()],
            )
            .await?
            .iter()
            .map(consulta_from_row)
            .collect()
    }
}

#[async_trait]
impl ExameRepository for PostgreSQLAdapter {
    async fn insert(&self, x: &Exame) -> Result<()> {
        let consulta_id = x.consulta_id().map(|id| id.into_inner());
        self.client
            .execute(
                &format!(
                    "INSERT INTO exame ({EXAME_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
                ),
                &[
                    x.id().as_uuid(),
                    x.paciente_id().as_uuid(),
                    x.medico_id().as_uuid(),
                    &consulta_id,
                    &x.tipo(),
                    &x.data_realizacao(),
                    &x.resultado(),
                    &x.observacao(),
                ],
            )
            .await?;
        Ok(())
    }

    async fn update(&self, x: &Exame) -> Result<bool> {
        let consulta_id = x.consulta_id().map(|id| id.into_inner());
        let affected = self
            .client
            .execute(
                "UPDATE exame SET paciente_id = $2, medico_id = $3, consulta_id = $4, tipo = $5, \
                 data_realizacao = $6, resultado = $7, observacao = $8 WHERE id = $1",
                &[
                    x.id().as_uuid(),
                    x.paciente_id().as_uuid(),
                    x.medico_id().as_uuid(),
                    &consulta_id,
                    &x.tipo(),
                    &x.data_realizacao(),
                    &x.resultado(),
                    &x.observacao(),
                ],
            )
            .await?;
        Ok(affected == 1)
    }

    async fn delete(&self, id: ExameId) -> Result<bool> {
        let affected = self
            .client
            .execute("DELETE FROM exame WHERE id = $1", &[id.as_uuid()])
            .await?;
        Ok(affected == 1)
    }

    async fn find_by_id(&self, id: ExameId) -> Result<Option<Exame>> {
        self.client
            .query_opt(
                &format!("SELECT {EXAME_COLUMNS} FROM exame WHERE id = $1"),
                &[id.as_uuid()],
            )
            .await?
            .as_ref()
            .map(exame_from_row)
            .transpose()
    }

    async fn list_by_paciente(&self, id: PacienteId) -> Result<Vec<Exame>> {
        self.client
            .query(
                &format!(
                    "SELECT {EXAME_COLUMNS} FROM exame WHERE paciente_id = $1 \
                     ORDER BY data_realizacao, id"
                ),
                &[id.as_uuid()],
            )
            .await?
            .iter()
            .map(exame_from_row)
            .collect()
    }
}

#[async_trait]
impl HistoricoMedicoRepository for PostgreSQLAdapter {
    async fn insert(&self, h: &HistoricoMedico) -> Result<()> {
        let medico_id = h.medico_id().map(|id| id.into_inner());
        self.client
            .execute(
                &format!(
                    "INSERT INTO historicosmedico ({HISTORICO_COLUMNS}) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7)"
                ),
                &[
                    h.id().as_uuid(),
                    h.paciente_id().as_uuid(),
                    &medico_id,
                    &h.descricao(),
                    &h.diagnostico(),
                    &h.tratamento(),
                    &h.data_registro(),
                ],
            )
            .await?;
        Ok(())
    }

    async fn update(&self, h: &HistoricoMedico) -> Result<bool> {
        let medico_id = h.medico_id().map(|id| id.into_inner());
        let affected = self
            .client
            .execute(
                "UPDATE historicosmedico SET paciente_id = $2, medico_id = $3, descricao = $4, \
                 diagnostico = $5, tratamento = $6, data_registro = $7 WHERE id = $1",
                &[
                    h.id().as_uuid(),
                    h.paciente_id().as_uuid(),
                    &medico_id,
                    &h.descricao(),
                    &h.diagnostico(),
                    &h.tratamento(),
                    &h.data_registro(),
                ],
            )
            .await?;
        Ok(affected == 1)
    }

    async fn delete(&self, id: HistoricoMedicoId) -> Result<bool> {
        let affected = self
            .client
            .execute("DELETE FROM historicosmedico WHERE id = $1", &[id.as_uuid()])
            .await?;
        Ok(affected == 1)
    }

    async fn find_by_id(&self, id: HistoricoMedicoId) -> Result<Option<HistoricoMedico>> {
        self.client
            .query_opt(
                &format!("SELECT {HISTORICO_COLUMNS} FROM historicosmedico WHERE id = $1"),
                &[id.as_uuid()],
            )
            .await?
            .as_ref()
            .map(historico_from_row)
            .transpose()
    }

    async fn list_by_paciente(&self, id: PacienteId) -> Result<Vec<HistoricoMedico>> {
        self.client
            .query(
                &format!(
                    "SELECT {HISTORICO_COLUMNS} FROM historicosmedico WHERE paciente_id = $1 \
                     ORDER BY data_registro, id"
                ),
                &[id.as_uuid()],
            )
            .await?
            .iter()
            .map(historico_from_row)
            .collect()
    }
}

#[async_trait]
impl UsuarioRepository for PostgreSQLAdapter {
    async fn register(&self, usuario: &Usuario, conta: NovaConta<'_>) -> Result<()> {
        let mut conn = self.client.get_connection().await?;
        let tx = begin(&mut conn).await?;

        match conta {
            NovaConta::Admin => {}
            NovaConta::Paciente(paciente) => insert_paciente(&*tx, paciente).await?,
            NovaConta::Medico(medico) => insert_medico(&*tx, medico).await?,
            NovaConta::Instituicao(instituicao) => insert_instituicao(&*tx, instituicao).await?,
        }

        tx.execute(
            &format!("INSERT INTO usuario ({USUARIO_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"),
            &[
                usuario.id.as_uuid(),
                &usuario.email.as_str(),
                &usuario.password_hash,
                &usuario.role.as_str(),
                &usuario.entity_id,
                &usuario.created_at,
            ],
        )
        .await
        .map_err(|e| map_db_error("insert usuario", e))?;

        tx.commit()
            .await
            .map_err(|e| map_db_error("commit registration", e))?;

        tracing::debug!(usuario_id = %usuario.id, role = %usuario.role, "Account registered");
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Usuario>> {
        self.client
            .query_opt(
                &format!("SELECT {USUARIO_COLUMNS} FROM usuario WHERE email = $1"),
                &[&email.as_str()],
            )
            .await?
            .as_ref()
            .map(usuario_from_row)
            .transpose()
    }
}
