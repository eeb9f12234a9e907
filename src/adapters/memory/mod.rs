//! In-memory storage backend
//!
//! Keeps every aggregate behind one [`RwLock`], so each repository call is
//! atomic. Mirrors the PostgreSQL schema rules: unique keys, references that
//! must exist, CASCADE / RESTRICT / SET NULL on delete. Lists come back in
//! the same order as the SQL backend.

use crate::adapters::database::traits::{
    ConsultaRepository, EspecialidadeRepository, ExameRepository, HealthCheck,
    HistoricoMedicoRepository, InstituicaoRepository, MedicoRepository, NovaConta,
    PacienteRepository, UsuarioRepository,
};
use crate::domain::entities::especialidade::chave_nome;
use crate::domain::{
    ClinidataError, Cnpj, Consulta, ConsultaId, Cpf, Crm, DadosConsulta, DadosExame,
    DadosHistorico, Email, Especialidade, EspecialidadeId, Exame, ExameId, HistoricoMedico,
    HistoricoMedicoId, Instituicao, InstituicaoId, Medico, MedicoId, Paciente, PacienteId, Result,
    Usuario, UsuarioId,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

const REFERENCIA_INVALIDA: &str =
    "registro referenciado por outros dados ou referência inexistente";

fn conflito(message: &str) -> ClinidataError {
    ClinidataError::Conflict(message.to_string())
}

#[derive(Default)]
struct MemoryState {
    pacientes: HashMap<PacienteId, Paciente>,
    medicos: HashMap<MedicoId, Medico>,
    especialidades: HashMap<EspecialidadeId, Especialidade>,
    instituicoes: HashMap<InstituicaoId, Instituicao>,
    consultas: HashMap<ConsultaId, Consulta>,
    exames: HashMap<ExameId, Exame>,
    historicos: HashMap<HistoricoMedicoId, HistoricoMedico>,
    usuarios: HashMap<UsuarioId, Usuario>,
}

impl MemoryState {
    fn check_paciente(&self, p: &Paciente) -> Result<()> {
        if self
            .pacientes
            .values()
            .any(|other| other.id() != p.id() && other.cpf() == p.cpf())
        {
            return Err(conflito("CPF já cadastrado"));
        }
        Ok(())
    }

    fn check_medico(&self, m: &Medico) -> Result<()> {
        let others = || self.medicos.values().filter(|other| other.id() != m.id());
        if others().any(|other| other.crm() == m.crm()) {
            return Err(conflito("CRM já cadastrado"));
        }
        if others().any(|other| other.email() == m.email()) {
            return Err(conflito("e-mail de médico já cadastrado"));
        }
        if !self.especialidades.contains_key(&m.especialidade_id()) {
            return Err(conflito(REFERENCIA_INVALIDA));
        }
        Ok(())
    }

    fn check_instituicao(&self, i: &Instituicao) -> Result<()> {
        if self
            .instituicoes
            .values()
            .any(|other| other.id() != i.id() && other.cnpj() == i.cnpj())
        {
            return Err(conflito("CNPJ já cadastrado"));
        }
        if i.medicos().iter().any(|m| !self.medicos.contains_key(m)) {
            return Err(conflito(REFERENCIA_INVALIDA));
        }
        Ok(())
    }

    fn check_consulta(&self, c: &Consulta) -> Result<()> {
        let instituicao_ok = c
            .instituicao_id()
            .map_or(true, |id| self.instituicoes.contains_key(&id));
        if !self.pacientes.contains_key(&c.paciente_id())
            || !self.medicos.contains_key(&c.medico_id())
            || !instituicao_ok
        {
            return Err(conflito(REFERENCIA_INVALIDA));
        }
        Ok(())
    }

    fn check_exame(&self, x: &Exame) -> Result<()> {
        let consulta_ok = x
            .consulta_id()
            .map_or(true, |id| self.consultas.contains_key(&id));
        if !self.pacientes.contains_key(&x.paciente_id())
            || !self.medicos.contains_key(&x.medico_id())
            || !consulta_ok
        {
            return Err(conflito(REFERENCIA_INVALIDA));
        }
        Ok(())
    }

    fn check_historico(&self, h: &HistoricoMedico) -> Result<()> {
        let medico_ok = h
            .medico_id()
            .map_or(true, |id| self.medicos.contains_key(&id));
        if !self.pacientes.contains_key(&h.paciente_id()) || !medico_ok {
            return Err(conflito(REFERENCIA_INVALIDA));
        }
        Ok(())
    }

    fn check_usuario(&self, u: &Usuario) -> Result<()> {
        if self.usuarios.values().any(|other| other.email == u.email) {
            return Err(conflito("e-mail já cadastrado"));
        }
        Ok(())
    }

    /// Fails when another account already logs in with `email`
    fn check_conta_livre(&self, entity_id: Uuid, email: &Email) -> Result<()> {
        if self
            .usuarios
            .values()
            .any(|u| &u.email == email && u.entity_id != Some(entity_id))
        {
            return Err(conflito("e-mail já cadastrado"));
        }
        Ok(())
    }

    fn mover_conta(&mut self, entity_id: Uuid, email: &Email) {
        for usuario in self.usuarios.values_mut() {
            if usuario.entity_id == Some(entity_id) {
                usuario.email = email.clone();
            }
        }
    }

    fn remover_contas(&mut self, entity_id: Uuid) {
        self.usuarios.retain(|_, u| u.entity_id != Some(entity_id));
    }
}

fn sorted_by_nome<T>(mut items: Vec<T>, key: impl Fn(&T) -> (String, Uuid)) -> Vec<T> {
    items.sort_by_cached_key(key);
    items
}

fn consulta_sem_instituicao(c: &Consulta) -> Consulta {
    Consulta::from_parts(
        c.id(),
        DadosConsulta {
            data_hora: c.data_hora(),
            paciente_id: c.paciente_id(),
            medico_id: c.medico_id(),
            instituicao_id: None,
            observacao: c.observacao().map(str::to_string),
        },
    )
}

fn exame_sem_consulta(x: &Exame) -> Exame {
    Exame::from_parts(
        x.id(),
        DadosExame {
            paciente_id: x.paciente_id(),
            medico_id: x.medico_id(),
            consulta_id: None,
            tipo: x.tipo().to_string(),
            data_realizacao: x.data_realizacao(),
            resultado: x.resultado().map(str::to_string),
            observacao: x.observacao().map(str::to_string),
        },
    )
}

fn historico_sem_medico(h: &HistoricoMedico) -> HistoricoMedico {
    HistoricoMedico::from_parts(
        h.id(),
        DadosHistorico {
            paciente_id: h.paciente_id(),
            medico_id: None,
            descricao: h.descricao().to_string(),
            diagnostico: h.diagnostico().map(str::to_string),
            tratamento: h.tratamento().map(str::to_string),
            data_registro: h.data_registro(),
        },
    )
}

/// In-memory implementation of every repository trait
///
/// Used by tests and by `database_target = "memory"` in development.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl PacienteRepository for MemoryStore {
    async fn insert(&self, paciente: &Paciente) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_paciente(paciente)?;
        state.pacientes.insert(paciente.id(), paciente.clone());
        Ok(())
    }

    async fn update(&self, paciente: &Paciente) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.pacientes.contains_key(&paciente.id()) {
            return Ok(false);
        }
        state.check_paciente(paciente)?;
        state.check_conta_livre(paciente.id().into_inner(), paciente.email())?;
        state.pacientes.insert(paciente.id(), paciente.clone());
        state.mover_conta(paciente.id().into_inner(), paciente.email());
        Ok(true)
    }

    async fn delete(&self, id: PacienteId) -> Result<bool> {
        let mut state = self.state.write().await;
        if state.pacientes.remove(&id).is_none() {
            return Ok(false);
        }
        let consultas: Vec<ConsultaId> = state
            .consultas
            .values()
            .filter(|c| c.paciente_id() == id)
            .map(|c| c.id())
            .collect();
        for consulta_id in &consultas {
            state.consultas.remove(consulta_id);
        }
        state.exames.retain(|_, x| x.paciente_id() != id);
        // SET NULL for exams of other patients
        for exame in state.exames.values_mut() {
            if exame.consulta_id().is_some_and(|c| consultas.contains(&c)) {
                *exame = exame_sem_consulta(exame);
            }
        }
        state.historicos.retain(|_, h| h.paciente_id() != id);
        state.remover_contas(id.into_inner());
        Ok(true)
    }

    async fn find_by_id(&self, id: PacienteId) -> Result<Option<Paciente>> {
        Ok(self.state.read().await.pacientes.get(&id).cloned())
    }

    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Option<Paciente>> {
        let state = self.state.read().await;
        Ok(state.pacientes.values().find(|p| p.cpf() == cpf).cloned())
    }

    async fn list(&self) -> Result<Vec<Paciente>> {
        let state = self.state.read().await;
        Ok(sorted_by_nome(
            state.pacientes.values().cloned().collect(),
            |p| (p.nome().to_string(), p.id().into_inner()),
        ))
    }
}

#[async_trait]
impl MedicoRepository for MemoryStore {
    async fn insert(&self, medico: &Medico) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_medico(medico)?;
        state.medicos.insert(medico.id(), medico.clone());
        Ok(())
    }

    async fn update(&self, medico: &Medico) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.medicos.contains_key(&medico.id()) {
            return Ok(false);
        }
        state.check_medico(medico)?;
        state.check_conta_livre(medico.id().into_inner(), medico.email())?;
        state.medicos.insert(medico.id(), medico.clone());
        state.mover_conta(medico.id().into_inner(), medico.email());
        Ok(true)
    }

    async fn delete(&self, id: MedicoId) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.medicos.contains_key(&id) {
            return Ok(false);
        }
        if state.consultas.values().any(|c| c.medico_id() == id)
            || state.exames.values().any(|x| x.medico_id() == id)
        {
            return Err(conflito(REFERENCIA_INVALIDA));
        }
        state.medicos.remove(&id);
        for historico in state.historicos.values_mut() {
            if historico.medico_id() == Some(id) {
                *historico = historico_sem_medico(historico);
            }
        }
        for instituicao in state.instituicoes.values_mut() {
            instituicao.desvincular_medico(id);
        }
        state.remover_contas(id.into_inner());
        Ok(true)
    }

    async fn find_by_id(&self, id: MedicoId) -> Result<Option<Medico>> {
        Ok(self.state.read().await.medicos.get(&id).cloned())
    }

    async fn find_by_crm(&self, crm: &Crm) -> Result<Option<Medico>> {
        let state = self.state.read().await;
        Ok(state.medicos.values().find(|m| m.crm() == crm).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Medico>> {
        let state = self.state.read().await;
        Ok(state.medicos.values().find(|m| m.email() == email).cloned())
    }

    async fn list(&self) -> Result<Vec<Medico>> {
        let state = self.state.read().await;
        Ok(sorted_by_nome(
            state.medicos.values().cloned().collect(),
            |m| (m.nome().to_string(), m.id().into_inner()),
        ))
    }

    async fn list_by_especialidade(&self, id: EspecialidadeId) -> Result<Vec<Medico>> {
        let state = self.state.read().await;
        Ok(sorted_by_nome(
            state
                .medicos
                .values()
                .filter(|m| m.especialidade_id() == id)
                .cloned()
                .collect(),
            |m| (m.nome().to_string(), m.id().into_inner()),
        ))
    }

    async fn list_by_ids(&self, ids: &[MedicoId]) -> Result<Vec<Medico>> {
        let state = self.state.read().await;
        Ok(sorted_by_nome(
            ids.iter()
                .filter_map(|id| state.medicos.get(id))
                .cloned()
                .collect(),
            |m| (m.nome().to_string(), m.id().into_inner()),
        ))
    }
}

#[async_trait]
impl EspecialidadeRepository for MemoryStore {
    async fn insert(&self, especialidade: &Especialidade) -> Result<()> {
        let mut state = self.state.write().await;
        let chave = especialidade.chave();
        if state.especialidades.values().any(|e| e.chave() == chave) {
            return Err(conflito("especialidade já cadastrada"));
        }
        state
            .especialidades
            .insert(especialidade.id(), especialidade.clone());
        Ok(())
    }

    async fn delete(&self, id: EspecialidadeId) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.especialidades.contains_key(&id) {
            return Ok(false);
        }
        if state.medicos.values().any(|m| m.especialidade_id() == id) {
            return Err(conflito(REFERENCIA_INVALIDA));
        }
        state.especialidades.remove(&id);
        Ok(true)
    }

    async fn find_by_id(&self, id: EspecialidadeId) -> Result<Option<Especialidade>> {
        Ok(self.state.read().await.especialidades.get(&id).cloned())
    }

    async fn find_by_nome(&self, nome: &str) -> Result<Option<Especialidade>> {
        let chave = chave_nome(nome);
        let state = self.state.read().await;
        Ok(state
            .especialidades
            .values()
            .find(|e| e.chave() == chave)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Especialidade>> {
        let state = self.state.read().await;
        Ok(sorted_by_nome(
            state.especialidades.values().cloned().collect(),
            |e| (e.nome().to_string(), e.id().into_inner()),
        ))
    }
}

#[async_trait]
impl InstituicaoRepository for MemoryStore {
    async fn insert(&self, instituicao: &Instituicao) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_instituicao(instituicao)?;
        state
            .instituicoes
            .insert(instituicao.id(), instituicao.clone());
        Ok(())
    }

    async fn update(&self, instituicao: &Instituicao) -> Result<bool> {
        let mut state = self.state.write().await;
        let Some(existente) = state.instituicoes.get(&instituicao.id()) else {
            return Ok(false);
        };

        // Links are managed through vincular/desvincular only
        let mut atualizada = instituicao.clone();
        let informados: Vec<MedicoId> = atualizada.medicos().iter().copied().collect();
        for medico_id in informados {
            atualizada.desvincular_medico(medico_id);
        }
        for medico_id in existente.medicos() {
            atualizada.vincular_medico(*medico_id);
        }

        state.check_instituicao(&atualizada)?;
        state.check_conta_livre(atualizada.id().into_inner(), atualizada.email())?;
        state.mover_conta(atualizada.id().into_inner(), atualizada.email());
        state.instituicoes.insert(atualizada.id(), atualizada);
        Ok(true)
    }

    async fn delete(&self, id: InstituicaoId) -> Result<bool> {
        let mut state = self.state.write().await;
        if state.instituicoes.remove(&id).is_none() {
            return Ok(false);
        }
        for consulta in state.consultas.values_mut() {
            if consulta.instituicao_id() == Some(id) {
                *consulta = consulta_sem_instituicao(consulta);
            }
        }
        state.remover_contas(id.into_inner());
        Ok(true)
    }

    async fn find_by_id(&self, id: InstituicaoId) -> Result<Option<Instituicao>> {
        Ok(self.state.read().await.instituicoes.get(&id).cloned())
    }

    async fn find_by_cnpj(&self, cnpj: &Cnpj) -> Result<Option<Instituicao>> {
        let state = self.state.read().await;
        Ok(state
            .instituicoes
            .values()
            .find(|i| i.cnpj() == cnpj)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Instituicao>> {
        let state = self.state.read().await;
        Ok(sorted_by_nome(
            state.instituicoes.values().cloned().collect(),
            |i| (i.nome().to_string(), i.id().into_inner()),
        ))
    }

    async fn vincular_medico(&self, id: InstituicaoId, medico_id: MedicoId) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.medicos.contains_key(&medico_id) {
            return Err(conflito(REFERENCIA_INVALIDA));
        }
        match state.instituicoes.get_mut(&id) {
            Some(instituicao) => Ok(instituicao.vincular_medico(medico_id)),
            None => Err(conflito(REFERENCIA_INVALIDA)),
        }
    }

    async fn desvincular_medico(&self, id: InstituicaoId, medico_id: MedicoId) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state
            .instituicoes
            .get_mut(&id)
            .is_some_and(|instituicao| instituicao.desvincular_medico(medico_id)))
    }
}

#[async_trait]
impl ConsultaRepository for MemoryStore {
    async fn insert(&self, consulta: &Consulta) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_consulta(consulta)?;
        state.consultas.insert(consulta.id(), consulta.clone());
        Ok(())
    }

    async fn update(&self, consulta: &Consulta) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.consultas.contains_key(&consulta.id()) {
            return Ok(false);
        }
        state.check_consulta(consulta)?;
        state.consultas.insert(consulta.id(), consulta.clone());
        Ok(true)
    }

    async fn delete(&self, id: ConsultaId) -> Result<bool> {
        let mut state = self.state.write().await;
        if state.consultas.remove(&id).is_none() {
            return Ok(false);
        }
        for exame in state.exames.values_mut() {
            if exame.consulta_id() == Some(id) {
                *exame = exame_sem_consulta(exame);
            }
        }
        Ok(true)
    }

    async fn find_by_id(&self, id: ConsultaId) -> Result<Option<Consulta>> {
        Ok(self.state.read().await.consultas.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Consulta>> {
        let state = self.state.read().await;
        let mut consultas: Vec<Consulta> = state.consultas.values().cloned().collect();
        consultas.sort_by_key(|c| (c.data_hora(), c.id()));
        Ok(consultas)
    }

    async fn list_by_paciente(&self, id: PacienteId) -> Result<Vec<Consulta>> {
        let state = self.state.read().await;
        let mut consultas: Vec<Consulta> = state
            .consultas
            .values()
            .filter(|c| c.paciente_id() == id)
            .cloned()
            .collect();
        consultas.sort_by_key(|c| (c.data_hora(), c.id()));
        Ok(consultas)
    }

    async fn list_by_medico(&self, id: MedicoId) -> Result<Vec<Consulta>> {
        let state = self.state.read().await;
        let mut consultas: Vec<Consulta> = state
            .consultas
            .values()
            .filter(|c| c.medico_id() == id)
            .cloned()
            .collect();
        consultas.sort_by_key(|c| (c.data_hora(), c.id()));
        Ok(consultas)
    }
}

#[async_trait]
impl ExameRepository for MemoryStore {
    async fn insert(&self, exame: &Exame) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_exame(exame)?;
        state.exames.insert(exame.id(), exame.clone());
        Ok(())
    }

    async fn update(&self, exame: &Exame) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.exames.contains_key(&exame.id()) {
            return Ok(false);
        }
        state.check_exame(exame)?;
        state.exames.insert(exame.id(), exame.clone());
        Ok(true)
    }

    async fn delete(&self, id: ExameId) -> Result<bool> {
        Ok(self.state.write().await.exames.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: ExameId) -> Result<Option<Exame>> {
        Ok(self.state.read().await.exames.get(&id).cloned())
    }

    async fn list_by_paciente(&self, id: PacienteId) -> Result<Vec<Exame>> {
        let state = self.state.read().await;
        let mut exames: Vec<Exame> = state
            .exames
            .values()
            .filter(|x| x.paciente_id() == id)
            .cloned()
            .collect();
        exames.sort_by_key(|x| (x.data_realizacao(), x.id()));
        Ok(exames)
    }
}

#[async_trait]
impl HistoricoMedicoRepository for MemoryStore {
    async fn insert(&self, historico: &HistoricoMedico) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_historico(historico)?;
        state.historicos.insert(historico.id(), historico.clone());
        Ok(())
    }

    async fn update(&self, historico: &HistoricoMedico) -> Result<bool> {
        let mut state = self.state.write().await;
        if !state.historicos.contains_key(&historico.id()) {
            return Ok(false);
        }
        state.check_historico(historico)?;
        state.historicos.insert(historico.id(), historico.clone());
        Ok(true)
    }

    async fn delete(&self, id: HistoricoMedicoId) -> Result<bool> {
        Ok(self.state.write().await.historicos.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: HistoricoMedicoId) -> Result<Option<HistoricoMedico>> {
        Ok(self.state.read().await.historicos.get(&id).cloned())
    }

    async fn list_by_paciente(&self, id: PacienteId) -> Result<Vec<HistoricoMedico>> {
        let state = self.state.read().await;
        let mut historicos: Vec<HistoricoMedico> = state
            .historicos
            .values()
            .filter(|h| h.paciente_id() == id)
            .cloned()
            .collect();
        historicos.sort_by_key(|h| (h.data_registro(), h.id()));
        Ok(historicos)
    }
}

#[async_trait]
impl UsuarioRepository for MemoryStore {
    async fn register(&self, usuario: &Usuario, conta: NovaConta<'_>) -> Result<()> {
        let mut state = self.state.write().await;
        state.check_usuario(usuario)?;

        match conta {
            NovaConta::Admin => {}
            NovaConta::Paciente(paciente) => {
                state.check_paciente(paciente)?;
                state.pacientes.insert(paciente.id(), paciente.clone());
            }
            NovaConta::Medico(medico) => {
                state.check_medico(medico)?;
                state.medicos.insert(medico.id(), medico.clone());
            }
            NovaConta::Instituicao(instituicao) => {
                state.check_instituicao(instituicao)?;
                state
                    .instituicoes
                    .insert(instituicao.id(), instituicao.clone());
            }
        }

        state.usuarios.insert(usuario.id, usuario.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Usuario>> {
        let state = self.state.read().await;
        Ok(state.usuarios.values().find(|u| &u.email == email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures;
    use crate::domain::Role;

    async fn store_com_medico() -> (MemoryStore, Medico) {
        let store = MemoryStore::new();
        let especialidade = fixtures::especialidade("Cardiologia");
        EspecialidadeRepository::insert(&store, &especialidade)
            .await
            .unwrap();
        let medico = fixtures::medico("123456/SP", "carlos@clinica.com", especialidade.id());
        MedicoRepository::insert(&store, &medico).await.unwrap();
        (store, medico)
    }

    #[tokio::test]
    async fn test_duplicate_cpf_is_conflict() {
        let store = MemoryStore::new();
        PacienteRepository::insert(&store, &fixtures::paciente("Ana", "529.982.247-25"))
            .await
            .unwrap();

        let result =
            PacienteRepository::insert(&store, &fixtures::paciente("Bia", "52998224725")).await;
        assert!(matches!(result, Err(ClinidataError::Conflict(_))));
        assert_eq!(PacienteRepository::list(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_returns_false() {
        let store = MemoryStore::new();
        let paciente = fixtures::paciente("Ana", "529.982.247-25");
        assert!(!PacienteRepository::update(&store, &paciente).await.unwrap());
        assert!(!PacienteRepository::delete(&store, paciente.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_paciente_cascades() {
        let (store, medico) = store_com_medico().await;
        let paciente = fixtures::paciente("Ana", "529.982.247-25");
        PacienteRepository::insert(&store, &paciente).await.unwrap();
        let consulta = fixtures::consulta(paciente.id(), medico.id(), 3);
        ConsultaRepository::insert(&store, &consulta).await.unwrap();
        ExameRepository::insert(
            &store,
            &fixtures::exame(paciente.id(), medico.id(), Some(consulta.id())),
        )
        .await
        .unwrap();
        HistoricoMedicoRepository::insert(&store, &fixtures::historico(paciente.id(), None))
            .await
            .unwrap();

        assert!(PacienteRepository::delete(&store, paciente.id()).await.unwrap());

        assert!(ConsultaRepository::list(&store).await.unwrap().is_empty());
        assert!(ExameRepository::list_by_paciente(&store, paciente.id())
            .await
            .unwrap()
            .is_empty());
        assert!(HistoricoMedicoRepository::list_by_paciente(&store, paciente.id())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_delete_referenced_medico_is_conflict() {
        let (store, medico) = store_com_medico().await;
        let paciente = fixtures::paciente("Ana", "529.982.247-25");
        PacienteRepository::insert(&store, &paciente).await.unwrap();
        ConsultaRepository::insert(&store, &fixtures::consulta(paciente.id(), medico.id(), 3))
            .await
            .unwrap();

        let result = MedicoRepository::delete(&store, medico.id()).await;
        assert!(matches!(result, Err(ClinidataError::Conflict(_))));
        assert!(MedicoRepository::find_by_id(&store, medico.id())
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_delete_medico_clears_history_and_links() {
        let (store, medico) = store_com_medico().await;
        let paciente = fixtures::paciente("Ana", "529.982.247-25");
        PacienteRepository::insert(&store, &paciente).await.unwrap();
        let historico = fixtures::historico(paciente.id(), Some(medico.id()));
        HistoricoMedicoRepository::insert(&store, &historico)
            .await
            .unwrap();
        let instituicao = fixtures::instituicao("Hospital", "11.222.333/0001-81");
        InstituicaoRepository::insert(&store, &instituicao)
            .await
            .unwrap();
        assert!(store
            .vincular_medico(instituicao.id(), medico.id())
            .await
            .unwrap());

        assert!(MedicoRepository::delete(&store, medico.id()).await.unwrap());

        let historico = HistoricoMedicoRepository::find_by_id(&store, historico.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(historico.medico_id(), None);
        let instituicao = InstituicaoRepository::find_by_id(&store, instituicao.id())
            .await
            .unwrap()
            .unwrap();
        assert!(instituicao.medicos().is_empty());
    }

    #[tokio::test]
    async fn test_especialidade_rules() {
        let (store, medico) = store_com_medico().await;

        let duplicada = fixtures::especialidade("CARDIOLOGIA");
        let result = EspecialidadeRepository::insert(&store, &duplicada).await;
        assert!(matches!(result, Err(ClinidataError::Conflict(_))));

        let found = EspecialidadeRepository::find_by_nome(&store, " cardiologia ")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id(), medico.especialidade_id());

        let result = EspecialidadeRepository::delete(&store, found.id()).await;
        assert!(matches!(result, Err(ClinidataError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_vincular_is_idempotent() {
        let (store, medico) = store_com_medico().await;
        let instituicao = fixtures::instituicao("Hospital", "11.222.333/0001-81");
        InstituicaoRepository::insert(&store, &instituicao)
            .await
            .unwrap();

        assert!(store
            .vincular_medico(instituicao.id(), medico.id())
            .await
            .unwrap());
        assert!(!store
            .vincular_medico(instituicao.id(), medico.id())
            .await
            .unwrap());

        // Update keeps links even when the value carries none
        assert!(InstituicaoRepository::update(&store, &instituicao)
            .await
            .unwrap());
        let stored = InstituicaoRepository::find_by_id(&store, instituicao.id())
            .await
            .unwrap()
            .unwrap();
        assert!(stored.possui_medico(medico.id()));

        assert!(store
            .desvincular_medico(instituicao.id(), medico.id())
            .await
            .unwrap());
        assert!(!store
            .desvincular_medico(instituicao.id(), medico.id())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_delete_consulta_detaches_exames() {
        let (store, medico) = store_com_medico().await;
        let paciente = fixtures::paciente("Ana", "529.982.247-25");
        PacienteRepository::insert(&store, &paciente).await.unwrap();
        let consulta = fixtures::consulta(paciente.id(), medico.id(), 3);
        ConsultaRepository::insert(&store, &consulta).await.unwrap();
        let exame = fixtures::exame(paciente.id(), medico.id(), Some(consulta.id()));
        ExameRepository::insert(&store, &exame).await.unwrap();

        assert!(ConsultaRepository::delete(&store, consulta.id()).await.unwrap());

        let exame = ExameRepository::find_by_id(&store, exame.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(exame.consulta_id(), None);
    }

    #[tokio::test]
    async fn test_consulta_requires_existing_references() {
        let (store, medico) = store_com_medico().await;
        let consulta = fixtures::consulta(PacienteId::new(), medico.id(), 3);
        let result = ConsultaRepository::insert(&store, &consulta).await;
        assert!(matches!(result, Err(ClinidataError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_consultas_sorted_by_date() {
        let (store, medico) = store_com_medico().await;
        let paciente = fixtures::paciente("Ana", "529.982.247-25");
        PacienteRepository::insert(&store, &paciente).await.unwrap();
        for dia in [20, 5, 12] {
            ConsultaRepository::insert(&store, &fixtures::consulta(paciente.id(), medico.id(), dia))
                .await
                .unwrap();
        }

        let dias: Vec<u32> = ConsultaRepository::list_by_medico(&store, medico.id())
            .await
            .unwrap()
            .iter()
            .map(|c| chrono::Datelike::day(&c.data_hora()))
            .collect();
        assert_eq!(dias, vec![5, 12, 20]);
    }

    #[tokio::test]
    async fn test_register_is_atomic() {
        let store = MemoryStore::new();
        let email = Email::parse("ana@exemplo.com").unwrap();
        let primeiro = fixtures::paciente("Ana", "529.982.247-25");
        let usuario = Usuario::new(
            email.clone(),
            "hash".to_string(),
            Role::Paciente,
            Some(primeiro.id().into_inner()),
        );
        store
            .register(&usuario, NovaConta::Paciente(&primeiro))
            .await
            .unwrap();

        // Same e-mail: neither the account nor the patient is stored
        let segundo = fixtures::paciente("Bia", "111.444.777-35");
        let outro = Usuario::new(
            email.clone(),
            "hash".to_string(),
            Role::Paciente,
            Some(segundo.id().into_inner()),
        );
        let result = store.register(&outro, NovaConta::Paciente(&segundo)).await;
        assert!(matches!(result, Err(ClinidataError::Conflict(_))));
        assert!(PacienteRepository::find_by_id(&store, segundo.id())
            .await
            .unwrap()
            .is_none());

        assert!(PacienteRepository::delete(&store, primeiro.id()).await.unwrap());
        assert!(UsuarioRepository::find_by_email(&store, &email)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_moves_login_email() {
        let store = MemoryStore::new();
        let ana = fixtures::paciente("Ana", "529.982.247-25");
        let conta = Usuario::new(
            ana.email().clone(),
            "hash".to_string(),
            Role::Paciente,
            Some(ana.id().into_inner()),
        );
        store.register(&conta, NovaConta::Paciente(&ana)).await.unwrap();
        let bia = fixtures::paciente("Bia", "111.444.777-35");
        let outra = Usuario::new(
            bia.email().clone(),
            "hash".to_string(),
            Role::Paciente,
            Some(bia.id().into_inner()),
        );
        store.register(&outra, NovaConta::Paciente(&bia)).await.unwrap();

        let mut dados = fixtures::dados_paciente("Ana", "529.982.247-25");
        dados.email = Email::parse("nova@exemplo.com").unwrap();
        let mut atualizada = ana.clone();
        atualizada.atualizar_dados(dados, fixtures::hoje()).unwrap();
        assert!(PacienteRepository::update(&store, &atualizada).await.unwrap());

        let movida = UsuarioRepository::find_by_email(&store, atualizada.email())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(movida.id, conta.id);
        assert!(UsuarioRepository::find_by_email(&store, ana.email())
            .await
            .unwrap()
            .is_none());

        // Taking another account's login leaves both records untouched
        let mut dados = fixtures::dados_paciente("Ana", "529.982.247-25");
        dados.email = bia.email().clone();
        let mut invasora = atualizada.clone();
        invasora.atualizar_dados(dados, fixtures::hoje()).unwrap();
        let result = PacienteRepository::update(&store, &invasora).await;
        assert!(matches!(result, Err(ClinidataError::Conflict(_))));
        let guardada = PacienteRepository::find_by_id(&store, ana.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(guardada.email(), atualizada.email());
    }
}
