//! Database abstraction layer
//!
//! Trait-based repositories that let CliniData run on PostgreSQL or on the
//! in-memory store.

pub mod factory;
pub mod traits;

pub use factory::create_repositories;
pub use traits::{
    ConsultaRepository, EspecialidadeRepository, ExameRepository, HealthCheck,
    HistoricoMedicoRepository, InstituicaoRepository, MedicoRepository, NovaConta,
    PacienteRepository, Repositories, UsuarioRepository,
};
