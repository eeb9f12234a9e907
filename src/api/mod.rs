//! REST API
//!
//! An axum [`Router`] over the application [`Services`]. Handlers check the
//! caller's [`Claims`](crate::core::auth::Claims) against a
//! [`Policy`](crate::core::auth::Policy) before touching a service; every
//! error leaves as an [`ApiError`](error::ApiError) JSON body.
//!
//! # Example
//!
//! ```rust
//! use clinidata::adapters::database::Repositories;
//! use clinidata::adapters::memory::MemoryStore;
//! use clinidata::api::{router, AppState};
//! use clinidata::config::parse_config;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = parse_config(
//!     r#"
//! database_target = "memory"
//! [auth]
//! jwt_secret = "0123456789abcdef0123456789abcdef"
//! "#,
//! )?;
//! let repos = Repositories::from_backend(Arc::new(MemoryStore::new()));
//! let app = router(Arc::new(AppState::new(&repos, &config)));
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;

use crate::adapters::database::{HealthCheck, Repositories};
use crate::config::{ClinidataConfig, ServerConfig};
use crate::core::services::Services;
use crate::domain::{ClinidataError, Result};
use axum::routing::{get, post};
use axum::Router;
use handlers::{
    auth as auth_routes, consultas, especialidades, exames, health, historicos, instituicoes,
    medicos, pacientes,
};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// State shared by every handler
pub struct AppState {
    pub services: Services,
    pub health: Arc<dyn HealthCheck>,
    pub request_timeout: Duration,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(repos: &Repositories, config: &ClinidataConfig) -> Self {
        Self {
            services: Services::new(repos, config),
            health: repos.health.clone(),
            request_timeout: Duration::from_secs(config.server.request_timeout_seconds),
        }
    }
}

/// Builds the full route table
pub fn router(state: SharedState) -> Router {
    let auth = Router::new()
        .route("/register/paciente", post(auth_routes::register_paciente))
        .route("/register/medico", post(auth_routes::register_medico))
        .route("/register/instituicao", post(auth_routes::register_instituicao))
        .route("/login", post(auth_routes::login))
        .route("/me", get(auth_routes::me));

    let api = Router::new()
        .nest("/Auth", auth)
        .route("/Pacientes", get(pacientes::list).post(pacientes::create))
        .route(
            "/Pacientes/:id",
            get(pacientes::get)
                .put(pacientes::update)
                .delete(pacientes::delete),
        )
        .route("/Pacientes/cpf/:cpf", get(pacientes::by_cpf))
        .route("/Medicos", get(medicos::list).post(medicos::create))
        .route(
            "/Medicos/:id",
            get(medicos::get).put(medicos::update).delete(medicos::delete),
        )
        .route(
            "/Medicos/especialidade/:id",
            get(medicos::by_especialidade),
        )
        .route(
            "/Especialidades",
            get(especialidades::list).post(especialidades::create),
        )
        .route(
            "/Especialidades/:id",
            get(especialidades::get).delete(especialidades::delete),
        )
        .route(
            "/Instituicoes",
            get(instituicoes::list).post(instituicoes::create),
        )
        .route(
            "/Instituicoes/:id",
            get(instituicoes::get)
                .put(instituicoes::update)
                .delete(instituicoes::delete),
        )
        .route("/MedicoInstituicao/:id", get(instituicoes::list_medicos))
        .route(
            "/MedicoInstituicao/:id/:medico_id",
            post(instituicoes::vincular_medico).delete(instituicoes::desvincular_medico),
        )
        .route("/Consultas", get(consultas::list).post(consultas::create))
        .route(
            "/Consultas/:id",
            get(consultas::get)
                .put(consultas::update)
                .delete(consultas::delete),
        )
        .route("/Consultas/paciente/:id", get(consultas::by_paciente))
        .route("/Consultas/medico/:id", get(consultas::by_medico))
        .route("/Exames", post(exames::create))
        .route(
            "/Exames/:id",
            get(exames::get).put(exames::update).delete(exames::delete),
        )
        .route("/Exames/paciente/:id", get(exames::by_paciente))
        .route("/HistoricosMedicos", post(historicos::create))
        .route(
            "/HistoricosMedicos/:id",
            get(historicos::get)
                .put(historicos::update)
                .delete(historicos::delete),
        )
        .route("/HistoricosMedicos/paciente/:id", get(historicos::by_paciente));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_timeout,
        ))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}

/// Serves the API until `shutdown` flips to `true`
///
/// In-flight requests get `server.shutdown_timeout_seconds` to finish; after
/// that the remaining connections are dropped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(
    state: SharedState,
    server: &ServerConfig,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let address = server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| ClinidataError::Io(format!("Failed to bind {address}: {e}")))?;
    tracing::info!(address = %address, "HTTP server listening");

    let mut graceful = shutdown.clone();
    let server_future = axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            stopped(&mut graceful).await;
            tracing::info!("Shutdown requested, draining in-flight requests");
        })
        .into_future();

    let grace = Duration::from_secs(server.shutdown_timeout_seconds);
    let mut deadline = shutdown;
    let grace_elapsed = async move {
        stopped(&mut deadline).await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server_future => result?,
        _ = grace_elapsed => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "Shutdown grace period elapsed, closing open connections"
            );
        }
    }

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Resolves once the flag is set; never resolves if the sender is gone
async fn stopped(shutdown: &mut watch::Receiver<bool>) {
    let sender_gone = shutdown.wait_for(|stop| *stop).await.is_err();
    if sender_gone {
        std::future::pending::<()>().await;
    }
}
