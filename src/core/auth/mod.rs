//! Authentication and authorization
//!
//! Accounts ([`Usuario`]) are created by self-registration, which stores the
//! Paciente, Medico or Instituicao and its login in one step, or by the
//! admin bootstrap on `serve`. A successful login yields an HS256 token
//! whose [`Claims`] the HTTP layer checks against a [`Policy`].

pub mod password;
pub mod policy;
pub mod token;

pub use policy::Policy;
pub use token::{Claims, IssuedToken, TokenIssuer};

use crate::adapters::database::{NovaConta, Repositories, UsuarioRepository};
use crate::config::ValidationConfig;
use crate::core::dto::{
    LoginRequest, RegisterInstituicaoRequest, RegisterMedicoRequest, RegisterPacienteRequest,
    TokenResponse,
};
use crate::core::services::{InstituicaoService, MedicoService, PacienteService};
use crate::domain::{ClinidataError, Email, Result, Role, Usuario};
use std::sync::Arc;
use uuid::Uuid;

const TOKEN_TYPE: &str = "Bearer";
const CREDENCIAIS_INVALIDAS: &str = "credenciais inválidas";

#[derive(Clone)]
pub struct AuthService {
    usuarios: Arc<dyn UsuarioRepository>,
    pacientes: PacienteService,
    medicos: MedicoService,
    instituicoes: InstituicaoService,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(repos: &Repositories, tokens: TokenIssuer, validation: ValidationConfig) -> Self {
        Self {
            usuarios: repos.usuarios.clone(),
            pacientes: PacienteService::new(repos, validation.clone()),
            medicos: MedicoService::new(repos),
            instituicoes: InstituicaoService::new(repos, validation),
            tokens,
        }
    }

    async fn ensure_email_free(&self, email: &Email) -> Result<()> {
        if self.usuarios.find_by_email(email).await?.is_some() {
            return Err(ClinidataError::Conflict("e-mail já cadastrado".to_string()));
        }
        Ok(())
    }

    /// Hashes the password and stores the account together with its entity
    async fn open_account(
        &self,
        email: &Email,
        password: &str,
        role: Role,
        entity_id: Uuid,
        conta: NovaConta<'_>,
    ) -> Result<TokenResponse> {
        let hash = password::hash_password(password)?;
        let usuario = Usuario::new(email.clone(), hash, role, Some(entity_id));
        self.usuarios.register(&usuario, conta).await?;

        tracing::info!(usuario_id = %usuario.id, role = %role, "Account registered");
        self.token_for(&usuario)
    }

    fn token_for(&self, usuario: &Usuario) -> Result<TokenResponse> {
        let issued = self.tokens.issue(usuario)?;
        Ok(TokenResponse {
            token: issued.token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: issued.expires_in,
            role: usuario.role,
        })
    }

    pub async fn register_paciente(
        &self,
        request: RegisterPacienteRequest,
    ) -> Result<TokenResponse> {
        password::check_strength(&request.password)?;
        let paciente = self.pacientes.prepare(request.paciente).await?;
        self.ensure_email_free(paciente.email()).await?;

        self.open_account(
            paciente.email(),
            &request.password,
            Role::Paciente,
            paciente.id().into_inner(),
            NovaConta::Paciente(&paciente),
        )
        .await
    }

    pub async fn register_medico(&self, request: RegisterMedicoRequest) -> Result<TokenResponse> {
        password::check_strength(&request.password)?;
        let medico = self.medicos.prepare(request.medico).await?;
        self.ensure_email_free(medico.email()).await?;

        self.open_account(
            medico.email(),
            &request.password,
            Role::Medico,
            medico.id().into_inner(),
            NovaConta::Medico(&medico),
        )
        .await
    }

    pub async fn register_instituicao(
        &self,
        request: RegisterInstituicaoRequest,
    ) -> Result<TokenResponse> {
        password::check_strength(&request.password)?;
        let instituicao = self.instituicoes.prepare(request.instituicao).await?;
        self.ensure_email_free(instituicao.email()).await?;

        self.open_account(
            instituicao.email(),
            &request.password,
            Role::Instituicao,
            instituicao.id().into_inner(),
            NovaConta::Instituicao(&instituicao),
        )
        .await
    }

    /// Unknown e-mail and wrong password fail with the same message
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse> {
        let invalid = || ClinidataError::Authentication(CREDENCIAIS_INVALIDAS.to_string());

        let email = Email::parse(&request.email).map_err(|_| invalid())?;
        let Some(usuario) = self.usuarios.find_by_email(&email).await? else {
            tracing::warn!(email_domain = email.domain(), "Login for unknown account");
            return Err(invalid());
        };
        if !password::verify_password(&request.password, &usuario.password_hash) {
            tracing::warn!(usuario_id = %usuario.id, "Login rejected");
            return Err(invalid());
        }

        tracing::info!(usuario_id = %usuario.id, role = %usuario.role, "Login succeeded");
        self.token_for(&usuario)
    }

    pub fn authenticate(&self, token: &str) -> Result<Claims> {
        self.tokens.verify(token)
    }

    /// Creates the admin account unless one with this e-mail exists
    ///
    /// Returns whether an account was created.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool> {
        let email = Email::parse(email)?;
        if self.usuarios.find_by_email(&email).await?.is_some() {
            return Ok(false);
        }

        let hash = password::hash_password(password)?;
        let usuario = Usuario::new(email, hash, Role::Admin, None);
        self.usuarios.register(&usuario, NovaConta::Admin).await?;
        tracing::info!(usuario_id = %usuario.id, "Admin account created");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures;
    use crate::core::services::Services;
    use crate::domain::DomainError;

    fn stack() -> Services {
        Services::new(&fixtures::repos(), &fixtures::config())
    }

    fn registro(nome: &str, cpf: &str, password: &str) -> RegisterPacienteRequest {
        RegisterPacienteRequest {
            paciente: fixtures::paciente(nome, cpf),
            password: password.to_string(),
        }
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let services = stack();
        let registered = services
            .auth
            .register_paciente(registro("Ana", "529.982.247-25", "segredo123"))
            .await
            .unwrap();
        assert_eq!(registered.token_type, "Bearer");
        assert_eq!(registered.role, Role::Paciente);

        let claims = services.auth.authenticate(&registered.token).unwrap();
        let paciente = services.pacientes.find_by_cpf("52998224725").await.unwrap();
        assert_eq!(claims.entity_id, Some(paciente.id.into_inner()));

        let token = services
            .auth
            .login(login("ANA@pacientes.com", "segredo123"))
            .await
            .unwrap();
        assert_eq!(token.role, Role::Paciente);
    }

    #[tokio::test]
    async fn test_login_failures_share_message() {
        let services = stack();
        services
            .auth
            .register_paciente(registro("Bia", "111.444.777-35", "segredo123"))
            .await
            .unwrap();

        for attempt in [
            login("bia@pacientes.com", "errada123"),
            login("ninguem@pacientes.com", "segredo123"),
            login("nao-e-email", "segredo123"),
        ] {
            match services.auth.login(attempt).await {
                Err(ClinidataError::Authentication(msg)) => {
                    assert_eq!(msg, "credenciais inválidas")
                }
                other => panic!("expected authentication error, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_weak_password_stores_nothing() {
        let services = stack();
        let err = services
            .auth
            .register_paciente(registro("Caio", "529.982.247-25", "curta"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClinidataError::Domain(DomainError::SenhaFraca { .. })
        ));
        assert!(services.pacientes.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_cpf_registration_conflicts() {
        let services = stack();
        services
            .auth
            .register_paciente(registro("Duda", "529.982.247-25", "segredo123"))
            .await
            .unwrap();
        let err = services
            .auth
            .register_paciente(registro("Eva", "529.982.247-25", "segredo123"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClinidataError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_register_medico_requires_especialidade() {
        let services = stack();
        let request = RegisterMedicoRequest {
            medico: fixtures::medico("Gil", "12345/SP", crate::domain::EspecialidadeId::new()),
            password: "segredo123".to_string(),
        };
        let err = services.auth.register_medico(request).await.unwrap_err();
        assert!(matches!(err, ClinidataError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_register_instituicao() {
        let services = stack();
        let token = services
            .auth
            .register_instituicao(RegisterInstituicaoRequest {
                instituicao: fixtures::instituicao("Vida", "11.222.333/0001-81"),
                password: "segredo123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(token.role, Role::Instituicao);
        assert_eq!(services.instituicoes.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let services = stack();
        assert!(services
            .auth
            .ensure_admin("admin@clinidata.local", "admin-senha")
            .await
            .unwrap());
        assert!(!services
            .auth
            .ensure_admin("Admin@clinidata.local", "outra-senha")
            .await
            .unwrap());

        let token = services
            .auth
            .login(login("admin@clinidata.local", "admin-senha"))
            .await
            .unwrap();
        assert_eq!(token.role, Role::Admin);
        let claims = services.auth.authenticate(&token.token).unwrap();
        assert_eq!(claims.entity_id, None);
    }
}
