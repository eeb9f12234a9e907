//! HTTP tests against the in-memory backend
//!
//! Requests go through the full router with `tower::ServiceExt::oneshot`;
//! no socket is opened.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use clinidata::adapters::database::Repositories;
use clinidata::adapters::memory::MemoryStore;
use clinidata::api::{router, AppState, SharedState};
use clinidata::config::parse_config;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const CONFIG: &str = r#"
database_target = "memory"

[auth]
jwt_secret = "0123456789abcdef0123456789abcdef"
issuer = "clinidata-test"
"#;

const ADMIN_EMAIL: &str = "admin@clinidata.local";
const ADMIN_PASSWORD: &str = "admin-senha-forte";

struct Harness {
    app: Router,
    state: SharedState,
}

impl Harness {
    fn new() -> Self {
        let config = parse_config(CONFIG).unwrap();
        let repos = Repositories::from_backend(Arc::new(MemoryStore::new()));
        let state = Arc::new(AppState::new(&repos, &config));
        Self {
            app: router(state.clone()),
            state,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn admin_token(&self) -> String {
        self.state
            .services
            .auth
            .ensure_admin(ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap();
        let (status, body) = self
            .send(
                Method::POST,
                "/api/Auth/login",
                None,
                Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    async fn register_paciente(&self, nome: &str, cpf: &str) -> String {
        let mut body = paciente_body(nome, cpf);
        body["password"] = json!("senha-do-paciente");
        let (status, body) = self
            .send(Method::POST, "/api/Auth/register/paciente", None, Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    async fn entity_id(&self, token: &str) -> String {
        let (status, me) = self.send(Method::GET, "/api/Auth/me", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        me["entity_id"].as_str().unwrap().to_string()
    }
}

fn endereco() -> Value {
    json!({
        "logradouro": "Rua Augusta",
        "numero": "500",
        "bairro": "Consolação",
        "cidade": "São Paulo",
        "uf": "SP",
        "cep": "01304-000"
    })
}

fn paciente_body(nome: &str, cpf: &str) -> Value {
    json!({
        "nome": nome,
        "data_nascimento": "1990-05-01",
        "sexo": "F",
        "cpf": cpf,
        "telefone": "11 91234-5678",
        "email": format!("{}@pacientes.com", nome.to_lowercase()),
        "endereco": endereco()
    })
}

#[tokio::test]
async fn test_health() {
    let h = Harness::new();
    let (status, body) = h.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "memory");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let h = Harness::new();
    let (status, body) = h.send(Method::GET, "/api/Nada", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_protected_routes_require_a_valid_token() {
    let h = Harness::new();

    let (status, body) = h.send(Method::GET, "/api/Pacientes", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");

    let (status, _) = h
        .send(Method::GET, "/api/Pacientes", Some("not.a.token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_login_and_me() {
    let h = Harness::new();
    let token = h.register_paciente("Ana", "529.982.247-25").await;

    let (status, me) = h.send(Method::GET, "/api/Auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["role"], "Paciente");
    assert_eq!(me["email"], "ana@pacientes.com");

    let (status, body) = h
        .send(
            Method::POST,
            "/api/Auth/login",
            None,
            Some(json!({ "email": "ana@pacientes.com", "password": "senha-do-paciente" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["role"], "Paciente");

    let (status, body) = h
        .send(
            Method::POST,
            "/api/Auth/login",
            None,
            Some(json!({ "email": "ana@pacientes.com", "password": "errada-123" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "credenciais inválidas");
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let h = Harness::new();
    h.register_paciente("Bia", "111.444.777-35").await;

    let mut body = paciente_body("Outra", "11144477735");
    body["password"] = json!("senha-qualquer");
    let (status, body) = h
        .send(Method::POST, "/api/Auth/register/paciente", None, Some(body))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "CPF já cadastrado");
}

#[tokio::test]
async fn test_patient_sees_only_own_record() {
    let h = Harness::new();
    let ana = h.register_paciente("Ana", "529.982.247-25").await;
    let bia = h.register_paciente("Bia", "111.444.777-35").await;
    let ana_id = h.entity_id(&ana).await;

    let uri = format!("/api/Pacientes/{ana_id}");
    let (status, body) = h.send(Method::GET, &uri, Some(&ana), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cpf"], "529.982.247-25");

    let (status, body) = h.send(Method::GET, &uri, Some(&bia), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");

    let (status, _) = h.send(Method::GET, "/api/Pacientes", Some(&ana), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_validation_errors_are_400() {
    let h = Harness::new();
    let admin = h.admin_token().await;

    let (status, body) = h
        .send(
            Method::POST,
            "/api/Pacientes",
            Some(&admin),
            Some(paciente_body("Caio", "123")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_cpf");

    let mut menor = paciente_body("Davi", "123.456.789-09");
    menor["data_nascimento"] = json!("2020-01-01");
    let (status, body) = h
        .send(Method::POST, "/api/Pacientes", Some(&admin), Some(menor))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "guardian_required");

    let (status, body) = h
        .send(
            Method::POST,
            "/api/Especialidades",
            Some(&admin),
            Some(json!({ "nome_errado": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_body");

    let (status, body) = h
        .send(Method::GET, "/api/Pacientes/nao-e-uuid", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_path");
}

#[tokio::test]
async fn test_clinical_workflow() {
    let h = Harness::new();
    let admin = h.admin_token().await;

    let (status, esp) = h
        .send(
            Method::POST,
            "/api/Especialidades",
            Some(&admin),
            Some(json!({ "nome": "Cardiologia" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let esp_id = esp["id"].as_str().unwrap().to_string();

    let (status, _) = h
        .send(
            Method::POST,
            "/api/Especialidades",
            Some(&admin),
            Some(json!({ "nome": "cardiologia" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let medico = json!({
        "nome": "Carlos",
        "crm": "123456 sp",
        "especialidade_id": esp_id,
        "telefone": "11 3000-0000",
        "email": "carlos@medicos.com"
    });
    let (status, med) = h
        .send(Method::POST, "/api/Medicos", Some(&admin), Some(medico.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(med["crm"], "123456/SP");
    let med_id = med["id"].as_str().unwrap().to_string();

    let (status, _) = h
        .send(Method::POST, "/api/Medicos", Some(&admin), Some(medico))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, inst) = h
        .send(
            Method::POST,
            "/api/Instituicoes",
            Some(&admin),
            Some(json!({
                "nome": "Hospital Central",
                "cnpj": "11.222.333/0001-81",
                "telefone": "11 4000-0000",
                "email": "contato@central.org",
                "endereco": endereco()
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let inst_id = inst["id"].as_str().unwrap().to_string();

    let link = format!("/api/MedicoInstituicao/{inst_id}/{med_id}");
    let (status, linked) = h.send(Method::POST, &link, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(linked["medicos"], json!([med_id]));

    let (status, medicos) = h
        .send(
            Method::GET,
            &format!("/api/MedicoInstituicao/{inst_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(medicos.as_array().unwrap().len(), 1);

    let (status, _) = h.send(Method::DELETE, &link, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = h.send(Method::DELETE, &link, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let ana = h.register_paciente("Ana", "529.982.247-25").await;
    let ana_id = h.entity_id(&ana).await;

    let (status, consulta) = h
        .send(
            Method::POST,
            "/api/Consultas",
            Some(&admin),
            Some(json!({
                "data_hora": "2024-07-01T14:00:00Z",
                "paciente_id": ana_id,
                "medico_id": med_id,
                "instituicao_id": inst_id
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let consulta_id = consulta["id"].as_str().unwrap().to_string();

    // The patient reads their own appointments
    let (status, lista) = h
        .send(
            Method::GET,
            &format!("/api/Consultas/paciente/{ana_id}"),
            Some(&ana),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lista[0]["id"], consulta_id);

    let (status, body) = h
        .send(
            Method::DELETE,
            &format!("/api/Medicos/{med_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");

    let (status, _) = h
        .send(
            Method::DELETE,
            &format!("/api/Pacientes/{ana_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = h
        .send(
            Method::GET,
            &format!("/api/Consultas/{consulta_id}"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The login went away with the patient
    let (status, _) = h
        .send(
            Method::POST,
            "/api/Auth/login",
            None,
            Some(json!({ "email": "ana@pacientes.com", "password": "senha-do-paciente" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_medico_permissions() {
    let h = Harness::new();
    let admin = h.admin_token().await;
    let (_, esp) = h
        .send(
            Method::POST,
            "/api/Especialidades",
            Some(&admin),
            Some(json!({ "nome": "Pediatria" })),
        )
        .await;

    let (status, token) = h
        .send(
            Method::POST,
            "/api/Auth/register/medico",
            None,
            Some(json!({
                "nome": "Helena",
                "crm": "98765-RJ",
                "especialidade_id": esp["id"],
                "telefone": "21 3000-0000",
                "email": "helena@medicos.com",
                "password": "senha-da-medica"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(token["role"], "Medico");
    let medica = token["token"].as_str().unwrap().to_string();

    let (status, _) = h
        .send(
            Method::POST,
            "/api/Especialidades",
            Some(&medica),
            Some(json!({ "nome": "Neurologia" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = h.send(Method::GET, "/api/Consultas", Some(&medica), None).await;
    assert_eq!(status, StatusCode::OK);

    // A doctor updates their own registration
    let med_id = h.entity_id(&medica).await;
    let (status, updated) = h
        .send(
            Method::PUT,
            &format!("/api/Medicos/{med_id}"),
            Some(&medica),
            Some(json!({
                "nome": "Helena Souza",
                "crm": "98765/RJ",
                "especialidade_id": esp["id"],
                "telefone": "21 3111-1111",
                "email": "helena@medicos.com"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["nome"], "Helena Souza");
}

#[tokio::test]
async fn test_foreign_consulta_looks_missing() {
    let h = Harness::new();
    let admin = h.admin_token().await;
    let (_, esp) = h
        .send(
            Method::POST,
            "/api/Especialidades",
            Some(&admin),
            Some(json!({ "nome": "Dermatologia" })),
        )
        .await;
    let (status, med) = h
        .send(
            Method::POST,
            "/api/Medicos",
            Some(&admin),
            Some(json!({
                "nome": "Dora",
                "crm": "5555/SP",
                "especialidade_id": esp["id"],
                "telefone": "11 3000-1111",
                "email": "dora@medicos.com"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let ana = h.register_paciente("Ana", "529.982.247-25").await;
    let bia = h.register_paciente("Bia", "111.444.777-35").await;
    let ana_id = h.entity_id(&ana).await;
    let (status, consulta) = h
        .send(
            Method::POST,
            "/api/Consultas",
            Some(&admin),
            Some(json!({
                "data_hora": "2024-07-02T10:00:00Z",
                "paciente_id": ana_id,
                "medico_id": med["id"]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let own = format!("/api/Consultas/{}", consulta["id"].as_str().unwrap());
    let (status, _) = h.send(Method::GET, &own, Some(&ana), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, foreign) = h.send(Method::GET, &own, Some(&bia), None).await;
    let missing = format!("/api/Consultas/{}", uuid::Uuid::new_v4());
    let (missing_status, absent) = h.send(Method::GET, &missing, Some(&bia), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(foreign["code"], absent["code"]);
}
