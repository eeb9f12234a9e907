//! Request and response bodies
//!
//! Requests carry raw strings; converting them into domain input runs every
//! value object parser, so a malformed document surfaces as a
//! [`DomainError`](crate::domain::DomainError) rather than a JSON error.
//! Responses render documents in their masked form.

pub mod auth;
pub mod clinico;
pub mod instituicao;
pub mod medico;
pub mod paciente;

pub use auth::{
    LoginRequest, RegisterInstituicaoRequest, RegisterMedicoRequest, RegisterPacienteRequest,
    TokenResponse,
};
pub use clinico::{
    ConsultaRequest, ConsultaResponse, ExameRequest, ExameResponse, HistoricoRequest,
    HistoricoResponse,
};
pub use instituicao::{InstituicaoRequest, InstituicaoResponse};
pub use medico::{EspecialidadeRequest, EspecialidadeResponse, MedicoRequest, MedicoResponse};
pub use paciente::{PacienteRequest, PacienteResponse};

use crate::domain::{Cep, DomainError, Endereco, Uf};
use serde::{Deserialize, Serialize};

/// Address as sent by clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnderecoRequest {
    pub logradouro: String,
    pub numero: String,
    #[serde(default)]
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
    pub cep: String,
}

impl EnderecoRequest {
    pub fn into_endereco(self) -> Result<Endereco, DomainError> {
        Endereco::builder()
            .logradouro(self.logradouro)
            .numero(self.numero)
            .complemento(self.complemento)
            .bairro(self.bairro)
            .cidade(self.cidade)
            .uf(Uf::parse(&self.uf)?)
            .cep(Cep::parse(&self.cep)?)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnderecoResponse {
    pub logradouro: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
    pub cep: String,
}

impl From<&Endereco> for EnderecoResponse {
    fn from(e: &Endereco) -> Self {
        Self {
            logradouro: e.logradouro().to_string(),
            numero: e.numero().to_string(),
            complemento: e.complemento().map(str::to_string),
            bairro: e.bairro().to_string(),
            cidade: e.cidade().to_string(),
            uf: e.uf().as_str().to_string(),
            cep: e.cep().formatted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> EnderecoRequest {
        EnderecoRequest {
            logradouro: "Av. Paulista".to_string(),
            numero: "1000".to_string(),
            complemento: Some("  ".to_string()),
            bairro: "Bela Vista".to_string(),
            cidade: "São Paulo".to_string(),
            uf: "sp".to_string(),
            cep: "01310100".to_string(),
        }
    }

    #[test]
    fn test_into_endereco() {
        let endereco = request().into_endereco().unwrap();
        assert_eq!(endereco.uf(), Uf::SP);
        assert_eq!(endereco.complemento(), None);

        let response = EnderecoResponse::from(&endereco);
        assert_eq!(response.cep, "01310-100");
        assert_eq!(response.uf, "SP");
    }

    #[test]
    fn test_invalid_cep() {
        let mut req = request();
        req.cep = "0131".to_string();
        assert!(matches!(
            req.into_endereco(),
            Err(DomainError::InvalidCep(_))
        ));
    }
}
