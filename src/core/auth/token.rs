//! HS256 JSON Web Tokens
//!
//! Tokens are `base64url(header).base64url(claims).base64url(signature)`
//! without padding, signed with HMAC-SHA256 over the first two segments.

use crate::config::{AuthConfig, SecretString};
use crate::domain::{ClinidataError, Result, Role, Usuario};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

/// Token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    /// Paciente, Medico or Instituicao the account represents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<Uuid>,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// A signed token and its lifetime in seconds
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

fn invalid(reason: &str) -> ClinidataError {
    ClinidataError::Authentication(reason.to_string())
}

fn decode_segment<T: for<'de> Deserialize<'de>>(segment: &str) -> Result<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| invalid("token malformado"))?;
    serde_json::from_slice(&bytes).map_err(|_| invalid("token malformado"))
}

/// Issues and verifies access tokens
#[derive(Clone)]
pub struct TokenIssuer {
    secret: SecretString,
    issuer: String,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            issuer: config.issuer.clone(),
            ttl: Duration::minutes(config.token_ttl_minutes as i64),
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    fn mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| ClinidataError::Other(format!("Failed to create HMAC: {e}")))
    }

    /// Issues a token for an account, valid from now
    pub fn issue(&self, usuario: &Usuario) -> Result<IssuedToken> {
        self.issue_at(usuario, Utc::now())
    }

    pub fn issue_at(&self, usuario: &Usuario, now: DateTime<Utc>) -> Result<IssuedToken> {
        let claims = Claims {
            sub: usuario.id.into_inner(),
            email: usuario.email.as_str().to_string(),
            role: usuario.role,
            entity_id: usuario.entity_id,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        let header = Header {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        };

        let message = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?),
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?)
        );

        let mut mac = self.mac()?;
        mac.update(message.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(IssuedToken {
            token: format!("{message}.{signature}"),
            expires_in: self.ttl_seconds(),
        })
    }

    /// Verifies a token against the current time
    ///
    /// # Errors
    ///
    /// Returns [`ClinidataError::Authentication`] when the token is
    /// malformed, signed with another key or algorithm, issued by someone
    /// else, or expired.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("token malformado"));
        };

        let header: Header = decode_segment(header_b64)?;
        if header.alg != ALGORITHM {
            return Err(invalid("algoritmo de assinatura não suportado"));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| invalid("token malformado"))?;
        let mut mac = self.mac()?;
        mac.update(header_b64.as_bytes());
        mac.update(b".");
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| invalid("assinatura inválida"))?;

        let claims: Claims = decode_segment(payload_b64)?;
        if claims.iss != self.issuer {
            return Err(invalid("emissor inválido"));
        }
        if now.timestamp() >= claims.exp {
            return Err(invalid("token expirado"));
        }
        Ok(claims)
    }
}
