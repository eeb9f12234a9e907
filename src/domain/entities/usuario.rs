//! Usuario (login account) domain model

use crate::domain::errors::DomainError;
use crate::domain::ids::UsuarioId;
use crate::domain::value_objects::Email;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Account role carried in access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Instituicao,
    Medico,
    Paciente,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Instituicao, Role::Medico, Role::Paciente];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Instituicao => "Instituicao",
            Role::Medico => "Medico",
            Role::Paciente => "Paciente",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::ValorInvalido {
                campo: "role",
                valor: s.to_string(),
            })
    }
}

/// A login account
///
/// `entity_id` points at the Paciente, Medico or Instituicao the account
/// represents; admin accounts have none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usuario {
    pub id: UsuarioId,
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
    pub entity_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Usuario {
    pub fn new(email: Email, password_hash: String, role: Role, entity_id: Option<Uuid>) -> Self {
        Self {
            id: UsuarioId::new(),
            email,
            password_hash,
            role,
            entity_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("medico".parse::<Role>().unwrap(), Role::Medico);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }
}
