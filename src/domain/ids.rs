//! Domain identifier types
//!
//! Newtype wrappers over UUIDs, one per aggregate, so that a `MedicoId` can
//! never be passed where a `PacienteId` is expected.

use super::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $campo:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Returns a reference to the inner UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Consumes self and returns the inner UUID
            pub fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| DomainError::ValorInvalido {
                        campo: $campo,
                        valor: s.to_string(),
                    })
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Identifier of a [`Paciente`](crate::domain::entities::Paciente)
    PacienteId,
    "paciente_id"
);
define_id!(
    /// Identifier of a [`Medico`](crate::domain::entities::Medico)
    MedicoId,
    "medico_id"
);
define_id!(
    /// Identifier of an [`Especialidade`](crate::domain::entities::Especialidade)
    EspecialidadeId,
    "especialidade_id"
);
define_id!(
    /// Identifier of an [`Instituicao`](crate::domain::entities::Instituicao)
    InstituicaoId,
    "instituicao_id"
);
define_id!(
    /// Identifier of a [`Consulta`](crate::domain::entities::Consulta)
    ConsultaId,
    "consulta_id"
);
define_id!(
    /// Identifier of an [`Exame`](crate::domain::entities::Exame)
    ExameId,
    "exame_id"
);
define_id!(
    /// Identifier of a [`HistoricoMedico`](crate::domain::entities::HistoricoMedico)
    HistoricoMedicoId,
    "historico_medico_id"
);
define_id!(
    /// Identifier of a [`Usuario`](crate::domain::entities::Usuario) account
    UsuarioId,
    "usuario_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(PacienteId::new(), PacienteId::new());
    }

    #[test]
    fn test_id_from_str_roundtrip() {
        let id = MedicoId::new();
        let parsed: MedicoId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_from_str_invalid() {
        let err = ConsultaId::from_str("not-a-uuid").unwrap_err();
        assert_eq!(
            err,
            DomainError::ValorInvalido {
                campo: "consulta_id",
                valor: "not-a-uuid".to_string()
            }
        );
    }

    #[test]
    fn test_id_serializes_as_plain_uuid() {
        let uuid = Uuid::new_v4();
        let id = ExameId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }
}
