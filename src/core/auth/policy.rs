//! Role policies and record ownership rules

use super::token::Claims;
use crate::domain::{ClinidataError, Result, Role};
use std::fmt;
use uuid::Uuid;

/// Named sets of roles allowed to call an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Admin
    AdminOnly,
    /// Admin, Instituicao
    InstitutionStaff,
    /// Admin, Instituicao, Medico
    Clinical,
    /// Any role
    Authenticated,
}

impl Policy {
    pub fn allows(self, role: Role) -> bool {
        match self {
            Policy::AdminOnly => role == Role::Admin,
            Policy::InstitutionStaff => matches!(role, Role::Admin | Role::Instituicao),
            Policy::Clinical => matches!(role, Role::Admin | Role::Instituicao | Role::Medico),
            Policy::Authenticated => true,
        }
    }
}

impl Claims {
    /// True when the account represents `entity_id` under `role`
    pub fn is_owner(&self, role: Role, entity_id: Uuid) -> bool {
        self.role == role && self.entity_id == Some(entity_id)
    }

    /// Requires the caller's role to satisfy `policy`
    pub fn require(&self, policy: Policy) -> Result<()> {
        if policy.allows(self.role) {
            Ok(())
        } else {
            Err(denied(self.role))
        }
    }

    /// Requires `policy`, or that the caller is the `role` account owning `entity_id`
    pub fn require_or_owner(&self, policy: Policy, role: Role, entity_id: Uuid) -> Result<()> {
        if policy.allows(self.role) || self.is_owner(role, entity_id) {
            Ok(())
        } else {
            Err(denied(self.role))
        }
    }

    /// Read check for records owned through `entity_id`
    ///
    /// A caller outside `policy` who does not own the record gets the same
    /// `NotFound` as for an id that does not exist.
    pub fn require_visible(
        &self,
        policy: Policy,
        role: Role,
        entity_id: Uuid,
        recurso: &'static str,
        id: impl fmt::Display,
    ) -> Result<()> {
        if policy.allows(self.role) || self.is_owner(role, entity_id) {
            Ok(())
        } else {
            Err(ClinidataError::not_found(recurso, id))
        }
    }
}

fn denied(role: Role) -> ClinidataError {
    ClinidataError::Authorization(format!("perfil {role} não tem permissão para esta operação"))
}
