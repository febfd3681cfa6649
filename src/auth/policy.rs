//! Central access policy — the single table deciding who may do what.
//!
//! Every endpoint handler asks this module before touching a
//! repository. Several entries are deliberately permissive (doctor
//! read/delete, the appointment write path); keeping them here makes
//! that product policy visible in one place, and changing a rule means
//! changing exactly one line.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::token::Principal;

/// The two principal kinds. Decided at login by which identity table
/// matched the email, then carried in the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Patient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Doctor,
    Patient,
    Appointment,
    Record,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    List,
    Update,
    Delete,
}

/// What a (resource, operation) pair demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No token required.
    Public,
    /// Any valid token, either role.
    Authenticated,
    /// A valid token with this exact role.
    Role(Role),
}

/// The policy table. Exhaustive over (resource, operation), so adding
/// a resource or operation forces a decision here.
pub fn required_access(resource: Resource, operation: Operation) -> Access {
    use Operation::*;
    use Resource::*;

    match (resource, operation) {
        // Self-registration is open; reads and deletes carry no check.
        (Doctor, Create) => Access::Public,
        (Doctor, Read) => Access::Public,
        (Doctor, Update) => Access::Authenticated,
        (Doctor, Delete) => Access::Public,
        // No route lists doctors; conservative default.
        (Doctor, List) => Access::Role(Role::Doctor),

        (Patient, Create) => Access::Public,
        (Patient, Read) => Access::Role(Role::Doctor),
        (Patient, List) => Access::Public,
        (Patient, Update) => Access::Authenticated,
        (Patient, Delete) => Access::Authenticated,

        // Any authenticated caller may write appointments (no ownership
        // rule exists); reading them is doctor-only.
        (Appointment, Create) => Access::Authenticated,
        (Appointment, Read) | (Appointment, List) => Access::Role(Role::Doctor),
        (Appointment, Update) => Access::Authenticated,
        (Appointment, Delete) => Access::Authenticated,

        (Record, _) => Access::Role(Role::Doctor),
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Requires {required} role")]
    Forbidden { required: Role },
}

/// Decide whether the caller satisfies `access`.
///
/// A missing principal covers missing, malformed and expired tokens
/// alike, so those always surface as `Unauthenticated` — `Forbidden`
/// is reserved for a valid token with the wrong role.
pub fn authorize<'a>(
    access: Access,
    principal: Option<&'a Principal>,
) -> Result<Option<&'a Principal>, PolicyError> {
    match access {
        Access::Public => Ok(principal),
        Access::Authenticated => match principal {
            Some(p) => Ok(Some(p)),
            None => Err(PolicyError::Unauthenticated),
        },
        Access::Role(required) => {
            let p = principal.ok_or(PolicyError::Unauthenticated)?;
            if p.role == required {
                Ok(Some(p))
            } else {
                Err(PolicyError::Forbidden { required })
            }
        }
    }
}
