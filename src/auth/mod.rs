//! Authentication and authorization.
//!
//! This module provides:
//! - Password hashing and verification (PBKDF2-SHA256)
//! - Signed session tokens carrying {id, email, role}
//! - Credential verification against the two principal tables
//! - The central access policy consulted by every endpoint

pub mod credentials;
pub mod password;
pub mod policy;
pub mod token;

pub use credentials::authenticate;
pub use policy::{authorize, required_access, Access, Operation, PolicyError, Resource, Role};
pub use token::{Claims, Principal, TokenSigner};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No account with that email")]
    UnknownEmail,

    #[error("Password mismatch")]
    InvalidCredentials,

    #[error("Token invalid or expired")]
    TokenInvalid,

    #[error("Token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Database error: {0}")]
    Database(#[from] crate::db::DatabaseError),
}
