//! Shared types for the API layer.

use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::auth::{self, Operation, Principal, Resource, TokenSigner};
use crate::db;

/// Shared context for all API routes and middleware: the database
/// location and the token signer, both fixed at startup.
///
/// Connections are opened per request — SQLite keeps single-row writes
/// atomic and `busy_timeout` covers overlapping writers.
#[derive(Clone)]
pub struct ApiContext {
    db_path: PathBuf,
    pub signer: Arc<TokenSigner>,
}

impl ApiContext {
    pub fn new(db_path: PathBuf, signer: Arc<TokenSigner>) -> Self {
        Self { db_path, signer }
    }

    /// Open a database connection for this request.
    pub fn open_db(&self) -> Result<Connection, ApiError> {
        db::open_database(&self.db_path).map_err(ApiError::from)
    }
}

/// Caller identity, injected into request extensions by the
/// identification middleware. `None` covers missing, malformed and
/// expired tokens alike — the policy decides whether that matters.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<Principal>);

impl Caller {
    /// Check this caller against the central policy table.
    ///
    /// Returns the principal when one is required (or present anyway);
    /// the error is ready to surface as an HTTP response.
    pub fn authorize(
        &self,
        resource: Resource,
        operation: Operation,
    ) -> Result<Option<&Principal>, ApiError> {
        auth::authorize(auth::required_access(resource, operation), self.0.as_ref())
            .map_err(ApiError::from)
    }
}
