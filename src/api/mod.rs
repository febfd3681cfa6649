//! HTTP API.
//!
//! Routes are flat at the root (the service fronts a single client).
//! Every request passes the identification middleware, which resolves
//! the bearer token to a caller; each handler then asks the central
//! access policy before touching a repository.
//!
//! The router is composable — `api_router()` returns a `Router` that
//! can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_server, ApiServer};
pub use types::{ApiContext, Caller};
