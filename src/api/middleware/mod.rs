//! API middleware.
//!
//! A single layer: caller identification. It never rejects a request
//! by itself — authorization is the policy table's job, per endpoint.

pub mod auth;
