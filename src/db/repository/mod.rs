//! Repository layer — entity-scoped database operations.
//!
//! Free functions over a borrowed `Connection`, one module per entity.
//! Every write runs inside a transaction: on failure the transaction
//! rolls back on drop and the caller sees the error with prior state
//! intact. Read-by-id misses are `NotFound`; filters return empty
//! vectors.

mod appointment;
mod doctor;
mod patient;
mod record;

pub use appointment::*;
pub use doctor::*;
pub use patient::*;
pub use record::*;
