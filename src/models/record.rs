use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A clinical note attached to an appointment.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub id: i64,
    pub date: NaiveDate,
    pub diagnosis: String,
    pub treatment: String,
    pub recommendations: String,
    pub appointment_id: i64,
}

/// Create/update payload. The parent appointment id comes from the
/// request path on create and is immutable on update.
#[derive(Debug, Deserialize)]
pub struct RecordPayload {
    pub date: NaiveDate,
    pub diagnosis: String,
    pub treatment: String,
    pub recommendations: String,
}
