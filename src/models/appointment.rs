use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An appointment linking one doctor and one patient.
/// `confirmation_status` is free text ("pending", "confirmed", ...);
/// filters match it exactly, case-sensitive.
#[derive(Debug, Clone, Serialize)]
pub struct Appointment {
    pub id: i64,
    pub date: NaiveDate,
    pub reason: String,
    pub mode: String,
    pub confirmation_status: String,
    pub doctor_id: i64,
    pub patient_id: i64,
}

/// Create/update payload. The doctor and patient ids come from the
/// request path on create and are immutable on update.
#[derive(Debug, Deserialize)]
pub struct AppointmentPayload {
    pub date: NaiveDate,
    pub reason: String,
    pub mode: String,
    pub confirmation_status: String,
}

/// Body of the filter-by-status endpoint.
#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub confirmation_status: String,
}
