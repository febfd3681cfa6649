use serde::{Deserialize, Serialize};

/// A patient principal. Same identity shape as `Doctor` but a separate
/// table, so email uniqueness holds per kind only.
#[derive(Debug, Clone, Serialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub national_id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub city: String,
    pub country: String,
    pub age: i64,
    pub gender: String,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewPatient {
    pub name: String,
    pub national_id: String,
    pub email: String,
    pub password: String,
    pub city: String,
    pub country: String,
    pub age: i64,
    pub gender: String,
    pub phone_number: String,
}

/// Full-replace update payload; password semantics match `DoctorUpdate`.
#[derive(Debug, Deserialize)]
pub struct PatientUpdate {
    pub name: String,
    pub national_id: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    pub city: String,
    pub country: String,
    pub age: i64,
    pub gender: String,
    pub phone_number: String,
}
