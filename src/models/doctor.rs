use serde::{Deserialize, Serialize};

/// A doctor principal. The password hash and active flag stay server-side.
#[derive(Debug, Clone, Serialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub national_id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub license_number: String,
    pub specialty: String,
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub active: bool,
}

/// Payload for doctor self-registration. Password arrives in plaintext
/// and is hashed before it touches storage.
#[derive(Debug, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    pub national_id: String,
    pub email: String,
    pub password: String,
    pub license_number: String,
    pub specialty: String,
    pub phone_number: String,
}

/// Full-replace update payload. A missing or empty password keeps the
/// stored hash; anything else is re-hashed.
#[derive(Debug, Deserialize)]
pub struct DoctorUpdate {
    pub name: String,
    pub national_id: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    pub license_number: String,
    pub specialty: String,
    pub phone_number: String,
}
