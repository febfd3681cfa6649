//! Patient endpoints. Registration and the list are open; reading a
//! single patient is doctor-only per the policy table.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Caller};
use crate::auth::password::hash_password;
use crate::auth::{Operation, Resource};
use crate::db::{repository, DatabaseError};
use crate::models::{NewPatient, Patient, PatientUpdate};

#[derive(Serialize)]
pub struct PatientsResponse {
    pub patients: Vec<Patient>,
}

/// `POST /patient` — self-registration.
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Json(new): Json<NewPatient>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    caller.authorize(Resource::Patient, Operation::Create)?;

    let conn = ctx.open_db()?;
    if repository::find_patient_by_email(&conn, &new.email)?.is_some() {
        return Err(DatabaseError::DuplicateEmail {
            entity: "patient",
            email: new.email.clone(),
        }
        .into());
    }

    let hash = hash_password(&new.password);
    let patient = repository::insert_patient(&conn, &new, &hash)?;

    tracing::info!(id = patient.id, "patient registered");
    Ok((StatusCode::CREATED, Json(patient)))
}

/// `GET /patient/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<Patient>, ApiError> {
    caller.authorize(Resource::Patient, Operation::Read)?;

    let conn = ctx.open_db()?;
    let patient = repository::get_patient(&conn, id)?;
    Ok(Json(patient))
}

/// `GET /patients`
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<PatientsResponse>, ApiError> {
    caller.authorize(Resource::Patient, Operation::List)?;

    let conn = ctx.open_db()?;
    let patients = repository::list_patients(&conn)?;
    Ok(Json(PatientsResponse { patients }))
}

/// `PUT /patient/:id` — full replace; password semantics as for doctors.
pub async fn update(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    Json(upd): Json<PatientUpdate>,
) -> Result<Json<Patient>, ApiError> {
    caller.authorize(Resource::Patient, Operation::Update)?;

    let conn = ctx.open_db()?;
    let existing = repository::get_patient(&conn, id)?;
    let hash = match upd.password.as_deref() {
        Some(p) if !p.is_empty() => hash_password(p),
        _ => existing.password_hash.clone(),
    };
    let patient = repository::update_patient(&conn, id, &upd, &hash)?;
    Ok(Json(patient))
}

/// `DELETE /patient/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    caller.authorize(Resource::Patient, Operation::Delete)?;

    let conn = ctx.open_db()?;
    repository::delete_patient(&conn, id)?;

    tracing::info!(id, "patient deleted");
    Ok(StatusCode::NO_CONTENT)
}
