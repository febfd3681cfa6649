//! Appointment endpoints. Reads are doctor-only; writes accept any
//! authenticated caller (no ownership rule exists — see the policy
//! module).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Caller};
use crate::auth::{Operation, Resource};
use crate::db::repository;
use crate::models::{Appointment, AppointmentPayload, StatusFilter};

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<Appointment>,
}

/// `POST /appointment/:doctor_id/:patient_id` — both referenced
/// principals must exist (422 otherwise).
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path((doctor_id, patient_id)): Path<(i64, i64)>,
    Json(payload): Json<AppointmentPayload>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    caller.authorize(Resource::Appointment, Operation::Create)?;

    let conn = ctx.open_db()?;
    let appointment = repository::insert_appointment(&conn, doctor_id, patient_id, &payload)?;

    tracing::info!(id = appointment.id, doctor_id, patient_id, "appointment created");
    Ok((StatusCode::CREATED, Json(appointment)))
}

/// `GET /appointment/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<Appointment>, ApiError> {
    caller.authorize(Resource::Appointment, Operation::Read)?;

    let conn = ctx.open_db()?;
    let appointment = repository::get_appointment(&conn, id)?;
    Ok(Json(appointment))
}

/// `GET /appointments`
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<AppointmentsResponse>, ApiError> {
    caller.authorize(Resource::Appointment, Operation::List)?;

    let conn = ctx.open_db()?;
    let appointments = repository::list_appointments(&conn)?;
    Ok(Json(AppointmentsResponse { appointments }))
}

/// `POST /appointments/status` — filter by exact confirmation status.
/// No match is an empty list, not a 404.
pub async fn by_status(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Json(filter): Json<StatusFilter>,
) -> Result<Json<AppointmentsResponse>, ApiError> {
    caller.authorize(Resource::Appointment, Operation::List)?;

    let conn = ctx.open_db()?;
    let appointments =
        repository::list_appointments_by_status(&conn, &filter.confirmation_status)?;
    Ok(Json(AppointmentsResponse { appointments }))
}

/// `PUT /appointment/:id` — replaces the appointment's own fields; the
/// doctor/patient links are immutable.
pub async fn update(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    Json(payload): Json<AppointmentPayload>,
) -> Result<Json<Appointment>, ApiError> {
    caller.authorize(Resource::Appointment, Operation::Update)?;

    let conn = ctx.open_db()?;
    let appointment = repository::update_appointment(&conn, id, &payload)?;
    Ok(Json(appointment))
}

/// `DELETE /appointment/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    caller.authorize(Resource::Appointment, Operation::Delete)?;

    let conn = ctx.open_db()?;
    repository::delete_appointment(&conn, id)?;

    tracing::info!(id, "appointment deleted");
    Ok(StatusCode::NO_CONTENT)
}
