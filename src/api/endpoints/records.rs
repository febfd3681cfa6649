//! Clinical record endpoints — doctor-only across the board.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Caller};
use crate::auth::{Operation, Resource};
use crate::db::repository;
use crate::models::{Record, RecordPayload};

#[derive(Serialize)]
pub struct RecordsResponse {
    pub records: Vec<Record>,
}

/// `POST /record/appointment/:appointment_id` — the parent appointment
/// must exist (422 otherwise).
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(appointment_id): Path<i64>,
    Json(payload): Json<RecordPayload>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    caller.authorize(Resource::Record, Operation::Create)?;

    let conn = ctx.open_db()?;
    let record = repository::insert_record(&conn, appointment_id, &payload)?;

    tracing::info!(id = record.id, appointment_id, "record created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /record/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<Record>, ApiError> {
    caller.authorize(Resource::Record, Operation::Read)?;

    let conn = ctx.open_db()?;
    let record = repository::get_record(&conn, id)?;
    Ok(Json(record))
}

/// `GET /record/appointment/:appointment_id` — all records for one
/// appointment; an empty list is a successful response.
pub async fn by_appointment(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(appointment_id): Path<i64>,
) -> Result<Json<RecordsResponse>, ApiError> {
    caller.authorize(Resource::Record, Operation::List)?;

    let conn = ctx.open_db()?;
    let records = repository::list_records_by_appointment(&conn, appointment_id)?;
    Ok(Json(RecordsResponse { records }))
}

/// `PUT /record/:id` — replaces the record's own fields; the parent
/// appointment link is immutable.
pub async fn update(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    Json(payload): Json<RecordPayload>,
) -> Result<Json<Record>, ApiError> {
    caller.authorize(Resource::Record, Operation::Update)?;

    let conn = ctx.open_db()?;
    let record = repository::update_record(&conn, id, &payload)?;
    Ok(Json(record))
}

/// `DELETE /record/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    caller.authorize(Resource::Record, Operation::Delete)?;

    let conn = ctx.open_db()?;
    repository::delete_record(&conn, id)?;

    tracing::info!(id, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}
