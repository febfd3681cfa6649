//! Doctor endpoints. Registration is open (self-service); the policy
//! table governs the rest.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Caller};
use crate::auth::password::hash_password;
use crate::auth::{Operation, Resource};
use crate::db::{repository, DatabaseError};
use crate::models::{Doctor, DoctorUpdate, NewDoctor};

/// `POST /doctor` — self-registration.
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Json(new): Json<NewDoctor>,
) -> Result<(StatusCode, Json<Doctor>), ApiError> {
    caller.authorize(Resource::Doctor, Operation::Create)?;

    let conn = ctx.open_db()?;
    // Duplicate check before the (expensive) password hash
    if repository::find_doctor_by_email(&conn, &new.email)?.is_some() {
        return Err(DatabaseError::DuplicateEmail {
            entity: "doctor",
            email: new.email.clone(),
        }
        .into());
    }

    let hash = hash_password(&new.password);
    let doctor = repository::insert_doctor(&conn, &new, &hash)?;

    tracing::info!(id = doctor.id, "doctor registered");
    Ok((StatusCode::CREATED, Json(doctor)))
}

/// `GET /doctor/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<Json<Doctor>, ApiError> {
    caller.authorize(Resource::Doctor, Operation::Read)?;

    let conn = ctx.open_db()?;
    let doctor = repository::get_doctor(&conn, id)?;
    Ok(Json(doctor))
}

/// `PUT /doctor/:id` — full replace. A missing or empty password in
/// the payload keeps the stored hash.
pub async fn update(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
    Json(upd): Json<DoctorUpdate>,
) -> Result<Json<Doctor>, ApiError> {
    caller.authorize(Resource::Doctor, Operation::Update)?;

    let conn = ctx.open_db()?;
    let existing = repository::get_doctor(&conn, id)?;
    let hash = match upd.password.as_deref() {
        Some(p) if !p.is_empty() => hash_password(p),
        _ => existing.password_hash.clone(),
    };
    let doctor = repository::update_doctor(&conn, id, &upd, &hash)?;
    Ok(Json(doctor))
}

/// `DELETE /doctor/:id`
pub async fn remove(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    caller.authorize(Resource::Doctor, Operation::Delete)?;

    let conn = ctx.open_db()?;
    repository::delete_doctor(&conn, id)?;

    tracing::info!(id, "doctor deleted");
    Ok(StatusCode::NO_CONTENT)
}
