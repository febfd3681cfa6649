use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{Appointment, AppointmentPayload};

use super::doctor::doctor_exists;
use super::patient::patient_exists;

const COLUMNS: &str = "id, date, reason, mode, confirmation_status, doctor_id, patient_id";

fn appointment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        date: row.get(1)?,
        reason: row.get(2)?,
        mode: row.get(3)?,
        confirmation_status: row.get(4)?,
        doctor_id: row.get(5)?,
        patient_id: row.get(6)?,
    })
}

/// Insert an appointment after checking both referenced principals exist.
/// The checks run inside the same transaction as the insert, so a failed
/// check rolls everything back.
pub fn insert_appointment(
    conn: &Connection,
    doctor_id: i64,
    patient_id: i64,
    payload: &AppointmentPayload,
) -> Result<Appointment, DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    if !doctor_exists(&tx, doctor_id)? {
        return Err(DatabaseError::MissingReference {
            entity: "doctor",
            id: doctor_id,
        });
    }
    if !patient_exists(&tx, patient_id)? {
        return Err(DatabaseError::MissingReference {
            entity: "patient",
            id: patient_id,
        });
    }
    tx.execute(
        "INSERT INTO appointments (date, reason, mode, confirmation_status, doctor_id, patient_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            payload.date,
            payload.reason,
            payload.mode,
            payload.confirmation_status,
            doctor_id,
            patient_id,
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    Ok(Appointment {
        id,
        date: payload.date,
        reason: payload.reason.clone(),
        mode: payload.mode.clone(),
        confirmation_status: payload.confirmation_status.clone(),
        doctor_id,
        patient_id,
    })
}

pub fn get_appointment(conn: &Connection, id: i64) -> Result<Appointment, DatabaseError> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM appointments WHERE id = ?1"),
        params![id],
        appointment_from_row,
    )
    .optional()?
    .ok_or(DatabaseError::NotFound {
        entity: "appointment",
        id,
    })
}

pub fn list_appointments(conn: &Connection) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM appointments"))?;
    let rows = stmt.query_map([], appointment_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Exact, case-sensitive match on the free-text status. No rows is an
/// empty vector, not an error.
pub fn list_appointments_by_status(
    conn: &Connection,
    status: &str,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM appointments WHERE confirmation_status = ?1"
    ))?;
    let rows = stmt.query_map(params![status], appointment_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Update the appointment's own fields. The doctor/patient links are
/// immutable after creation.
pub fn update_appointment(
    conn: &Connection,
    id: i64,
    payload: &AppointmentPayload,
) -> Result<Appointment, DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let rows = tx.execute(
        "UPDATE appointments SET date = ?1, reason = ?2, mode = ?3, confirmation_status = ?4
         WHERE id = ?5",
        params![
            payload.date,
            payload.reason,
            payload.mode,
            payload.confirmation_status,
            id,
        ],
    )?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity: "appointment",
            id,
        });
    }
    tx.commit()?;

    get_appointment(conn, id)
}

pub fn delete_appointment(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let rows = tx.execute("DELETE FROM appointments WHERE id = ?1", params![id])?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity: "appointment",
            id,
        });
    }
    tx.commit()?;
    Ok(())
}

pub(crate) fn appointment_exists(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let found = conn
        .query_row(
            "SELECT 1 FROM appointments WHERE id = ?1",
            params![id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}
