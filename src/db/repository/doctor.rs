use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{Doctor, DoctorUpdate, NewDoctor};

const COLUMNS: &str =
    "id, name, national_id, email, password_hash, license_number, specialty, phone_number, active";

fn doctor_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get(0)?,
        name: row.get(1)?,
        national_id: row.get(2)?,
        email: row.get(3)?,
        password_hash: row.get(4)?,
        license_number: row.get(5)?,
        specialty: row.get(6)?,
        phone_number: row.get(7)?,
        active: row.get(8)?,
    })
}

pub fn insert_doctor(
    conn: &Connection,
    new: &NewDoctor,
    password_hash: &str,
) -> Result<Doctor, DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO doctors (name, national_id, email, password_hash, license_number, specialty, phone_number, active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1)",
        params![
            new.name,
            new.national_id,
            new.email,
            password_hash,
            new.license_number,
            new.specialty,
            new.phone_number,
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    Ok(Doctor {
        id,
        name: new.name.clone(),
        national_id: new.national_id.clone(),
        email: new.email.clone(),
        password_hash: password_hash.to_string(),
        license_number: new.license_number.clone(),
        specialty: new.specialty.clone(),
        phone_number: new.phone_number.clone(),
        active: true,
    })
}

pub fn get_doctor(conn: &Connection, id: i64) -> Result<Doctor, DatabaseError> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM doctors WHERE id = ?1"),
        params![id],
        doctor_from_row,
    )
    .optional()?
    .ok_or(DatabaseError::NotFound {
        entity: "doctor",
        id,
    })
}

pub fn find_doctor_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<Doctor>, DatabaseError> {
    let doctor = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM doctors WHERE email = ?1"),
            params![email],
            doctor_from_row,
        )
        .optional()?;
    Ok(doctor)
}

pub fn update_doctor(
    conn: &Connection,
    id: i64,
    upd: &DoctorUpdate,
    password_hash: &str,
) -> Result<Doctor, DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let rows = tx.execute(
        "UPDATE doctors SET name = ?1, national_id = ?2, email = ?3, password_hash = ?4,
         license_number = ?5, specialty = ?6, phone_number = ?7 WHERE id = ?8",
        params![
            upd.name,
            upd.national_id,
            upd.email,
            password_hash,
            upd.license_number,
            upd.specialty,
            upd.phone_number,
            id,
        ],
    )?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity: "doctor",
            id,
        });
    }
    tx.commit()?;

    get_doctor(conn, id)
}

pub fn delete_doctor(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let rows = tx.execute("DELETE FROM doctors WHERE id = ?1", params![id])?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity: "doctor",
            id,
        });
    }
    tx.commit()?;
    Ok(())
}

pub(crate) fn doctor_exists(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let found = conn
        .query_row("SELECT 1 FROM doctors WHERE id = ?1", params![id], |_| {
            Ok(())
        })
        .optional()?;
    Ok(found.is_some())
}
