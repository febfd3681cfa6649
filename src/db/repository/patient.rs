use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{NewPatient, Patient, PatientUpdate};

const COLUMNS: &str =
    "id, name, national_id, email, password_hash, city, country, age, gender, phone_number, active";

fn patient_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        national_id: row.get(2)?,
        email: row.get(3)?,
        password_hash: row.get(4)?,
        city: row.get(5)?,
        country: row.get(6)?,
        age: row.get(7)?,
        gender: row.get(8)?,
        phone_number: row.get(9)?,
        active: row.get(10)?,
    })
}

pub fn insert_patient(
    conn: &Connection,
    new: &NewPatient,
    password_hash: &str,
) -> Result<Patient, DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO patients (name, national_id, email, password_hash, city, country, age, gender, phone_number, active)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 1)",
        params![
            new.name,
            new.national_id,
            new.email,
            password_hash,
            new.city,
            new.country,
            new.age,
            new.gender,
            new.phone_number,
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    Ok(Patient {
        id,
        name: new.name.clone(),
        national_id: new.national_id.clone(),
        email: new.email.clone(),
        password_hash: password_hash.to_string(),
        city: new.city.clone(),
        country: new.country.clone(),
        age: new.age,
        gender: new.gender.clone(),
        phone_number: new.phone_number.clone(),
        active: true,
    })
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Patient, DatabaseError> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM patients WHERE id = ?1"),
        params![id],
        patient_from_row,
    )
    .optional()?
    .ok_or(DatabaseError::NotFound {
        entity: "patient",
        id,
    })
}

pub fn find_patient_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<Patient>, DatabaseError> {
    let patient = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM patients WHERE email = ?1"),
            params![email],
            patient_from_row,
        )
        .optional()?;
    Ok(patient)
}

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM patients"))?;
    let rows = stmt.query_map([], patient_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn update_patient(
    conn: &Connection,
    id: i64,
    upd: &PatientUpdate,
    password_hash: &str,
) -> Result<Patient, DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let rows = tx.execute(
        "UPDATE patients SET name = ?1, national_id = ?2, email = ?3, password_hash = ?4,
         city = ?5, country = ?6, age = ?7, gender = ?8, phone_number = ?9 WHERE id = ?10",
        params![
            upd.name,
            upd.national_id,
            upd.email,
            password_hash,
            upd.city,
            upd.country,
            upd.age,
            upd.gender,
            upd.phone_number,
            id,
        ],
    )?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity: "patient",
            id,
        });
    }
    tx.commit()?;

    get_patient(conn, id)
}

pub fn delete_patient(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let rows = tx.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity: "patient",
            id,
        });
    }
    tx.commit()?;
    Ok(())
}

pub(crate) fn patient_exists(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let found = conn
        .query_row("SELECT 1 FROM patients WHERE id = ?1", params![id], |_| {
            Ok(())
        })
        .optional()?;
    Ok(found.is_some())
}
