use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{Record, RecordPayload};

use super::appointment::appointment_exists;

const COLUMNS: &str = "id, date, diagnosis, treatment, recommendations, appointment_id";

fn record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        date: row.get(1)?,
        diagnosis: row.get(2)?,
        treatment: row.get(3)?,
        recommendations: row.get(4)?,
        appointment_id: row.get(5)?,
    })
}

/// Insert a clinical record after checking the parent appointment exists.
pub fn insert_record(
    conn: &Connection,
    appointment_id: i64,
    payload: &RecordPayload,
) -> Result<Record, DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    if !appointment_exists(&tx, appointment_id)? {
        return Err(DatabaseError::MissingReference {
            entity: "appointment",
            id: appointment_id,
        });
    }
    tx.execute(
        "INSERT INTO records (date, diagnosis, treatment, recommendations, appointment_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            payload.date,
            payload.diagnosis,
            payload.treatment,
            payload.recommendations,
            appointment_id,
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    Ok(Record {
        id,
        date: payload.date,
        diagnosis: payload.diagnosis.clone(),
        treatment: payload.treatment.clone(),
        recommendations: payload.recommendations.clone(),
        appointment_id,
    })
}

pub fn get_record(conn: &Connection, id: i64) -> Result<Record, DatabaseError> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM records WHERE id = ?1"),
        params![id],
        record_from_row,
    )
    .optional()?
    .ok_or(DatabaseError::NotFound {
        entity: "record",
        id,
    })
}

/// All records for one appointment. No rows is an empty vector.
pub fn list_records_by_appointment(
    conn: &Connection,
    appointment_id: i64,
) -> Result<Vec<Record>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM records WHERE appointment_id = ?1"
    ))?;
    let rows = stmt.query_map(params![appointment_id], record_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Update the record's own fields. The parent appointment link is
/// immutable after creation.
pub fn update_record(
    conn: &Connection,
    id: i64,
    payload: &RecordPayload,
) -> Result<Record, DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let rows = tx.execute(
        "UPDATE records SET date = ?1, diagnosis = ?2, treatment = ?3, recommendations = ?4
         WHERE id = ?5",
        params![
            payload.date,
            payload.diagnosis,
            payload.treatment,
            payload.recommendations,
            id,
        ],
    )?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity: "record",
            id,
        });
    }
    tx.commit()?;

    get_record(conn, id)
}

pub fn delete_record(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let rows = tx.execute("DELETE FROM records WHERE id = ?1", params![id])?;
    if rows == 0 {
        return Err(DatabaseError::NotFound {
            entity: "record",
            id,
        });
    }
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::db::repository::{insert_appointment, insert_doctor, insert_patient};
    use crate::db::sqlite::open_memory_database;
    use crate::models::{AppointmentPayload, NewDoctor, NewPatient};

    fn seed_appointment(conn: &Connection) -> i64 {
        let doctor = insert_doctor(
            conn,
            &NewDoctor {
                name: "Gregory House".into(),
                national_id: "D-1".into(),
                email: "house@example.com".into(),
                password: "x".into(),
                license_number: "LIC-1".into(),
                specialty: "diagnostics".into(),
                phone_number: "555-0100".into(),
            },
            "h",
        )
        .unwrap();
        let patient = insert_patient(
            conn,
            &NewPatient {
                name: "Lisa Cuddy".into(),
                national_id: "P-1".into(),
                email: "cuddy@example.com".into(),
                password: "x".into(),
                city: "Princeton".into(),
                country: "US".into(),
                age: 43,
                gender: "f".into(),
                phone_number: "555-0200".into(),
            },
            "h",
        )
        .unwrap();
        insert_appointment(
            conn,
            doctor.id,
            patient.id,
            &AppointmentPayload {
                date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
                reason: "annual check-up".into(),
                mode: "in-person".into(),
                confirmation_status: "confirmed".into(),
            },
        )
        .unwrap()
        .id
    }

    fn payload() -> RecordPayload {
        RecordPayload {
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            diagnosis: "lupus, finally".into(),
            treatment: "prednisone".into(),
            recommendations: "follow-up in two weeks".into(),
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let conn = open_memory_database().unwrap();
        let appt = seed_appointment(&conn);

        let created = insert_record(&conn, appt, &payload()).unwrap();
        let fetched = get_record(&conn, created.id).unwrap();
        assert_eq!(fetched.diagnosis, "lupus, finally");
        assert_eq!(fetched.appointment_id, appt);
    }

    #[test]
    fn insert_with_unknown_appointment_is_missing_reference() {
        let conn = open_memory_database().unwrap();
        assert!(matches!(
            insert_record(&conn, 404, &payload()),
            Err(DatabaseError::MissingReference {
                entity: "appointment",
                id: 404
            })
        ));
    }

    #[test]
    fn list_by_appointment_filters_and_allows_empty() {
        let conn = open_memory_database().unwrap();
        let appt = seed_appointment(&conn);

        assert!(list_records_by_appointment(&conn, appt).unwrap().is_empty());

        insert_record(&conn, appt, &payload()).unwrap();
        insert_record(&conn, appt, &payload()).unwrap();
        assert_eq!(list_records_by_appointment(&conn, appt).unwrap().len(), 2);
    }

    #[test]
    fn update_missing_is_not_found() {
        let conn = open_memory_database().unwrap();
        assert!(matches!(
            update_record(&conn, 9, &payload()),
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let conn = open_memory_database().unwrap();
        let appt = seed_appointment(&conn);
        let created = insert_record(&conn, appt, &payload()).unwrap();

        delete_record(&conn, created.id).unwrap();
        assert!(matches!(
            get_record(&conn, created.id),
            Err(DatabaseError::NotFound { .. })
        ));
    }
}
