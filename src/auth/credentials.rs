//! Credential verification — the login path.

use rusqlite::Connection;

use super::password::verify_password;
use super::policy::Role;
use super::token::Principal;
use super::AuthError;
use crate::db::repository;

/// Check an email/password pair against both principal tables.
///
/// The doctor table is consulted first: if the same email somehow
/// exists in both kinds, the doctor match wins. That is explicit
/// policy, not an accident of lookup order. Once a table matches, the
/// password is checked against that row only — there is no fallback
/// to the other kind on mismatch.
pub fn authenticate(
    conn: &Connection,
    email: &str,
    password: &str,
) -> Result<Principal, AuthError> {
    if let Some(doctor) = repository::find_doctor_by_email(conn, email)? {
        if !verify_password(password, &doctor.password_hash) {
            tracing::debug!(email, "login rejected: password mismatch (doctor)");
            return Err(AuthError::InvalidCredentials);
        }
        return Ok(Principal {
            id: doctor.id,
            email: doctor.email,
            role: Role::Doctor,
        });
    }

    let patient =
        repository::find_patient_by_email(conn, email)?.ok_or(AuthError::UnknownEmail)?;
    if !verify_password(password, &patient.password_hash) {
        tracing::debug!(email, "login rejected: password mismatch (patient)");
        return Err(AuthError::InvalidCredentials);
    }
    Ok(Principal {
        id: patient.id,
        email: patient.email,
        role: Role::Patient,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::db::repository::{insert_doctor, insert_patient};
    use crate::db::sqlite::open_memory_database;
    use crate::models::{NewDoctor, NewPatient};

    fn seed_doctor(conn: &Connection, email: &str, password: &str) -> i64 {
        insert_doctor(
            conn,
            &NewDoctor {
                name: "Gregory House".into(),
                national_id: format!("D-{email}"),
                email: email.into(),
                password: password.into(),
                license_number: format!("LIC-{email}"),
                specialty: "diagnostics".into(),
                phone_number: "555-0100".into(),
            },
            &hash_password(password),
        )
        .unwrap()
        .id
    }

    fn seed_patient(conn: &Connection, email: &str, password: &str) -> i64 {
        insert_patient(
            conn,
            &NewPatient {
                name: "Lisa Cuddy".into(),
                national_id: format!("P-{email}"),
                email: email.into(),
                password: password.into(),
                city: "Princeton".into(),
                country: "US".into(),
                age: 43,
                gender: "f".into(),
                phone_number: "555-0200".into(),
            },
            &hash_password(password),
        )
        .unwrap()
        .id
    }

    #[test]
    fn doctor_login_resolves_doctor_role() {
        let conn = open_memory_database().unwrap();
        let id = seed_doctor(&conn, "house@example.com", "vicodin");

        let principal = authenticate(&conn, "house@example.com", "vicodin").unwrap();
        assert_eq!(principal.id, id);
        assert_eq!(principal.role, Role::Doctor);
    }

    #[test]
    fn patient_login_resolves_patient_role() {
        let conn = open_memory_database().unwrap();
        let id = seed_patient(&conn, "cuddy@example.com", "endocrine");

        let principal = authenticate(&conn, "cuddy@example.com", "endocrine").unwrap();
        assert_eq!(principal.id, id);
        assert_eq!(principal.role, Role::Patient);
    }

    #[test]
    fn unknown_email_in_both_tables() {
        let conn = open_memory_database().unwrap();
        assert!(matches!(
            authenticate(&conn, "ghost@example.com", "boo"),
            Err(AuthError::UnknownEmail)
        ));
    }

    #[test]
    fn wrong_password_is_invalid_credentials_not_unknown() {
        let conn = open_memory_database().unwrap();
        seed_doctor(&conn, "house@example.com", "vicodin");

        assert!(matches!(
            authenticate(&conn, "house@example.com", "ibuprofen"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn doctor_wins_when_email_exists_in_both_kinds() {
        let conn = open_memory_database().unwrap();
        let doctor_id = seed_doctor(&conn, "shared@example.com", "doctor-pass");
        seed_patient(&conn, "shared@example.com", "patient-pass");

        let principal = authenticate(&conn, "shared@example.com", "doctor-pass").unwrap();
        assert_eq!(principal.id, doctor_id);
        assert_eq!(principal.role, Role::Doctor);

        // The patient's password does not unlock the shared email: the
        // doctor row was matched first and the check stops there.
        assert!(matches!(
            authenticate(&conn, "shared@example.com", "patient-pass"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
