//! Read and write operations for the `patients` table.

use std::str::FromStr;

use chrono::Utc;
use sqlx::SqlitePool;

use healthwatch_core::{MonitorState, Patient};

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PatientRow {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub address: String,
    pub device_name: String,
    pub device_status: String,
    pub device_battery: String,
    pub caregiver_name: String,
    pub caregiver_relationship: String,
    pub caregiver_phone: String,
    pub caregiver_email: String,
    pub current_state: String,
}

impl TryFrom<PatientRow> for Patient {
    type Error = DbError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let current_state = MonitorState::from_str(&row.current_state)?;
        Ok(Patient {
            id: row.id,
            name: row.name,
            age: row.age,
            address: row.address,
            device_name: row.device_name,
            device_status: row.device_status,
            device_battery: row.device_battery,
            caregiver_name: row.caregiver_name,
            caregiver_relationship: row.caregiver_relationship,
            caregiver_phone: row.caregiver_phone,
            caregiver_email: row.caregiver_email,
            current_state,
        })
    }
}

/// Fetch the patient, or [`DbError::NotFound`] when the row is absent.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, [`DbError::CorruptRow`]
/// if the stored state string is unknown.
pub async fn get_patient(pool: &SqlitePool, patient_id: i64) -> Result<Patient, DbError> {
    let row = sqlx::query_as::<_, PatientRow>(
        "SELECT id, name, age, address, device_name, device_status, device_battery, \
                caregiver_name, caregiver_relationship, caregiver_phone, caregiver_email, \
                current_state \
         FROM patients WHERE id = ?",
    )
    .bind(patient_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Patient::try_from(row)
}

/// Switch the patient's monitoring state.
///
/// Entering the risk state stamps the risk vitals row with the current
/// time; the stable row keeps its historical timestamp untouched.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails.
pub async fn set_patient_state(
    pool: &SqlitePool,
    patient_id: i64,
    state: MonitorState,
) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE patients SET current_state = ? WHERE id = ?")
        .bind(state.as_str())
        .bind(patient_id)
        .execute(&mut *tx)
        .await?;

    if state.is_risk() {
        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        sqlx::query("UPDATE vitals SET last_updated = ? WHERE patient_id = ? AND state = ?")
            .bind(now)
            .bind(patient_id)
            .bind(MonitorState::Risk.as_str())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Number of patients with a named caregiver.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn count_caregivers(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM patients WHERE caregiver_name IS NOT NULL AND caregiver_name != ''",
    )
    .fetch_one(pool)
    .await
}
