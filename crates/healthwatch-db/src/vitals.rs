//! Read operations for the `vitals` table.

use std::str::FromStr;

use sqlx::SqlitePool;

use healthwatch_core::{MonitorState, VitalsRecord};

use crate::DbError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VitalsRow {
    pub state: String,
    pub hr: i64,
    pub sleep_hours: f64,
    pub steps: i64,
    pub fatigue: String,
    pub stability_score: i64,
    pub status: String,
    pub bp_sys: i64,
    pub bp_dia: i64,
    pub resting_hr: i64,
    pub activity_min: i64,
    pub last_updated: Option<String>,
}

impl TryFrom<VitalsRow> for VitalsRecord {
    type Error = DbError;

    fn try_from(row: VitalsRow) -> Result<Self, Self::Error> {
        let state = MonitorState::from_str(&row.state)?;
        Ok(VitalsRecord {
            state,
            hr: row.hr,
            sleep_hours: row.sleep_hours,
            steps: row.steps,
            fatigue: row.fatigue,
            stability_score: row.stability_score,
            status: row.status,
            bp_sys: row.bp_sys,
            bp_dia: row.bp_dia,
            resting_hr: row.resting_hr,
            activity_min: row.activity_min,
            last_updated: row.last_updated,
        })
    }
}

/// Fetch the vitals snapshot for a monitoring state.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] when the state has no vitals row,
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_vitals(
    pool: &SqlitePool,
    patient_id: i64,
    state: MonitorState,
) -> Result<VitalsRecord, DbError> {
    let row = sqlx::query_as::<_, VitalsRow>(
        "SELECT state, hr, sleep_hours, steps, fatigue, stability_score, status, \
                bp_sys, bp_dia, resting_hr, activity_min, last_updated \
         FROM vitals WHERE patient_id = ? AND state = ?",
    )
    .bind(patient_id)
    .bind(state.as_str())
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    VitalsRecord::try_from(row)
}
