//! Append and count operations for the `ai_insights` log.

use sqlx::SqlitePool;

use healthwatch_core::MonitorState;

/// Append a generated insight to the log.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the insert fails.
pub async fn record_insight(
    pool: &SqlitePool,
    patient_id: i64,
    insight_text: &str,
    state: MonitorState,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO ai_insights (patient_id, insight_text, state) VALUES (?, ?, ?)")
        .bind(patient_id)
        .bind(insight_text)
        .bind(state.as_str())
        .execute(pool)
        .await?;
    Ok(())
}

/// Number of insights generated while the patient was at risk; feeds the
/// dashboard's "risk events prevented" stat.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn count_risk_insights(pool: &SqlitePool, patient_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM ai_insights WHERE patient_id = ? AND state = ?")
        .bind(patient_id)
        .bind(MonitorState::Risk.as_str())
        .fetch_one(pool)
        .await
}
