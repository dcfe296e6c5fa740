//! Read operations for the `health_metrics` table.

use sqlx::SqlitePool;

use healthwatch_core::{MetricSample, Period};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MetricRow {
    pub label: String,
    pub hr: i64,
    pub resting_hr: i64,
    pub bp_sys: i64,
    pub bp_dia: i64,
    pub steps: i64,
    pub sleep: f64,
    pub activity_min: i64,
}

impl From<MetricRow> for MetricSample {
    fn from(row: MetricRow) -> Self {
        MetricSample {
            label: row.label,
            hr: row.hr,
            resting_hr: row.resting_hr,
            bp_sys: row.bp_sys,
            bp_dia: row.bp_dia,
            steps: row.steps,
            sleep: row.sleep,
            activity_min: row.activity_min,
        }
    }
}

/// Metric samples for a reporting period, in insertion order.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_health_metrics(
    pool: &SqlitePool,
    patient_id: i64,
    period: Period,
) -> Result<Vec<MetricSample>, sqlx::Error> {
    let rows = sqlx::query_as::<_, MetricRow>(
        "SELECT label, hr, resting_hr, bp_sys, bp_dia, steps, sleep, activity_min \
         FROM health_metrics WHERE patient_id = ? AND period_type = ? ORDER BY id",
    )
    .bind(patient_id)
    .bind(period.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(MetricSample::from).collect())
}
