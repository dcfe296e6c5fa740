//! Read operations for the `trend_scores` table.

use sqlx::SqlitePool;

use healthwatch_core::{MonitorState, TrendPoint};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TrendRow {
    pub day_label: String,
    pub score: i64,
}

impl From<TrendRow> for TrendPoint {
    fn from(row: TrendRow) -> Self {
        TrendPoint {
            name: row.day_label,
            score: row.score,
        }
    }
}

/// Trend points for a state, in chart order.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn list_trend_scores(
    pool: &SqlitePool,
    patient_id: i64,
    state: MonitorState,
) -> Result<Vec<TrendPoint>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TrendRow>(
        "SELECT day_label, score FROM trend_scores \
         WHERE patient_id = ? AND state = ? ORDER BY sort_order",
    )
    .bind(patient_id)
    .bind(state.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(TrendPoint::from).collect())
}
