use axum::{extract::State, Extension, Json};
use serde::Serialize;

use healthwatch_core::MonitorState;
use healthwatch_db::DEMO_PATIENT_ID;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct StatsPayload {
    risk_events_prevented: i64,
    avg_early_detection: String,
    active_caregivers: i64,
}

/// Dashboard footer stats.
///
/// The early-detection window counts how many days of the risk trend held
/// a score of 75 or more before the drop, at 24 h per day, floor 24 h.
pub(super) async fn get_stats(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<StatsPayload>>, ApiError> {
    let risk_events_prevented = healthwatch_db::count_risk_insights(&state.pool, DEMO_PATIENT_ID)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &healthwatch_db::DbError::from(e)))?;

    let active_caregivers = healthwatch_db::count_caregivers(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &healthwatch_db::DbError::from(e)))?;

    let risk_trend =
        healthwatch_db::list_trend_scores(&state.pool, DEMO_PATIENT_ID, MonitorState::Risk)
            .await
            .map_err(|e| map_db_error(req_id.0.clone(), &healthwatch_db::DbError::from(e)))?;

    let days_before_drop = risk_trend.iter().filter(|p| p.score >= 75).count();
    let avg_early_detection = if days_before_drop > 0 {
        format!("{}h", days_before_drop * 24)
    } else {
        "24h".to_owned()
    };

    Ok(Json(ApiResponse {
        data: StatsPayload {
            risk_events_prevented,
            avg_early_detection,
            active_caregivers,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
