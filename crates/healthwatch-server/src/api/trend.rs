use axum::{extract::State, Extension, Json};

use healthwatch_core::TrendPoint;
use healthwatch_db::DEMO_PATIENT_ID;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn get_trend(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<TrendPoint>>>, ApiError> {
    let patient = healthwatch_db::get_patient(&state.pool, DEMO_PATIENT_ID)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let trend =
        healthwatch_db::list_trend_scores(&state.pool, DEMO_PATIENT_ID, patient.current_state)
            .await
            .map_err(|e| map_db_error(req_id.0.clone(), &healthwatch_db::DbError::from(e)))?;

    Ok(Json(ApiResponse {
        data: trend,
        meta: ResponseMeta::new(req_id.0),
    }))
}
