use axum::{extract::State, Extension, Json};
use serde::Serialize;

use healthwatch_core::TrendPoint;
use healthwatch_db::DEMO_PATIENT_ID;

use crate::middleware::RequestId;

use super::{
    generate_and_store_insight, map_db_error, ApiError, ApiResponse, AppState, ResponseMeta,
    VitalsPayload,
};

#[derive(Debug, Serialize)]
pub(super) struct SyncPayload {
    #[serde(flatten)]
    vitals: VitalsPayload,
    trend: Vec<TrendPoint>,
}

/// Device-sync simulation: flips the patient between the stable and risk
/// states, stamps the risk vitals time on entry, and returns the new
/// state's vitals, a fresh insight, and the matching trend series.
pub(super) async fn sync(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<SyncPayload>>, ApiError> {
    let patient = healthwatch_db::get_patient(&state.pool, DEMO_PATIENT_ID)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let new_state = patient.current_state.toggled();
    healthwatch_db::set_patient_state(&state.pool, DEMO_PATIENT_ID, new_state)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let vitals = healthwatch_db::get_vitals(&state.pool, DEMO_PATIENT_ID, new_state)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let trend = healthwatch_db::list_trend_scores(&state.pool, DEMO_PATIENT_ID, new_state)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &healthwatch_db::DbError::from(e)))?;

    tracing::info!(from = %patient.current_state, to = %new_state, "device sync");

    let insight = generate_and_store_insight(&state, &patient, &vitals).await;

    Ok(Json(ApiResponse {
        data: SyncPayload {
            vitals: VitalsPayload::new(vitals, insight, new_state),
            trend,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
