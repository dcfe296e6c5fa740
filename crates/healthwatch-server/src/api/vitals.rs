use axum::{extract::State, Extension, Json};

use healthwatch_db::DEMO_PATIENT_ID;

use crate::middleware::RequestId;

use super::{
    generate_and_store_insight, map_db_error, ApiError, ApiResponse, AppState, ResponseMeta,
    VitalsPayload,
};

/// Vitals for the patient's current state, with a freshly generated
/// insight. The insight is regenerated on every read so a dashboard load
/// always reflects the latest snapshot.
pub(super) async fn get_vitals(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<VitalsPayload>>, ApiError> {
    let patient = healthwatch_db::get_patient(&state.pool, DEMO_PATIENT_ID)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let vitals = healthwatch_db::get_vitals(&state.pool, DEMO_PATIENT_ID, patient.current_state)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let insight = generate_and_store_insight(&state, &patient, &vitals).await;
    let current_state = patient.current_state;

    Ok(Json(ApiResponse {
        data: VitalsPayload::new(vitals, insight, current_state),
        meta: ResponseMeta::new(req_id.0),
    }))
}
