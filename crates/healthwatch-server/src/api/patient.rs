use axum::{extract::State, Extension, Json};

use healthwatch_core::Patient;
use healthwatch_db::DEMO_PATIENT_ID;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

pub(super) async fn get_patient(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    let patient = healthwatch_db::get_patient(&state.pool, DEMO_PATIENT_ID)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: patient,
        meta: ResponseMeta::new(req_id.0),
    }))
}
