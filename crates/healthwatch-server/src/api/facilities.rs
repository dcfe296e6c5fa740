use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use healthwatch_locator::{
    resolve_nearest, FailedLocation, GeoPoint, LocationError, LookupOutcome, ResolvedFacility,
    ResolverConfig, StaticLocation,
};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Lookup request from the SPA. The browser owns position acquisition: it
/// reports either an acquired fix or the geolocation error code (1 =
/// permission denied, 2 = position unavailable, 3 = timeout) so the server
/// can answer with the matching advisory.
#[derive(Debug, Deserialize)]
pub(super) struct NearestFacilityRequest {
    latitude: Option<f64>,
    longitude: Option<f64>,
    location_error_code: Option<u8>,
    category: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct NearestFacilityPayload {
    facility: ResolvedFacility,
}

pub(super) async fn nearest_facility(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<NearestFacilityRequest>,
) -> Result<Json<ApiResponse<NearestFacilityPayload>>, ApiError> {
    let config = ResolverConfig {
        radius_km: state.lookup_defaults.radius_km,
        category: request
            .category
            .unwrap_or_else(|| state.lookup_defaults.category.clone()),
    };

    let outcome = match request.location_error_code {
        Some(code) => {
            let Some(error) = LocationError::from_code(code) else {
                return Err(ApiError::new(
                    req_id.0,
                    "validation_error",
                    format!("unknown geolocation error code {code}"),
                ));
            };
            let location = FailedLocation::new(error);
            resolve_nearest(&location, state.overpass.as_ref(), &config).await
        }
        None => {
            let (Some(latitude), Some(longitude)) = (request.latitude, request.longitude) else {
                return Err(ApiError::new(
                    req_id.0,
                    "validation_error",
                    "latitude and longitude are required when no error code is reported",
                ));
            };
            let position = GeoPoint::new(latitude, longitude).map_err(|e| {
                ApiError::new(req_id.0.clone(), "validation_error", e.to_string())
            })?;
            let location = StaticLocation::new(position);
            resolve_nearest(&location, state.overpass.as_ref(), &config).await
        }
    };

    match outcome {
        LookupOutcome::Found(facility) => Ok(Json(ApiResponse {
            data: NearestFacilityPayload { facility },
            meta: ResponseMeta::new(req_id.0),
        })),
        LookupOutcome::NotFound => Err(ApiError::new(
            req_id.0,
            "no_facilities",
            format!(
                "no {} found within {} km",
                config.category, config.radius_km
            ),
        )),
        LookupOutcome::Failed(failure) => {
            Err(ApiError::new(req_id.0, failure.code(), failure.advisory()))
        }
    }
}
