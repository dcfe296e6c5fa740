mod facilities;
mod metrics;
mod patient;
mod stats;
mod sync;
mod trend;
mod vitals;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use healthwatch_core::{MonitorState, Patient, VitalsRecord};
use healthwatch_insight::InsightClient;
use healthwatch_locator::{OverpassClient, ResolverConfig};

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// `None` when no API key is configured; insights degrade to the
    /// rule-based fallback text.
    pub insight: Option<Arc<InsightClient>>,
    pub overpass: Arc<OverpassClient>,
    pub lookup_defaults: ResolverConfig,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" | "no_facilities" | "no-coordinates-resolvable" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "location-unsupported" | "location-denied" | "location-unavailable"
            | "location-timeout" => StatusCode::UNPROCESSABLE_ENTITY,
            "query-transport-error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_db_error(request_id: String, error: &healthwatch_db::DbError) -> ApiError {
    match error {
        healthwatch_db::DbError::NotFound => {
            ApiError::new(request_id, "not_found", "record not found")
        }
        _ => {
            tracing::error!(error = %error, "database query failed");
            ApiError::new(request_id, "internal_error", "database query failed")
        }
    }
}

/// Generate a caregiver insight for the vitals snapshot and append it to
/// the insight log.
///
/// Generation failures degrade to the advisory text, so a vitals read never
/// turns into a 500 because the insight service is down. With no client
/// configured, the deterministic rule-based paragraph is used directly.
pub(super) async fn generate_and_store_insight(
    state: &AppState,
    patient: &Patient,
    vitals: &VitalsRecord,
) -> String {
    let text = match &state.insight {
        Some(client) => match client.generate(patient, vitals).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "insight generation failed");
                err.advisory()
            }
        },
        None => {
            tracing::debug!("no insight client configured, using rule-based fallback");
            healthwatch_insight::fallback_insight(patient, vitals)
        }
    };

    if let Err(err) =
        healthwatch_db::record_insight(&state.pool, patient.id, &text, vitals.state).await
    {
        tracing::error!(error = %err, "failed to record insight");
    }

    text
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/patient", get(patient::get_patient))
        .route("/api/v1/vitals", get(vitals::get_vitals))
        .route("/api/v1/trend", get(trend::get_trend))
        .route("/api/v1/health-data", get(metrics::get_health_data))
        .route("/api/v1/health-summary", get(metrics::get_health_summary))
        .route("/api/v1/sync", post(sync::sync))
        .route("/api/v1/stats", get(stats::get_stats))
        .route(
            "/api/v1/facilities/nearest",
            post(facilities::nearest_facility),
        )
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match healthwatch_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

/// Vitals payload shared by the vitals and sync endpoints: the snapshot
/// plus the generated insight and the state's theme color.
#[derive(Debug, Serialize)]
pub(super) struct VitalsPayload {
    #[serde(flatten)]
    pub vitals: VitalsRecord,
    pub insight: String,
    pub theme_color: &'static str,
}

impl VitalsPayload {
    pub(super) fn new(vitals: VitalsRecord, insight: String, state: MonitorState) -> Self {
        Self {
            vitals,
            insight,
            theme_color: state.theme_color(),
        }
    }
}
