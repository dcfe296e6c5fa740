use std::str::FromStr;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use healthwatch_core::{summarize_metrics, CoreError, MetricSample, Period, PeriodSummary};
use healthwatch_db::DEMO_PATIENT_ID;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct PeriodQuery {
    period: Option<String>,
}

fn parse_period(req_id: &str, query: &PeriodQuery) -> Result<Period, ApiError> {
    match &query.period {
        None => Ok(Period::Week),
        Some(raw) => Period::from_str(raw).map_err(|_| {
            ApiError::new(
                req_id.to_owned(),
                "validation_error",
                format!("unknown period \"{raw}\"; expected day, week, month or year"),
            )
        }),
    }
}

pub(super) async fn get_health_data(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ApiResponse<Vec<MetricSample>>>, ApiError> {
    let period = parse_period(&req_id.0, &query)?;

    let samples = healthwatch_db::list_health_metrics(&state.pool, DEMO_PATIENT_ID, period)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &healthwatch_db::DbError::from(e)))?;

    Ok(Json(ApiResponse {
        data: samples,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_health_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ApiResponse<PeriodSummary>>, ApiError> {
    let period = parse_period(&req_id.0, &query)?;

    let samples = healthwatch_db::list_health_metrics(&state.pool, DEMO_PATIENT_ID, period)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &healthwatch_db::DbError::from(e)))?;

    let summary = summarize_metrics(period, &samples).map_err(|e| match e {
        CoreError::EmptySummaryInput => ApiError::new(
            req_id.0.clone(),
            "not_found",
            "no health data found for this period",
        ),
        other => {
            tracing::error!(error = %other, "summary computation failed");
            ApiError::new(req_id.0.clone(), "internal_error", "summary computation failed")
        }
    })?;

    Ok(Json(ApiResponse {
        data: summary,
        meta: ResponseMeta::new(req_id.0),
    }))
}
