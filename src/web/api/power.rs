use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::power::{DailyPointRequest, PowerResponse};
use crate::predict::parse_coordinates;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PowerQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/nasa/power",
    tag = "weather",
    params(
        ("lat" = f64, Query, description = "Latitude (degrees)"),
        ("lon" = f64, Query, description = "Longitude (degrees)"),
        ("start" = Option<String>, Query, description = "First day, YYYYMMDD (default 20240101)"),
        ("end" = Option<String>, Query, description = "Last day, YYYYMMDD (default today)")
    ),
    responses(
        (status = 200, description = "NASA POWER daily point data", body = PowerResponse),
        (status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
        (status = 502, description = "NASA POWER unavailable", body = ErrorResponse)
    )
)]
pub async fn daily_point(
    State(state): State<AppState>,
    Query(query): Query<PowerQuery>,
) -> ApiResult<impl IntoResponse> {
    let (lat, lon) = parse_coordinates(query.lat.as_deref(), query.lon.as_deref())?;
    let request = DailyPointRequest::new(
        lat,
        lon,
        query.start.as_deref(),
        query.end.as_deref(),
        Utc::now().date_naive(),
    )?;

    let response = state.power.fetch_daily_point(&request).await?;

    Ok(([(header::CACHE_CONTROL, "no-store")], Json(response)))
}
