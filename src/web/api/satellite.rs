use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::predict::{estimate_pass, GroundPoint, PassEstimate, SatelliteId, SatelliteInfo, SearchWindow};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

/// Raw query values; parsing happens in the handler so malformed numbers map to our own errors.
#[derive(Debug, Deserialize)]
pub struct PassQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub hours: Option<String>,
    pub sat: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/satellite/pass",
    tag = "satellite",
    params(
        ("lat" = f64, Query, description = "Target latitude (degrees)"),
        ("lon" = f64, Query, description = "Target longitude (degrees)"),
        ("hours" = Option<f64>, Query, description = "Search window in hours (default 72, max 240)"),
        ("sat" = Option<SatelliteId>, Query, description = "Satellite key (default landsat8)")
    ),
    responses(
        (status = 200, description = "Approximate closest approach", body = PassEstimate),
        (status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
        (status = 404, description = "No usable sample in window", body = ErrorResponse),
        (status = 502, description = "TLE source unavailable", body = ErrorResponse)
    )
)]
pub async fn predict_pass(
    State(state): State<AppState>,
    Query(query): Query<PassQuery>,
) -> ApiResult<impl IntoResponse> {
    let target = GroundPoint::from_query(query.lat.as_deref(), query.lon.as_deref())?;
    let satellite = SatelliteId::from_param(query.sat.as_deref())?;
    let window = SearchWindow::from_param(query.hours.as_deref());

    let estimate = estimate_pass(&state.tle_source, satellite, target, Utc::now(), window).await?;

    Ok(([(header::CACHE_CONTROL, "no-store")], Json(estimate)))
}

#[utoipa::path(
    get,
    path = "/api/satellites",
    tag = "satellite",
    responses(
        (status = 200, description = "Supported satellites", body = Vec<SatelliteInfo>)
    )
)]
pub async fn list_satellites() -> Json<Vec<SatelliteInfo>> {
    Json(SatelliteId::ALL.into_iter().map(SatelliteInfo::from).collect())
}
