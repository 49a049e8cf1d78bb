use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use crate::power::PowerResponse;
use crate::predict::{PassEstimate, SatelliteId, SatelliteInfo};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::satellite::predict_pass,
        super::api::satellite::list_satellites,
        super::api::power::daily_point,
    ),
    components(
        schemas(
            PassEstimate,
            SatelliteId,
            SatelliteInfo,
            PowerResponse,
            ErrorResponse,
        )
    ),
    info(
        title = "Overpass API",
        description = "Approximate satellite overpass times and point weather data",
        version = "0.1.0"
    ),
    tags(
        (name = "satellite", description = "Ground-track proximity search"),
        (name = "weather", description = "NASA POWER proxy")
    )
)]
pub struct ApiDoc;
