use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use crate::predict::error::PredictError;
use crate::predict::GroundPoint;

/// Earth-observation craft the service can look up.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    ToSchema,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SatelliteId {
    #[default]
    Landsat8,
    Landsat9,
}

impl SatelliteId {
    pub const ALL: [SatelliteId; 2] = [SatelliteId::Landsat8, SatelliteId::Landsat9];

    pub fn norad_id(self) -> u32 {
        match self {
            SatelliteId::Landsat8 => 39084,
            SatelliteId::Landsat9 => 49260,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SatelliteId::Landsat8 => "Landsat 8",
            SatelliteId::Landsat9 => "Landsat 9",
        }
    }

    /// Parse an optional selector, falling back to the default craft when it is absent or blank.
    pub fn from_param(param: Option<&str>) -> Result<Self, PredictError> {
        match param.map(str::trim) {
            None | Some("") => Ok(SatelliteId::default()),
            Some(key) => key.parse(),
        }
    }
}

impl FromStr for SatelliteId {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SatelliteId::ALL
            .into_iter()
            .find(|id| id.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| PredictError::InvalidInput(format!("unknown satellite: {}", s)))
    }
}

/// Catalog entry for one supported satellite
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SatelliteInfo {
    pub key: SatelliteId,
    pub name: String,
    pub norad_id: u32,
}

impl From<SatelliteId> for SatelliteInfo {
    fn from(id: SatelliteId) -> Self {
        SatelliteInfo {
            key: id,
            name: id.display_name().to_string(),
            norad_id: id.norad_id(),
        }
    }
}

/// Raw two-line element set as fetched from a TLE source
#[derive(Debug, Clone, PartialEq)]
pub struct TleSet {
    pub satellite: SatelliteId,
    pub name: String,
    pub line1: String,
    pub line2: String,
}

/// Sub-satellite point evaluated at one step of the search.
#[derive(Debug, Clone, Copy)]
pub struct ProximitySample {
    pub timestamp: DateTime<Utc>,
    pub sub_satellite: GroundPoint,
    pub score: f64,
}

/// Approximate overpass time for one satellite over one location
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PassEstimate {
    pub satellite: String,
    pub satellite_key: SatelliteId,
    pub norad_id: u32,
    pub tle_source: String,
    pub window_hours: f64,
    #[serde(serialize_with = "serialize_iso_millis")]
    pub window_start: DateTime<Utc>,
    #[serde(
        rename = "approxClosestApproachUTC",
        serialize_with = "serialize_iso_millis"
    )]
    pub approx_closest_approach_utc: DateTime<Utc>,
    pub note: String,
}

fn serialize_iso_millis<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}
