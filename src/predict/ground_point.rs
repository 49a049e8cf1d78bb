use crate::predict::error::PredictError;

/// A latitude/longitude pair on the Earth's surface, held in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPoint {
    pub latitude_rad: f64,
    pub longitude_rad: f64,
}

impl GroundPoint {
    pub fn from_radians(latitude_rad: f64, longitude_rad: f64) -> Self {
        Self {
            latitude_rad,
            longitude_rad,
        }
    }

    pub fn from_degrees(latitude_deg: f64, longitude_deg: f64) -> Result<Self, PredictError> {
        if !latitude_deg.is_finite() || !longitude_deg.is_finite() {
            return Err(PredictError::InvalidInput("lat/lon required".into()));
        }
        Ok(Self::from_radians(
            latitude_deg.to_radians(),
            longitude_deg.to_radians(),
        ))
    }

    /// Build a target from raw query values. Missing or unparsable values are rejected.
    pub fn from_query(latitude: Option<&str>, longitude: Option<&str>) -> Result<Self, PredictError> {
        let (lat, lon) = parse_coordinates(latitude, longitude)?;
        Self::from_degrees(lat, lon)
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude_rad.to_degrees()
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_rad.to_degrees()
    }

    pub fn is_finite(&self) -> bool {
        self.latitude_rad.is_finite() && self.longitude_rad.is_finite()
    }

    /// Negated sum of absolute angular differences. Higher is closer.
    ///
    /// Longitude is compared without wrap-around, so points either side of the
    /// antimeridian score as far apart.
    pub fn proximity_score(&self, target: &GroundPoint) -> f64 {
        let d_lat = (self.latitude_rad - target.latitude_rad).abs();
        let d_lon = (self.longitude_rad - target.longitude_rad).abs();
        -(d_lat + d_lon)
    }
}

/// Parse a latitude/longitude pair in degrees, requiring both to be finite numbers.
pub fn parse_coordinates(
    latitude: Option<&str>,
    longitude: Option<&str>,
) -> Result<(f64, f64), PredictError> {
    let parse = |v: Option<&str>| {
        v.and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|n| n.is_finite())
    };
    match (parse(latitude), parse(longitude)) {
        (Some(lat), Some(lon)) => Ok((lat, lon)),
        _ => Err(PredictError::InvalidInput("lat/lon required".into())),
    }
}
