use std::f64::consts::{PI, TAU};

use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;
use crate::predict::types::TleSet;
use crate::predict::GroundPoint;

// WGS-84
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6378.137;
pub const EARTH_POLAR_RADIUS_KM: f64 = 6356.7523142;
const GEODETIC_ITERATIONS: usize = 20;

/// Source of inertial satellite positions over time.
pub trait Propagator {
    /// Position in the earth-centered inertial (TEME) frame, in kilometers.
    fn eci_position_km(&self, timestamp: DateTime<Utc>) -> Result<[f64; 3], PredictError>;

    /// Sub-satellite point and height at `timestamp`.
    fn geodetic(&self, timestamp: DateTime<Utc>) -> Result<Geodetic, PredictError> {
        Ok(eci_to_geodetic(self.eci_position_km(timestamp)?, gmst(timestamp)))
    }
}

pub struct Sgp4Propagator {
    elements: Elements,
    constants: Constants,
}

impl Sgp4Propagator {
    pub fn from_tle(tle: &TleSet) -> Result<Self, PredictError> {
        let elements = Elements::from_tle(
            Some(tle.name.clone()),
            tle.line1.as_bytes(),
            tle.line2.as_bytes(),
        )
        .map_err(|e| PredictError::DataUnavailable(format!("invalid TLE for {}: {}", tle.name, e)))?;

        let constants = Constants::from_elements(&elements).map_err(|e| {
            PredictError::DataUnavailable(format!("unusable elements for {}: {}", tle.name, e))
        })?;

        Ok(Self {
            elements,
            constants,
        })
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.elements.datetime.and_utc()
    }
}

impl Propagator for Sgp4Propagator {
    fn eci_position_km(&self, timestamp: DateTime<Utc>) -> Result<[f64; 3], PredictError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
            .map_err(|e| PredictError::Propagation(e.to_string()))?;

        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| PredictError::Propagation(e.to_string()))?;

        Ok(prediction.position)
    }
}

/// Greenwich mean sidereal time in radians
pub fn gmst(timestamp: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&timestamp.naive_utc()))
}

#[derive(Debug, Clone, Copy)]
pub struct Geodetic {
    pub point: GroundPoint,
    pub height_km: f64,
}

/// Convert an inertial position to geodetic coordinates on the WGS-84 ellipsoid.
pub fn eci_to_geodetic(eci: [f64; 3], gmst: f64) -> Geodetic {
    let a = EARTH_EQUATORIAL_RADIUS_KM;
    let f = (EARTH_EQUATORIAL_RADIUS_KM - EARTH_POLAR_RADIUS_KM) / EARTH_EQUATORIAL_RADIUS_KM;
    let e2 = 2.0 * f - f * f;

    let [x, y, z] = eci;
    let r = (x * x + y * y).sqrt();

    let longitude = (y.atan2(x) - gmst + PI).rem_euclid(TAU) - PI;

    let mut latitude = z.atan2(r);
    let mut c = 1.0;
    for _ in 0..GEODETIC_ITERATIONS {
        let sin_lat = latitude.sin();
        c = 1.0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        latitude = (z + a * c * e2 * sin_lat).atan2(r);
    }
    let height_km = r / latitude.cos() - a * c;

    Geodetic {
        point: GroundPoint::from_radians(latitude, longitude),
        height_km,
    }
}

/// Inverse of [`eci_to_geodetic`], used to build synthetic trajectories.
#[cfg(test)]
pub fn geodetic_to_eci(point: &GroundPoint, height_km: f64, gmst: f64) -> [f64; 3] {
    let a = EARTH_EQUATORIAL_RADIUS_KM;
    let f = (EARTH_EQUATORIAL_RADIUS_KM - EARTH_POLAR_RADIUS_KM) / EARTH_EQUATORIAL_RADIUS_KM;
    let e2 = 2.0 * f - f * f;
    let sin_lat = point.latitude_rad.sin();
    let cos_lat = point.latitude_rad.cos();
    let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let inertial_lon = point.longitude_rad + gmst;
    [
        (n + height_km) * cos_lat * inertial_lon.cos(),
        (n + height_km) * cos_lat * inertial_lon.sin(),
        (n * (1.0 - e2) + height_km) * sin_lat,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::types::SatelliteId;
    use chrono::{Duration, TimeZone};

    fn landsat8_fixture() -> TleSet {
        TleSet {
            satellite: SatelliteId::Landsat8,
            name: "LANDSAT 8".into(),
            line1: "1 39084U 13008A   26290.50000000  .00000300  00000-0  76000-4 0  9990".into(),
            line2: "2 39084  98.2000  70.0000 0001200  95.0000 265.1300 14.57100000999999".into(),
        }
    }

    #[test]
    fn geodetic_conversion_inverts_ellipsoid_position() {
        let point = GroundPoint::from_degrees(40.0, -74.0).unwrap();
        let eci = geodetic_to_eci(&point, 705.0, 1.25);
        let geo = eci_to_geodetic(eci, 1.25);

        assert!((geo.point.latitude_deg() - 40.0).abs() < 1e-9);
        assert!((geo.point.longitude_deg() + 74.0).abs() < 1e-9);
        assert!((geo.height_km - 705.0).abs() < 1e-6);
    }

    #[test]
    fn longitude_is_wrapped_into_half_open_range() {
        let geo = eci_to_geodetic([7000.0, 0.0, 0.0], 3.0 * PI / 2.0);
        assert!((geo.point.longitude_deg() - 90.0).abs() < 1e-9);
        assert!(geo.point.latitude_rad.abs() < 1e-12);
    }

    #[test]
    fn sgp4_propagates_fixture_to_low_earth_orbit() {
        let propagator = Sgp4Propagator::from_tle(&landsat8_fixture()).unwrap();
        let epoch = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        assert!((propagator.epoch() - epoch).num_milliseconds().abs() < 1000);

        for offset in [0, 45, 90, 600] {
            let t = epoch + Duration::minutes(offset);
            let geo = eci_to_geodetic(propagator.eci_position_km(t).unwrap(), gmst(t));
            assert!(geo.height_km > 650.0 && geo.height_km < 760.0, "height {}", geo.height_km);
            assert!(geo.point.latitude_deg().abs() <= 90.0);
        }
    }

    #[test]
    fn rejects_corrupted_element_lines() {
        let mut tle = landsat8_fixture();
        tle.line2 = tle.line2.replace("98.2000", "98.2X00");
        assert!(matches!(
            Sgp4Propagator::from_tle(&tle),
            Err(PredictError::DataUnavailable(_))
        ));
    }
}
