use chrono::{DateTime, Utc};

use crate::predict::error::PredictError;
use crate::predict::propagation::{Propagator, Sgp4Propagator};
use crate::predict::types::{PassEstimate, ProximitySample, SatelliteId};
use crate::predict::{GroundPoint, SearchWindow, TleSource};

pub const APPROXIMATION_NOTE: &str = "This is an approximation based on subsatellite \
    ground-track proximity. For precise AOS/LOS/elevation, implement full topocentric \
    calculations.";

/// Scan the window and return the sample whose sub-satellite point is closest to `target`.
///
/// Steps where the propagator yields nothing usable are skipped. Equal scores keep
/// the earlier sample.
pub fn find_closest_approach<P: Propagator + ?Sized>(
    propagator: &P,
    target: &GroundPoint,
    start: DateTime<Utc>,
    window: SearchWindow,
) -> Result<ProximitySample, PredictError> {
    let mut best: Option<ProximitySample> = None;
    let mut skipped = 0usize;

    for timestamp in window.timestamps(start) {
        let Some(sample) = sample_at(propagator, target, timestamp) else {
            skipped += 1;
            continue;
        };
        if is_better(&sample, best.as_ref()) {
            best = Some(sample);
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {} unusable samples in {}h window", skipped, window.hours());
    }

    best.ok_or(PredictError::NoPassFound)
}

fn sample_at<P: Propagator + ?Sized>(
    propagator: &P,
    target: &GroundPoint,
    timestamp: DateTime<Utc>,
) -> Option<ProximitySample> {
    let geodetic = match propagator.geodetic(timestamp) {
        Ok(geodetic) => geodetic,
        Err(e) => {
            log::trace!("No position at {}: {}", timestamp, e);
            return None;
        }
    };
    if !geodetic.point.is_finite() || !geodetic.height_km.is_finite() {
        return None;
    }

    Some(ProximitySample {
        timestamp,
        sub_satellite: geodetic.point,
        score: geodetic.point.proximity_score(target),
    })
}

fn is_better(candidate: &ProximitySample, best: Option<&ProximitySample>) -> bool {
    best.map_or(true, |b| candidate.score > b.score)
}

/// Fetch fresh elements for `satellite` and search for its closest approach to `target`.
pub async fn estimate_pass(
    source: &TleSource,
    satellite: SatelliteId,
    target: GroundPoint,
    start: DateTime<Utc>,
    window: SearchWindow,
) -> Result<PassEstimate, PredictError> {
    let tle = source.fetch(satellite).await?;
    let propagator = Sgp4Propagator::from_tle(&tle)?;
    log::debug!("Using {} elements from epoch {}", tle.name, propagator.epoch());

    let best = find_closest_approach(&propagator, &target, start, window)?;
    log::info!(
        "Closest approach of {} to ({:.4}, {:.4}) at {} (sub-satellite {:.2}, {:.2})",
        tle.name,
        target.latitude_deg(),
        target.longitude_deg(),
        best.timestamp,
        best.sub_satellite.latitude_deg(),
        best.sub_satellite.longitude_deg(),
    );

    Ok(PassEstimate {
        satellite_key: tle.satellite,
        norad_id: tle.satellite.norad_id(),
        satellite: tle.name,
        tle_source: source.label().to_string(),
        window_hours: window.hours(),
        window_start: start,
        approx_closest_approach_utc: best.timestamp,
        note: APPROXIMATION_NOTE.to_string(),
    })
}
