use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::predict::error::PredictError;
use crate::predict::types::{SatelliteId, TleSet};

pub const CELESTRAK_GP_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";

/// Where element sets come from. Every call goes back to the source.
#[derive(Debug, Clone)]
pub enum TleSource {
    Celestrak { url: String, timeout: Duration },
    Directory { folder: PathBuf },
}

impl TleSource {
    pub fn label(&self) -> &'static str {
        match self {
            TleSource::Celestrak { .. } => "Celestrak",
            TleSource::Directory { .. } => "Directory",
        }
    }

    pub async fn fetch(&self, satellite: SatelliteId) -> Result<TleSet, PredictError> {
        let text = match self {
            TleSource::Celestrak { url, timeout } => fetch_celestrak(url, *timeout, satellite).await,
            TleSource::Directory { folder } => read_directory(folder, satellite).await,
        };

        let parsed = text.and_then(|text| parse_tle_text(satellite, &text));
        if let Err(e) = &parsed {
            log::warn!("TLE lookup for {} via {} failed: {}", satellite, self.label(), e);
        }
        parsed
    }
}

async fn fetch_celestrak(
    url: &str,
    timeout: Duration,
    satellite: SatelliteId,
) -> Result<String, PredictError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| PredictError::DataUnavailable(e.to_string()))?;

    let response = client
        .get(url)
        .query(&[
            ("CATNR", satellite.norad_id().to_string()),
            ("FORMAT", "TLE".to_string()),
        ])
        .send()
        .await
        .map_err(|e| PredictError::DataUnavailable(format!("request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(PredictError::DataUnavailable(format!(
            "Celestrak returned HTTP {}",
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| PredictError::DataUnavailable(format!("failed to read response: {}", e)))
}

async fn read_directory(folder: &Path, satellite: SatelliteId) -> Result<String, PredictError> {
    let path = folder.join(format!("{}.tle", satellite.norad_id()));
    tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| PredictError::DataUnavailable(format!("{}: {}", path.display(), e)))
}

/// Pick the element lines out of a TLE response. The name is taken from the
/// line before line 1 when there is one.
pub fn parse_tle_text(satellite: SatelliteId, text: &str) -> Result<TleSet, PredictError> {
    let lines: Vec<&str> = text.trim().lines().map(str::trim_end).collect();

    let line1_index = lines
        .iter()
        .position(|l| l.starts_with("1 "))
        .ok_or_else(|| PredictError::DataUnavailable("line 1 not found".into()))?;
    let line2 = lines
        .iter()
        .find(|l| l.starts_with("2 "))
        .ok_or_else(|| PredictError::DataUnavailable("line 2 not found".into()))?;

    let name = match line1_index {
        0 => None,
        i => Some(lines[i - 1].trim()).filter(|n| !n.is_empty()),
    }
    .map(String::from)
    .unwrap_or_else(|| format!("NORAD {}", satellite.norad_id()));

    Ok(TleSet {
        satellite,
        name,
        line1: lines[line1_index].to_string(),
        line2: line2.to_string(),
    })
}
