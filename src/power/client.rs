use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::power::error::PowerError;

pub const NASA_POWER_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";
const PARAMETERS: &str = "T2M,PRECTOTCORR,WS2M,RH2M,ALLSKY_SFC_SW_DWN";
const COMMUNITY: &str = "AG";
const DEFAULT_START: &str = "20240101";
const DATE_FORMAT: &str = "%Y%m%d";

/// Daily agro-meteorological series for a single point.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPointRequest {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub start: String,
    pub end: String,
}

impl DailyPointRequest {
    /// Blank dates default to 2024-01-01 through `today`.
    pub fn new(
        latitude_deg: f64,
        longitude_deg: f64,
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, PowerError> {
        let start = match start.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => validate_date(s)?,
            None => DEFAULT_START.to_string(),
        };
        let end = match end.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => validate_date(s)?,
            None => today.format(DATE_FORMAT).to_string(),
        };

        Ok(Self {
            latitude_deg,
            longitude_deg,
            start,
            end,
        })
    }
}

fn validate_date(s: &str) -> Result<String, PowerError> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PowerError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| PowerError::InvalidDate(s.to_string()))?;
    Ok(s.to_string())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PowerResponse {
    pub source: String,
    pub url: String,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct PowerClient {
    base_url: String,
    timeout: Duration,
}

impl PowerClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self { base_url, timeout }
    }

    pub fn request_url(&self, request: &DailyPointRequest) -> String {
        format!(
            "{}?parameters={}&community={}&longitude={}&latitude={}&start={}&end={}&format=JSON",
            self.base_url,
            PARAMETERS,
            COMMUNITY,
            request.longitude_deg,
            request.latitude_deg,
            request.start,
            request.end
        )
    }

    pub async fn fetch_daily_point(
        &self,
        request: &DailyPointRequest,
    ) -> Result<PowerResponse, PowerError> {
        let url = self.request_url(request);
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| PowerError::Upstream(e.to_string()))?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| PowerError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            log::warn!("NASA POWER returned HTTP {} for {}", response.status(), url);
            return Err(PowerError::Upstream(response.status().as_u16().to_string()));
        }

        let data = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| PowerError::Upstream(e.to_string()))?;

        Ok(PowerResponse {
            source: "NASA POWER".to_string(),
            url,
            data,
        })
    }
}
