use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_WINDOW_HOURS: f64 = 72.0;
pub const MAX_WINDOW_HOURS: f64 = 240.0;
pub const STEP_SECONDS: i64 = 10;

/// Length of the forward-looking search, in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchWindow {
    hours: f64,
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self {
            hours: DEFAULT_WINDOW_HOURS,
        }
    }
}

impl SearchWindow {
    /// Negative and non-finite lengths fall back to the default; long ones are clamped.
    pub fn from_hours(hours: f64) -> Self {
        if !hours.is_finite() || hours < 0.0 {
            return Self::default();
        }
        Self {
            hours: hours.min(MAX_WINDOW_HOURS),
        }
    }

    pub fn from_param(param: Option<&str>) -> Self {
        param
            .and_then(|s| s.trim().parse::<f64>().ok())
            .map(Self::from_hours)
            .unwrap_or_default()
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn duration(&self) -> Duration {
        Duration::milliseconds((self.hours * 3_600_000.0).round() as i64)
    }

    /// Sample instants from `start` up to and including `start + duration`.
    pub fn timestamps(&self, start: DateTime<Utc>) -> impl Iterator<Item = DateTime<Utc>> {
        let end = start + self.duration();
        let step = Duration::seconds(STEP_SECONDS);
        std::iter::successors(Some(start), move |t| Some(*t + step))
            .take_while(move |t| *t <= end)
    }
}
