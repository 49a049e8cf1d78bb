use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("TLE data unavailable: {0}")]
    DataUnavailable(String),
    #[error("No pass found in window")]
    NoPassFound,
    #[error("Propagation error: {0}")]
    Propagation(String),
}
