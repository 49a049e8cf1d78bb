use thiserror::Error;

#[derive(Debug, Error)]
pub enum PowerError {
    #[error("invalid date '{0}', expected YYYYMMDD")]
    InvalidDate(String),
    #[error("NASA POWER error: {0}")]
    Upstream(String),
}
