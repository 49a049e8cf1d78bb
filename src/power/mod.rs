mod client;
mod error;

pub use client::{DailyPointRequest, PowerClient, PowerResponse, NASA_POWER_URL};
pub use error::PowerError;
