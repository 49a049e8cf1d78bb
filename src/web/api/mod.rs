pub mod error;
pub mod power;
pub mod satellite;
