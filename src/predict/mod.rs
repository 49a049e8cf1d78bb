mod error;
mod ground_point;
mod pass_finder;
mod propagation;
mod tle_loader;
mod types;
mod window;

pub use error::PredictError;
pub use ground_point::{parse_coordinates, GroundPoint};
pub use pass_finder::estimate_pass;
pub use tle_loader::{TleSource, CELESTRAK_GP_URL};
pub use types::{PassEstimate, SatelliteId, SatelliteInfo};
pub use window::SearchWindow;
