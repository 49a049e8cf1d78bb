use std::sync::Arc;

use crate::power::PowerClient;
use crate::predict::TleSource;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub tle_source: Arc<TleSource>,
    pub power: Arc<PowerClient>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            tle_source: Arc::new(config.tle.source()),
            power: Arc::new(config.power.client()),
        }
    }
}
