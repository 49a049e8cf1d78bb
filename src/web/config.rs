use serde::{Deserialize, Deserializer};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::power::{PowerClient, NASA_POWER_URL};
use crate::predict::{TleSource, CELESTRAK_GP_URL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web: WebConfig,
    pub tle: TleConfig,
    pub power: PowerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum TleConfig {
    Celestrak {
        #[serde(default = "default_celestrak_url")]
        url: String,
        #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
        timeout: Duration,
    },
    Directory {
        folder: PathBuf,
    },
}

impl Default for TleConfig {
    fn default() -> Self {
        TleConfig::Celestrak {
            url: default_celestrak_url(),
            timeout: default_timeout(),
        }
    }
}

impl TleConfig {
    pub fn source(&self) -> TleSource {
        match self {
            TleConfig::Celestrak { url, timeout } => TleSource::Celestrak {
                url: url.clone(),
                timeout: *timeout,
            },
            TleConfig::Directory { folder } => TleSource::Directory {
                folder: folder.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PowerConfig {
    #[serde(default = "default_power_url")]
    pub base_url: String,
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            base_url: default_power_url(),
            timeout: default_timeout(),
        }
    }
}

impl PowerConfig {
    pub fn client(&self) -> PowerClient {
        PowerClient::new(self.base_url.clone(), self.timeout)
    }
}

fn default_celestrak_url() -> String {
    CELESTRAK_GP_URL.to_string()
}

fn default_power_url() -> String {
    NASA_POWER_URL.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
