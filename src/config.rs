use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::catalog::OrbitBand;
use crate::feed::{
    AnyProvider, CartesianUnits, FeedError, FeedJob, FileProvider, HttpProvider, Normalizer,
};
use crate::geo::LongitudeConvention;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Longest live query window accepted.
pub const MAX_TIME_WINDOW: Duration = Duration::from_secs(31 * 86_400);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: Option<ProviderConfig>,
    pub feed: FeedConfig,
    pub catalog: CatalogConfig,
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProviderConfig {
    File {
        path: PathBuf,
    },
    Http {
        base_url: String,
        #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
        timeout: Duration,
    },
}

impl ProviderConfig {
    pub fn build(&self) -> Result<AnyProvider, FeedError> {
        Ok(match self {
            ProviderConfig::File { path } => AnyProvider::File(FileProvider::new(path.clone())),
            ProviderConfig::Http { base_url, timeout } => {
                AnyProvider::Http(HttpProvider::new(base_url, *timeout)?)
            }
        })
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub coordinate_system: String,
    pub cartesian_units: CartesianUnits,
    pub longitude: LongitudeConvention,
    #[serde(deserialize_with = "deserialize_duration")]
    pub time_window: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub refresh_interval: Duration,
    pub batch_size: usize,
    /// Empty means every active satellite the provider lists.
    pub satellites: Vec<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            coordinate_system: "geo".to_string(),
            cartesian_units: CartesianUnits::default(),
            longitude: LongitudeConvention::default(),
            time_window: Duration::from_secs(3600),
            refresh_interval: Duration::from_secs(60),
            batch_size: 10,
            satellites: Vec::new(),
        }
    }
}

impl FeedConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_window.is_zero() || self.time_window > MAX_TIME_WINDOW {
            return Err(ConfigError::Invalid(format!(
                "feed.time_window must be between 1s and {}",
                humantime::format_duration(MAX_TIME_WINDOW)
            )));
        }
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "feed.refresh_interval must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(&self.coordinate_system, self.cartesian_units, self.longitude)
    }

    pub fn job(&self, satellites: Vec<String>) -> FeedJob {
        FeedJob {
            satellites,
            window: to_time_delta(self.time_window),
            batch_size: self.batch_size,
            normalizer: self.normalizer(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub band: OrbitBand,
    #[serde(deserialize_with = "deserialize_duration")]
    pub sample_step: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            band: OrbitBand::All,
            sample_step: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        config.feed.validate()?;
        Ok(config)
    }
}

/// Parses a human duration such as `90s`, `15m` or `1h 30m`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim()).map_err(|e| e.to_string())
}

pub fn to_time_delta(d: Duration) -> chrono::Duration {
    chrono::Duration::from_std(d).unwrap_or(chrono::Duration::MAX)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}
