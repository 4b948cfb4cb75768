//! Configuration
//!
//! `TraceConfig` is assembled from an optional TOML file and `TRACECHAIN__*`
//! environment variables (`__` separates nested keys, e.g.
//! `TRACECHAIN__CHAIN__DIFFICULTY=2`). Every field has a default.

pub mod facade;

pub mod merge {
    pub mod service;
}

pub mod sources {
    pub mod environment;
    pub mod file;
}

use crate::chain::DEFAULT_DIFFICULTY;
use crate::error::ApiError;
use crate::insight::InsightConfig;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use facade::ConfigLoader;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "tracechain.toml";

/// Environment prefix for configuration overrides.
pub const ENV_PREFIX: &str = "TRACECHAIN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    pub chain: ChainConfig,
    pub feed: FeedConfig,
    pub insight: InsightConfig,
    pub logging: LoggingConfig,
}

impl TraceConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.feed.interval_ms == 0 {
            return Err(ApiError::ConfigError(
                "feed.interval_ms must be greater than zero".to_string(),
            ));
        }
        self.insight.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Leading zero hex characters sought when sealing (values above 2 act as 2).
    pub difficulty: u8,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub interval_ms: u64,
    pub start_delay_ms: u64,
    pub sample_count: usize,
    /// Fixed RNG seed for reproducible demo data.
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_ms: 25_000,
            start_delay_ms: 5_000,
            sample_count: 20,
            seed: None,
        }
    }
}

impl FeedConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }
}
