//! MergeService: orchestrates sources and deserializes to TraceConfig.

use crate::config::sources::{environment, file};
use crate::config::{TraceConfig, CONFIG_FILE_NAME};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> `tracechain.toml` in `dir` -> environment (highest).
    pub fn load(dir: &Path) -> Result<TraceConfig, ConfigError> {
        let builder = file::add_to_builder(base(), &dir.join(CONFIG_FILE_NAME), false);
        let builder = environment::add_to_builder(builder)?;
        builder.build()?.try_deserialize()
    }

    /// Load a required file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<TraceConfig, ConfigError> {
        let builder = file::add_to_builder(base(), path, true);
        let builder = environment::add_to_builder(builder)?;
        builder.build()?.try_deserialize()
    }
}

fn base() -> ConfigBuilder<DefaultState> {
    Config::builder()
}
