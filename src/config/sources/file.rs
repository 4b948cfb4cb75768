//! TOML file source.

use config::builder::DefaultState;
use config::{ConfigBuilder, File};
use std::path::Path;

/// Add a config file to the builder. Format follows the file extension.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(File::from(path).required(required))
}
