//! ConfigLoader facade delegating to the merge service.

use super::merge::service::MergeService;
use super::TraceConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `tracechain.toml` from `dir` when present, then the environment.
    pub fn load(dir: &Path) -> Result<TraceConfig, ApiError> {
        let config = MergeService::load(dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a specific file (which must exist), then the environment.
    pub fn load_from_file(path: &Path) -> Result<TraceConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> TraceConfig {
        TraceConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(config.chain.difficulty, 1);
        assert_eq!(config.feed.interval_ms, 25_000);
        assert_eq!(config.feed.start_delay_ms, 5_000);
        assert_eq!(config.insight, ConfigLoader::default().insight);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("tracechain.toml"),
            r#"
[chain]
difficulty = 2

[feed]
interval_ms = 1000
seed = 9

[insight.aggregate]
economic = 0.25
trust = 0.20
"#,
        )
        .unwrap();

        let config = ConfigLoader::load(dir.path()).unwrap();
        assert_eq!(config.chain.difficulty, 2);
        assert_eq!(config.feed.interval_ms, 1000);
        assert_eq!(config.feed.seed, Some(9));
        assert_eq!(config.feed.start_delay_ms, 5_000);
        assert_eq!(config.insight.aggregate.economic, 0.25);
        assert_eq!(config.insight.aggregate.ecosystem, 0.10);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("weights.toml");
        fs::write(&path, "[insight.aggregate]\ntrust = 0.9\n").unwrap();
        assert!(matches!(
            ConfigLoader::load_from_file(&path),
            Err(ApiError::ConfigError(_))
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = ConfigLoader::load_from_file(&dir.path().join("absent.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_overlay() {
        let dir = TempDir::new().unwrap();
        std::env::set_var("TRACECHAIN__FEED__SAMPLE_COUNT", "7");
        let result = ConfigLoader::load(dir.path());
        std::env::remove_var("TRACECHAIN__FEED__SAMPLE_COUNT");
        assert_eq!(result.unwrap().feed.sample_count, 7);
    }
}
