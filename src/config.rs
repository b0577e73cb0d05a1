use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{DEFAULT_LOG_FILE, DEFAULT_NOTIFICATION_TTL_MS, DEFAULT_SIMULATED_DELAY_MS};

const CONFIG_FILE: &str = "config.yaml";

/// User configuration, read from `~/.devscope/config.yaml`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Latency of the simulated lookups
    pub simulated_delay_ms: u64,
    /// Fixed RNG seed; taken from the clock when unset
    pub seed: Option<u64>,
    pub log_file: String,
    pub notification_ttl_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            simulated_delay_ms: DEFAULT_SIMULATED_DELAY_MS,
            seed: None,
            log_file: String::from(DEFAULT_LOG_FILE),
            notification_ttl_ms: DEFAULT_NOTIFICATION_TTL_MS,
        }
    }
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".devscope")
    }

    /// Load from the default location, falling back to defaults when no file exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_dir().join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.simulated_delay_ms == 0 {
            bail!("simulated_delay_ms must be greater than zero");
        }
        if self.log_file.trim().is_empty() {
            bail!("log_file must not be empty");
        }
        Ok(())
    }

    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    /// Configured seed, or one derived from the current time
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            let now = chrono::Utc::now();
            now.timestamp_nanos_opt()
                .map(|n| n as u64)
                .unwrap_or_else(|| now.timestamp() as u64)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.simulated_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "simulated_delay_ms: 250\nseed: 42\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.simulated_delay_ms, 250);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.resolve_seed(), 42);
        assert_eq!(config.log_file, DEFAULT_LOG_FILE);
    }

    #[test]
    fn test_zero_delay_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "simulated_delay_ms: 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "simulated_delay_ms: [not, a, number]\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }
}
