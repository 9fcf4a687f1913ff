// ⚙️ Configuration
//
// Optional TOML file; every key has a default, unknown keys are an error.
// Lookup: $POCKET_LEDGER_CONFIG, else ./pocket-ledger.toml, else defaults.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::entities::DEFAULT_EVENT_LOG_CAPACITY;
use crate::query::DateRange;

pub const CONFIG_ENV_VAR: &str = "POCKET_LEDGER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "pocket-ledger.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Entries kept in the event feed
    pub event_log_capacity: usize,

    /// Date range the transaction list opens with
    pub default_date_range: DateRange,

    /// Start with the sample wallets/transactions/events
    pub seed_sample_data: bool,

    /// Where the rolling log file goes
    pub log_dir: PathBuf,

    /// EnvFilter directive used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            event_log_capacity: DEFAULT_EVENT_LOG_CAPACITY,
            default_date_range: DateRange::Last7Days,
            seed_sample_data: true,
            log_dir: PathBuf::from("./logs"),
            log_filter: "pocket_ledger=debug,info".to_string(),
        }
    }
}

impl LedgerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: LedgerConfig = toml::from_str(text).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("Invalid config in {}", path.display()))
    }

    /// Resolve the config the binary should use
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }

        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if self.event_log_capacity == 0 {
            bail!("event_log_capacity must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.event_log_capacity, 12);
        assert_eq!(config.default_date_range, DateRange::Last7Days);
        assert!(config.seed_sample_data);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(LedgerConfig::from_toml_str("").unwrap(), LedgerConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = LedgerConfig::from_toml_str(
            r#"
            event_log_capacity = 20
            default_date_range = "all-time"
            seed_sample_data = false
            "#,
        )
        .unwrap();

        assert_eq!(config.event_log_capacity, 20);
        assert_eq!(config.default_date_range, DateRange::AllTime);
        assert!(!config.seed_sample_data);
        assert_eq!(config.log_dir, PathBuf::from("./logs"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(LedgerConfig::from_toml_str("colour = \"blue\"").is_err());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = LedgerConfig::from_toml_str("event_log_capacity = 0").unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_bad_range_rejected() {
        assert!(LedgerConfig::from_toml_str("default_date_range = \"fortnight\"").is_err());
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = LedgerConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
