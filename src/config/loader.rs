//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the ledger
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Worker;

use super::types::LedgerConfig;

/// Loads and provides access to the service configuration.
///
/// # Example
///
/// ```no_run
/// use shift_ledger::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ledger.yaml").unwrap();
/// println!("Listening on {}", loader.config().server.bind_address);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: LedgerConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - A value is out of range
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shift_ledger::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/ledger.yaml")?;
    /// # Ok::<(), shift_ledger::error::LedgerError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let config = Self::load_yaml::<LedgerConfig>(path.as_ref())?;
        Self::from_config(config)
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: LedgerConfig) -> LedgerResult<Self> {
        let rate = config.payroll.default_salary_rate;
        if !Worker::is_valid_salary_rate(rate) {
            return Err(LedgerError::ConfigInvalid {
                field: "payroll.default_salary_rate".to_string(),
                message: format!("{} is outside [0, 1]", rate),
            });
        }
        if config.server.bind_address.trim().is_empty() {
            return Err(LedgerError::ConfigInvalid {
                field: "server.bind_address".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> LedgerResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LedgerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| LedgerError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/ledger.yaml"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().server.bind_address, "127.0.0.1:3000");
        assert_eq!(
            loader.config().payroll.default_salary_rate,
            Decimal::from_str("0.5").unwrap()
        );
    }

    #[test]
    fn test_missing_file_returns_not_found() {
        let result = ConfigLoader::load("./config/does-not-exist.yaml");
        assert!(matches!(result, Err(LedgerError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = std::env::temp_dir().join(format!("shift-ledger-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ledger.yaml");
        fs::write(&path, "payroll: [unclosed").unwrap();

        let result = ConfigLoader::load(&path);
        assert!(matches!(result, Err(LedgerError::ConfigParseError { .. })));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_out_of_range_rate_is_rejected() {
        let mut config = LedgerConfig::default();
        config.payroll.default_salary_rate = Decimal::from_str("1.2").unwrap();

        let result = ConfigLoader::from_config(config);
        match result {
            Err(LedgerError::ConfigInvalid { field, .. }) => {
                assert_eq!(field, "payroll.default_salary_rate")
            }
            other => panic!("expected ConfigInvalid, got {:?}", other),
        }
    }
}
