//! Configuration types for the shift ledger service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section is
//! optional and falls back to the defaults below.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to (e.g. "127.0.0.1:3000").
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// Persistence settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// JSON snapshot the ledger is loaded from and written to. Without one
    /// the ledger lives in memory only.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

/// Payroll settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Salary rate given to workers registered without one.
    #[serde(default = "default_salary_rate")]
    pub default_salary_rate: Decimal,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            default_salary_rate: default_salary_rate(),
        }
    }
}

fn default_salary_rate() -> Decimal {
    Decimal::new(5, 1)
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is
    /// not set.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedgerConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Payroll settings.
    #[serde(default)]
    pub payroll: PayrollConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: LedgerConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:3000");
        assert_eq!(config.storage.snapshot_path, None);
        assert_eq!(config.payroll.default_salary_rate, Decimal::new(5, 1));
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_partial_sections() {
        let yaml = r#"
server:
  bind_address: "0.0.0.0:8080"
payroll:
  default_salary_rate: "0.45"
"#;
        let config: LedgerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.payroll.default_salary_rate, Decimal::new(45, 2));
        assert_eq!(config.logging.filter, "info");
    }
}
