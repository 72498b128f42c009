//! Configuration loading for the shift ledger service.
//!
//! # Example
//!
//! ```no_run
//! use shift_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ledger.yaml").unwrap();
//! println!("Default salary rate: {}", config.config().payroll.default_salary_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{LedgerConfig, LoggingConfig, PayrollConfig, ServerConfig, StorageConfig};
