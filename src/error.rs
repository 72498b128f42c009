//! Error types for the shift ledger.
//!
//! Infrastructure failures (configuration, snapshot storage) are reported
//! through [`LedgerError`]. Business-level refusals such as writing to a
//! closed shift are not errors; they are returned as
//! [`Rejection`](crate::lifecycle::Rejection) values.

use thiserror::Error;

/// The main error type for the shift ledger.
///
/// # Example
///
/// ```
/// use shift_ledger::error::LedgerError;
///
/// let error = LedgerError::ConfigNotFound {
///     path: "/missing/ledger.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/ledger.yaml");
/// ```
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value outside its allowed range.
    #[error("Invalid configuration value '{field}': {message}")]
    ConfigInvalid {
        /// The offending field.
        field: String,
        /// Why the value was refused.
        message: String,
    },

    /// The snapshot file could not be read or written.
    #[error("Snapshot I/O failed for '{path}': {message}")]
    SnapshotIo {
        /// The snapshot path.
        path: String,
        /// The underlying I/O error.
        message: String,
    },

    /// The snapshot file exists but does not hold valid ledger tables.
    #[error("Snapshot '{path}' is corrupt: {message}")]
    SnapshotCorrupt {
        /// The snapshot path.
        path: String,
        /// The deserialization error.
        message: String,
    },
}

/// A type alias for Results that return LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = LedgerError::ConfigNotFound {
            path: "/missing/ledger.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/ledger.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = LedgerError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_config_invalid_displays_field() {
        let error = LedgerError::ConfigInvalid {
            field: "payroll.default_salary_rate".to_string(),
            message: "must be between 0 and 1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value 'payroll.default_salary_rate': must be between 0 and 1"
        );
    }

    #[test]
    fn test_snapshot_errors_display_path() {
        let io = LedgerError::SnapshotIo {
            path: "/data/ledger.json".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            io.to_string(),
            "Snapshot I/O failed for '/data/ledger.json': permission denied"
        );

        let corrupt = LedgerError::SnapshotCorrupt {
            path: "/data/ledger.json".to_string(),
            message: "expected value".to_string(),
        };
        assert!(corrupt.to_string().contains("is corrupt"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<LedgerError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_corrupt() -> LedgerResult<()> {
            Err(LedgerError::SnapshotCorrupt {
                path: "ledger.json".to_string(),
                message: "truncated".to_string(),
            })
        }

        fn propagates_error() -> LedgerResult<()> {
            returns_corrupt()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
