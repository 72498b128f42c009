//! Typed results of ledger operations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an operation was declined. The ledger is unchanged whenever one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rejection {
    /// A submitted field is missing or out of range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending form field.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// The referenced shift does not exist.
    #[error("Shift {shift_id} not found")]
    ShiftNotFound {
        /// The requested shift.
        shift_id: i64,
    },

    /// The shift has been closed and is read-only.
    #[error("Shift {shift_id} is closed")]
    ShiftClosed {
        /// The closed shift.
        shift_id: i64,
    },

    /// The entry does not exist in the given shift.
    #[error("Entry {entry_id} not found in shift {shift_id}")]
    EntryNotFound {
        /// The shift the entry was looked up in.
        shift_id: i64,
        /// The requested entry.
        entry_id: i64,
    },

    /// The referenced worker does not exist.
    #[error("Worker {worker_id} not found")]
    WorkerNotFound {
        /// The requested worker.
        worker_id: i64,
    },

    /// The worker is still referenced by ledger records.
    #[error("Worker {worker_id} is referenced by ledger records")]
    WorkerInUse {
        /// The worker that cannot be removed.
        worker_id: i64,
    },

    /// Closing would record a negative drawer balance.
    #[error("Cannot close shift with negative cash end {cash_end}")]
    NegativeCashEnd {
        /// The projected drawer balance.
        cash_end: Decimal,
    },
}

impl Rejection {
    /// Shorthand for [`Rejection::InvalidInput`].
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Rejection::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::InvalidInput { .. } => "INVALID_INPUT",
            Rejection::ShiftNotFound { .. } => "SHIFT_NOT_FOUND",
            Rejection::ShiftClosed { .. } => "SHIFT_CLOSED",
            Rejection::EntryNotFound { .. } => "ENTRY_NOT_FOUND",
            Rejection::WorkerNotFound { .. } => "WORKER_NOT_FOUND",
            Rejection::WorkerInUse { .. } => "WORKER_IN_USE",
            Rejection::NegativeCashEnd { .. } => "NEGATIVE_CASH_END",
        }
    }
}

/// Result of a ledger operation that did not fail at the storage level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The operation took effect.
    Applied(T),
    /// The operation was declined and nothing changed.
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    /// Returns true if the operation took effect.
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// The rejection, if the operation was declined.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Rejected(rejection) => Some(rejection),
        }
    }

    /// The applied value, if any.
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Rejected(_) => None,
        }
    }

    /// Maps the applied value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Applied(value) => Outcome::Applied(f(value)),
            Outcome::Rejected(rejection) => Outcome::Rejected(rejection),
        }
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Applied(_) => "applied",
            Outcome::Rejected(_) => "rejected",
        }
    }
}

impl<T> From<Result<T, Rejection>> for Outcome<T> {
    fn from(result: Result<T, Rejection>) -> Self {
        match result {
            Ok(value) => Outcome::Applied(value),
            Err(rejection) => Outcome::Rejected(rejection),
        }
    }
}
