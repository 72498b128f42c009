//! Response types for the shift ledger API.
//!
//! Mutations answer with an [`OutcomeBody`]: `{"outcome":"applied", ...}` on
//! success or `{"outcome":"rejected","code":..,"message":..}` with a 4xx
//! status. Storage and configuration failures use [`ApiError`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::lifecycle::{Outcome, Rejection};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a not-found error for a read endpoint.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", format!("{} not found", what.into()))
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<LedgerError> for ApiErrorResponse {
    fn from(error: LedgerError) -> Self {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let error = match error {
            LedgerError::ConfigNotFound { .. }
            | LedgerError::ConfigParseError { .. }
            | LedgerError::ConfigInvalid { .. } => {
                ApiError::with_details("CONFIG_ERROR", "Configuration error", error.to_string())
            }
            LedgerError::SnapshotIo { .. } | LedgerError::SnapshotCorrupt { .. } => {
                ApiError::with_details("STORAGE_ERROR", "Ledger storage failed", error.to_string())
            }
        };
        ApiErrorResponse { status, error }
    }
}

/// HTTP status for a declined operation.
pub fn rejection_status(rejection: &Rejection) -> StatusCode {
    match rejection {
        Rejection::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Rejection::ShiftNotFound { .. }
        | Rejection::EntryNotFound { .. }
        | Rejection::WorkerNotFound { .. } => StatusCode::NOT_FOUND,
        Rejection::ShiftClosed { .. }
        | Rejection::WorkerInUse { .. }
        | Rejection::NegativeCashEnd { .. } => StatusCode::CONFLICT,
    }
}

/// Body of a mutation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OutcomeBody<T> {
    /// The operation took effect; `data` is the affected record.
    Applied {
        /// The affected record.
        data: T,
    },
    /// The operation was declined and nothing changed.
    Rejected {
        /// Stable rejection code.
        code: String,
        /// Human-readable reason.
        message: String,
        /// The rejection with its fields.
        reason: Rejection,
    },
}

impl<T: Serialize> OutcomeBody<T> {
    /// Converts an outcome into a status and body.
    pub fn respond(outcome: Outcome<T>) -> Response {
        match outcome {
            Outcome::Applied(data) => {
                (StatusCode::OK, Json(OutcomeBody::Applied { data })).into_response()
            }
            Outcome::Rejected(rejection) => {
                let status = rejection_status(&rejection);
                let body: OutcomeBody<T> = OutcomeBody::Rejected {
                    code: rejection.code().to_string(),
                    message: rejection.to_string(),
                    reason: rejection,
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
