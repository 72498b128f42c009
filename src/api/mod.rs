//! HTTP API module for the shift ledger.
//!
//! This module exposes the ledger operations as form-posting endpoints and
//! the read views as JSON `GET` endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::FormFields;
pub use response::{ApiError, ApiErrorResponse, OutcomeBody, rejection_status};
pub use state::AppState;
