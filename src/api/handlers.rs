//! HTTP request handlers for the shift ledger API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Datelike, Local};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::LedgerResult;
use crate::lifecycle::{NewWorker, Outcome, ShiftController};

use super::request::FormFields;
use super::response::{ApiError, ApiErrorResponse, OutcomeBody};
use super::state::AppState;

type FormPayload = Result<Form<FormFields>, FormRejection>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/shifts", get(list_shifts).post(create_shift))
        .route("/shifts/:id", get(shift_summary))
        .route("/shifts/close", post(close_shift))
        .route("/shifts/delete", post(delete_shift))
        .route("/shifts/workers/add", post(add_worker_to_shift))
        .route("/shifts/workers/remove", post(remove_worker_from_shift))
        .route("/services", post(add_service))
        .route("/services/update", post(update_service))
        .route("/services/delete", post(delete_service))
        .route("/sales", post(add_sale))
        .route("/sales/update", post(update_sale))
        .route("/sales/delete", post(delete_sale))
        .route("/payouts", post(add_payout))
        .route("/payouts/update", post(update_payout))
        .route("/payouts/delete", post(delete_payout))
        .route("/tips", post(set_tip))
        .route("/tips/delete", post(delete_tip))
        .route("/workers", get(list_workers).post(create_worker))
        .route("/workers/toggle", post(toggle_worker))
        .route("/workers/delete", post(delete_worker))
        .route("/workers/salary-rate", post(update_worker_salary_rate))
        .route("/reports", get(period_report))
        .with_state(state)
}

/// Runs one mutation and renders its outcome.
///
/// Every request gets a correlation id that is logged together with the
/// operation and the shift it targets. The ledger call runs on the blocking
/// pool since a commit may rewrite the snapshot file.
async fn mutate<T, F>(
    state: &AppState,
    payload: FormPayload,
    operation: &'static str,
    op: F,
) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce(&ShiftController, &FormFields) -> LedgerResult<Outcome<T>> + Send + 'static,
{
    let correlation_id = Uuid::new_v4();

    let form = match payload {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                error = %rejection.body_text(),
                "Malformed form body"
            );
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "MALFORMED_FORM",
                    "Failed to parse form body",
                    rejection.body_text(),
                ),
            }
            .into_response();
        }
    };

    let shift_id = form.id("shiftId");
    let start_time = Instant::now();
    let ledger = state.shared_ledger();
    let result = match tokio::task::spawn_blocking(move || op(ledger.as_ref(), &form)).await {
        Ok(result) => result,
        Err(join_error) => {
            error!(
                correlation_id = %correlation_id,
                operation,
                shift_id = ?shift_id,
                error = %join_error,
                "Ledger operation aborted"
            );
            return ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("INTERNAL_ERROR", "Ledger operation aborted"),
            }
            .into_response();
        }
    };

    match result {
        Ok(outcome) => {
            let duration = start_time.elapsed();
            match outcome.rejection() {
                None => info!(
                    correlation_id = %correlation_id,
                    operation,
                    shift_id = ?shift_id,
                    outcome = outcome.label(),
                    duration_us = duration.as_micros(),
                    "Request handled"
                ),
                Some(rejection) => warn!(
                    correlation_id = %correlation_id,
                    operation,
                    shift_id = ?shift_id,
                    outcome = outcome.label(),
                    code = rejection.code(),
                    reason = %rejection,
                    "Request declined"
                ),
            }
            OutcomeBody::respond(outcome)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                operation,
                shift_id = ?shift_id,
                error = %err,
                "Ledger storage failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Renders a read model or a storage error.
fn read<T: Serialize>(operation: &'static str, result: LedgerResult<T>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(err) => {
            warn!(operation, error = %err, "Ledger read failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

// ---- shifts --------------------------------------------------------------

async fn create_shift(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "create_shift", |ledger, form| {
        ledger.create_shift(form.into())
    })
    .await
}

async fn close_shift(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "close_shift", |ledger, form| {
        ledger.close_shift(form.id("shiftId"))
    })
    .await
}

async fn delete_shift(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "delete_shift", |ledger, form| {
        ledger.delete_shift(form.id("shiftId"))
    })
    .await
}

async fn add_worker_to_shift(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "add_worker_to_shift", |ledger, form| {
        ledger.add_worker_to_shift(form.into())
    })
    .await
}

async fn remove_worker_from_shift(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "remove_worker_from_shift", |ledger, form| {
        ledger.remove_worker_from_shift(form.into())
    })
    .await
}

async fn list_shifts(State(state): State<AppState>) -> Response {
    read("list_shifts", state.ledger().list_shifts())
}

async fn shift_summary(State(state): State<AppState>, Path(shift_id): Path<i64>) -> Response {
    match state.ledger().shift_summary(shift_id) {
        Ok(Some(summary)) => (StatusCode::OK, Json(summary)).into_response(),
        Ok(None) => ApiErrorResponse {
            status: StatusCode::NOT_FOUND,
            error: ApiError::not_found(format!("Shift {}", shift_id)),
        }
        .into_response(),
        Err(err) => read::<()>("shift_summary", Err(err)),
    }
}

// ---- entries -------------------------------------------------------------

async fn add_service(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "add_service", |ledger, form| {
        ledger.add_service(form.into())
    })
    .await
}

async fn update_service(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "update_service", |ledger, form| {
        ledger.update_service(form.into())
    })
    .await
}

async fn delete_service(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "delete_service", |ledger, form| {
        ledger.delete_service(form.into())
    })
    .await
}

async fn add_sale(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "add_sale", |ledger, form| ledger.add_sale(form.into())).await
}

async fn update_sale(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "update_sale", |ledger, form| {
        ledger.update_sale(form.into())
    })
    .await
}

async fn delete_sale(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "delete_sale", |ledger, form| {
        ledger.delete_sale(form.into())
    })
    .await
}

async fn add_payout(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "add_payout", |ledger, form| {
        ledger.add_payout(form.into())
    })
    .await
}

async fn update_payout(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "update_payout", |ledger, form| {
        ledger.update_payout(form.into())
    })
    .await
}

async fn delete_payout(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "delete_payout", |ledger, form| {
        ledger.delete_payout(form.into())
    })
    .await
}

async fn set_tip(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "set_tip", |ledger, form| ledger.set_tip(form.into())).await
}

async fn delete_tip(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "delete_tip", |ledger, form| {
        ledger.delete_tip(form.into())
    })
    .await
}

// ---- workers -------------------------------------------------------------

async fn create_worker(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "create_worker", |ledger, form| {
        match NewWorker::try_from(form) {
            Ok(command) => ledger.create_worker(command),
            Err(rejection) => Ok(Outcome::Rejected(rejection)),
        }
    })
    .await
}

async fn toggle_worker(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "toggle_worker", |ledger, form| {
        ledger.toggle_worker(form.id("id"))
    })
    .await
}

async fn delete_worker(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "delete_worker", |ledger, form| {
        ledger.delete_worker(form.id("id"))
    })
    .await
}

async fn update_worker_salary_rate(State(state): State<AppState>, payload: FormPayload) -> Response {
    mutate(&state, payload, "update_worker_salary_rate", |ledger, form| {
        match form.decimal("salaryRate") {
            Ok(rate) => ledger.update_worker_salary_rate(form.id("id"), rate),
            Err(rejection) => Ok(Outcome::Rejected(rejection)),
        }
    })
    .await
}

async fn list_workers(State(state): State<AppState>, Query(query): Query<FormFields>) -> Response {
    read("list_workers", state.ledger().list_workers(query.flag("active")))
}

// ---- reports -------------------------------------------------------------

/// Handler for GET /reports.
///
/// `start` defaults to the first day of the current month and `end` to
/// today.
async fn period_report(State(state): State<AppState>, Query(query): Query<FormFields>) -> Response {
    let today = Local::now().date_naive();
    let start = query
        .date("start")
        .unwrap_or_else(|| today.with_day(1).unwrap_or(today));
    let end = query.date("end").unwrap_or(today);

    if start > end {
        return ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::with_details(
                "VALIDATION_ERROR",
                "Report period is empty",
                format!("start {} is after end {}", start, end),
            ),
        }
        .into_response();
    }

    read("period_report", state.ledger().period_report(start, end))
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    bind_address: String,
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(Health {
        status: "ok",
        bind_address: state.config().config().server.bind_address.clone(),
    })
}
