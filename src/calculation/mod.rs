//! Calculation logic for the shift ledger.
//!
//! This module contains the pure calculations over ledger records: shift
//! totals and drawer projection, payroll display figures, and the period
//! report.

mod payroll;
mod period_report;
mod totals;

pub use payroll::{payroll_row, payroll_totals};
pub use period_report::{ReportInput, build_period_report};
pub use totals::{NEGATIVE_CASH_END_WARNING, UNRECOGNIZED_METHOD_WARNING, compute_totals};
