//! Read models assembled for the shift list, shift detail and period
//! report views.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    MethodTotals, Payout, ProductSale, ServiceEntry, Shift, ShiftState, ShiftTotals, Tip, Worker,
    WorkerRole,
};

/// One row of the shift list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftListItem {
    /// The shift itself.
    pub shift: Shift,
    /// Lifecycle state.
    pub state: ShiftState,
    /// Display name of the opening administrator, if any.
    pub admin_name: Option<String>,
}

/// Everything the shift detail view shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSummary {
    /// The shift.
    pub shift: Shift,
    /// Lifecycle state.
    pub state: ShiftState,
    /// The opening administrator, if still on record.
    pub admin: Option<Worker>,
    /// Service entries in recording order.
    pub services: Vec<ServiceEntry>,
    /// Product sales in recording order.
    pub sales: Vec<ProductSale>,
    /// Payouts in recording order.
    pub payouts: Vec<Payout>,
    /// Tips, one per worker.
    pub tips: Vec<Tip>,
    /// Workers with at least one service entry or tip in this shift.
    pub roster: Vec<Worker>,
    /// Reconciliation totals.
    pub totals: ShiftTotals,
}

/// Service revenue of one worker over a reporting period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerServices {
    /// The worker's id.
    pub worker_id: i64,
    /// Display name; empty if the worker record is gone.
    pub name: String,
    /// Service revenue per method.
    pub by_method: MethodTotals,
}

/// Payroll line of one worker over a reporting period.
///
/// Display only; none of these figures take part in reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRow {
    /// The worker's id.
    pub worker_id: i64,
    /// Display name.
    pub name: String,
    /// Role tag ("master" / "admin").
    pub role: WorkerRole,
    /// Payroll coefficient used for `accrued`.
    pub salary_rate: Decimal,
    /// Service revenue attributed to the worker.
    pub services_total: Decimal,
    /// Tips received.
    pub tips_total: Decimal,
    /// Payouts attributed to the worker.
    pub payouts_total: Decimal,
    /// `salary_rate × services_total`, rounded to cents.
    pub accrued: Decimal,
    /// `accrued + tips_total - payouts_total`.
    pub net: Decimal,
}

/// Column sums of the payroll table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Sum of `services_total`.
    pub services: Decimal,
    /// Sum of `tips_total`.
    pub tips: Decimal,
    /// Sum of `accrued`.
    pub accrued: Decimal,
    /// Sum of `payouts_total`.
    pub payouts: Decimal,
    /// Sum of `net`.
    pub net: Decimal,
}

/// Revenue, payouts and payroll over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period (inclusive).
    pub end: NaiveDate,
    /// Service revenue over the period.
    pub total_services: Decimal,
    /// Product revenue over the period.
    pub total_sales: Decimal,
    /// Payouts over the period.
    pub total_payouts: Decimal,
    /// Per-worker service revenue, ordered by worker id.
    pub workers: Vec<WorkerServices>,
    /// Payroll rows for active workers, ordered by role then name.
    pub payroll: Vec<PayrollRow>,
    /// Payroll column sums.
    pub payroll_totals: PayrollTotals,
}
