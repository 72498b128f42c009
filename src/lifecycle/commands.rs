//! Inputs of the ledger operations.
//!
//! Commands carry what the caller submitted, already coerced to types but not
//! yet validated: ids may be `None` (absent), amounts may be zero or
//! negative, method tags may be unknown. The controller decides.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Opens a new shift.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewShift {
    /// Calendar date of the shift; `None` if it did not parse.
    pub shift_date: Option<NaiveDate>,
    /// Drawer balance at open; defaults to zero.
    pub opening_cash: Option<Decimal>,
    /// Administrator running the shift.
    pub admin_id: Option<i64>,
}

/// Records a service performed by a worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewService {
    /// Target shift.
    pub shift_id: Option<i64>,
    /// Worker the row is attributed to.
    pub worker_id: Option<i64>,
    /// Name of the service performed.
    pub service: Option<String>,
    /// Payment method tag as submitted.
    pub method: Option<String>,
    /// Amount charged or paid.
    pub amount: Decimal,
}

/// Records a retail product sale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSale {
    /// Target shift.
    pub shift_id: Option<i64>,
    /// Name of the product sold.
    pub product: Option<String>,
    /// Payment method tag as submitted.
    pub method: Option<String>,
    /// Amount charged or paid.
    pub amount: Decimal,
}

/// Records money taken out of the drawer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPayout {
    /// Target shift.
    pub shift_id: Option<i64>,
    /// Worker the row is attributed to.
    pub worker_id: Option<i64>,
    /// Amount charged or paid.
    pub amount: Decimal,
    /// Free-text reason.
    pub note: Option<String>,
}

/// Identifies one entry of a shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryRef {
    /// Target shift.
    pub shift_id: Option<i64>,
    /// The entry within the shift.
    pub entry_id: Option<i64>,
}

/// Identifies one worker within a shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftWorker {
    /// Target shift.
    pub shift_id: Option<i64>,
    /// Worker the row is attributed to.
    pub worker_id: Option<i64>,
}

/// Partial edit of a service entry. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceUpdate {
    /// The entry being edited.
    pub entry: EntryRef,
    /// Name of the service performed.
    pub service: Option<String>,
    /// Payment method tag as submitted.
    pub method: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
}

/// Partial edit of a product sale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleUpdate {
    /// The entry being edited.
    pub entry: EntryRef,
    /// Name of the product sold.
    pub product: Option<String>,
    /// Payment method tag as submitted.
    pub method: Option<String>,
    /// New amount.
    pub amount: Option<Decimal>,
}

/// Partial edit of a payout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayoutUpdate {
    /// The entry being edited.
    pub entry: EntryRef,
    /// New amount.
    pub amount: Option<Decimal>,
    /// Free-text reason.
    pub note: Option<String>,
}

/// Sets (or clears) a worker's tip for a shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetTip {
    /// Shift and worker the tip belongs to.
    pub target: ShiftWorker,
    /// Zero or negative removes the tip.
    pub amount: Decimal,
}

/// Registers a worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewWorker {
    /// Display name.
    pub name: Option<String>,
    /// Role tag; defaults to `master`.
    pub role: Option<String>,
    /// Free-text specialty.
    pub category: Option<String>,
    /// Defaults to the configured payroll rate.
    pub salary_rate: Option<Decimal>,
}
