//! Core data models for the shift ledger.
//!
//! This module contains the stored records (workers, shifts and the entries
//! recorded against a shift) and the computed views built from them.

mod entry;
mod payment_method;
mod report;
mod shift;
mod totals;
mod worker;

pub use entry::{Payout, ProductSale, RevenueLine, ServiceEntry, Tip};
pub use payment_method::{MethodTotals, PaymentMethod};
pub use report::{
    PayrollRow, PayrollTotals, PeriodReport, ShiftListItem, ShiftSummary, WorkerServices,
};
pub use shift::{Shift, ShiftState};
pub use totals::{ShiftTotals, TotalsWarning};
pub use worker::{Worker, WorkerRole};
