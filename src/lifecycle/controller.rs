//! Shift lifecycle controller.
//!
//! A shift is `Open` from creation until it is closed; `Closed` is terminal.
//! Every mutation of a shift or its entries checks the shift is open, and the
//! whole check-then-write runs as one store transaction.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use super::commands::{
    EntryRef, NewPayout, NewSale, NewService, NewShift, PayoutUpdate, SaleUpdate, ServiceUpdate,
    SetTip, ShiftWorker,
};
use super::outcome::{Outcome, Rejection};
use crate::calculation::compute_totals;
use crate::error::LedgerResult;
use crate::models::{PaymentMethod, Payout, ProductSale, ServiceEntry, Shift, Tip, Worker};
use crate::store::{MemoryStore, Tables};

/// Rows removed when a worker is taken off a shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RosterRemoval {
    /// Service entries deleted.
    pub services_removed: usize,
    /// Payouts deleted.
    pub payouts_removed: usize,
    /// Whether the worker was the shift's administrator.
    pub admin_cleared: bool,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Applies ledger operations against a [`MemoryStore`].
///
/// Operations return `Ok(Outcome::Rejected(..))` for refused input or state
/// and reserve `Err` for storage failures.
#[derive(Debug, Clone)]
pub struct ShiftController {
    store: Arc<MemoryStore>,
    pub(super) default_salary_rate: Decimal,
    clock: fn() -> NaiveDateTime,
}

impl ShiftController {
    /// Creates a controller over `store` with a default salary rate of 0.5.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            default_salary_rate: Decimal::new(5, 1),
            clock: local_now,
        }
    }

    /// Sets the salary rate given to workers registered without one.
    pub fn with_default_salary_rate(mut self, rate: Decimal) -> Self {
        self.default_salary_rate = rate;
        self
    }

    /// Replaces the clock used for `created_at` stamps.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub(super) fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    /// Runs `f` as one transaction and logs how it ended.
    pub(super) fn run<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Tables) -> Result<T, Rejection>,
    ) -> LedgerResult<Outcome<T>> {
        let outcome = Outcome::from(self.store.transaction(f)?);
        match &outcome {
            Outcome::Applied(_) => debug!(operation, outcome = "applied", "Ledger operation applied"),
            Outcome::Rejected(rejection) => info!(
                operation,
                outcome = "rejected",
                code = rejection.code(),
                reason = %rejection,
                "Ledger operation rejected"
            ),
        }
        Ok(outcome)
    }

    // ---- shifts --------------------------------------------------------

    /// Opens a new shift.
    pub fn create_shift(&self, command: NewShift) -> LedgerResult<Outcome<Shift>> {
        let now = self.now();
        self.run("create_shift", |tables| {
            let shift_date = command
                .shift_date
                .ok_or_else(|| Rejection::invalid("shiftDate", "a valid date is required"))?;
            let opening_cash =
                require_money(command.opening_cash.unwrap_or(Decimal::ZERO), "openingCash")?;
            if opening_cash < Decimal::ZERO {
                return Err(Rejection::invalid("openingCash", "must not be negative"));
            }
            if let Some(admin_id) = command.admin_id {
                require_worker(tables, admin_id)?;
            }

            let mut shift = Shift {
                id: 0,
                shift_date,
                opening_cash,
                closing_cash: None,
                created_at: now,
                admin_id: command.admin_id,
            };
            shift.id = tables.insert_shift(shift.clone());
            info!(shift_id = shift.id, shift_date = %shift.shift_date, "Shift opened");
            Ok(shift)
        })
    }

    /// Closes an open shift, recording the projected drawer balance.
    ///
    /// Refused with [`Rejection::NegativeCashEnd`] when the drawer would be
    /// short.
    pub fn close_shift(&self, shift_id: Option<i64>) -> LedgerResult<Outcome<Shift>> {
        self.run("close_shift", |tables| {
            let shift_id = require_id(shift_id, "shiftId")?;
            let opening_cash = require_open_shift(tables, shift_id)?.opening_cash;

            let totals = compute_totals(
                opening_cash,
                &tables.services_for(shift_id),
                &tables.sales_for(shift_id),
                &tables.payouts_for(shift_id),
            );
            if totals.cash_end < Decimal::ZERO {
                return Err(Rejection::NegativeCashEnd {
                    cash_end: totals.cash_end,
                });
            }

            let shift = tables
                .shift_mut(shift_id)
                .ok_or(Rejection::ShiftNotFound { shift_id })?;
            shift.closing_cash = Some(totals.cash_end);
            info!(shift_id, cash_end = %totals.cash_end, "Shift closed");
            Ok(shift.clone())
        })
    }

    /// Deletes an open shift and everything recorded against it.
    pub fn delete_shift(&self, shift_id: Option<i64>) -> LedgerResult<Outcome<Shift>> {
        self.run("delete_shift", |tables| {
            let shift_id = require_id(shift_id, "shiftId")?;
            require_open_shift(tables, shift_id)?;
            let shift = tables
                .remove_shift_cascade(shift_id)
                .ok_or(Rejection::ShiftNotFound { shift_id })?;
            info!(shift_id, "Shift deleted");
            Ok(shift)
        })
    }

    /// Checks a worker may be put on an open shift.
    ///
    /// The roster is derived from entries and tips, so nothing is written.
    pub fn add_worker_to_shift(&self, target: ShiftWorker) -> LedgerResult<Outcome<Worker>> {
        self.run("add_worker_to_shift", |tables| {
            let shift_id = require_id(target.shift_id, "shiftId")?;
            let worker_id = require_id(target.worker_id, "workerId")?;
            require_open_shift(tables, shift_id)?;
            Ok(require_worker(tables, worker_id)?.clone())
        })
    }

    /// Takes a worker off an open shift.
    ///
    /// Deletes the worker's service entries and payouts for the shift and
    /// clears the shift's administrator if it was this worker. Tips stay.
    pub fn remove_worker_from_shift(
        &self,
        target: ShiftWorker,
    ) -> LedgerResult<Outcome<RosterRemoval>> {
        self.run("remove_worker_from_shift", |tables| {
            let shift_id = require_id(target.shift_id, "shiftId")?;
            let worker_id = require_id(target.worker_id, "workerId")?;
            require_open_shift(tables, shift_id)?;

            let services_removed = tables.remove_worker_services(shift_id, worker_id);
            let payouts_removed = tables.remove_worker_payouts(shift_id, worker_id);
            let mut admin_cleared = false;
            if let Some(shift) = tables.shift_mut(shift_id) {
                if shift.admin_id == Some(worker_id) {
                    shift.admin_id = None;
                    admin_cleared = true;
                }
            }

            info!(shift_id, worker_id, services_removed, payouts_removed, "Worker removed from shift");
            Ok(RosterRemoval {
                services_removed,
                payouts_removed,
                admin_cleared,
            })
        })
    }

    // ---- service entries -----------------------------------------------

    /// Records a service on an open shift.
    pub fn add_service(&self, command: NewService) -> LedgerResult<Outcome<ServiceEntry>> {
        let now = self.now();
        self.run("add_service", |tables| {
            let shift_id = require_id(command.shift_id, "shiftId")?;
            let worker_id = require_id(command.worker_id, "workerId")?;
            let service = require_text(command.service, "service")?;
            let method = require_method(command.method)?;
            require_positive(command.amount)?;
            require_open_shift(tables, shift_id)?;
            require_worker(tables, worker_id)?;

            let mut entry = ServiceEntry {
                id: 0,
                shift_id,
                worker_id,
                service,
                amount: command.amount,
                method: method.as_tag().to_string(),
                created_at: now,
            };
            entry.id = tables.insert_service(entry.clone());
            Ok(entry)
        })
    }

    /// Edits a service entry of an open shift.
    pub fn update_service(&self, command: ServiceUpdate) -> LedgerResult<Outcome<ServiceEntry>> {
        self.run("update_service", |tables| {
            let (shift_id, entry_id) = require_entry_ref(command.entry)?;
            if command.service.is_none() && command.method.is_none() && command.amount.is_none() {
                return Err(nothing_to_update());
            }
            let service = command
                .service
                .map(|s| require_text(Some(s), "service"))
                .transpose()?;
            let method = command.method.map(|m| require_method(Some(m))).transpose()?;
            if let Some(amount) = command.amount {
                require_positive(amount)?;
            }
            require_open_shift(tables, shift_id)?;

            let entry = tables
                .service_mut(entry_id)
                .filter(|e| e.shift_id == shift_id)
                .ok_or(Rejection::EntryNotFound { shift_id, entry_id })?;
            if let Some(service) = service {
                entry.service = service;
            }
            if let Some(method) = method {
                entry.method = method.as_tag().to_string();
            }
            if let Some(amount) = command.amount {
                entry.amount = amount;
            }
            Ok(entry.clone())
        })
    }

    /// Deletes a service entry of an open shift.
    pub fn delete_service(&self, entry: EntryRef) -> LedgerResult<Outcome<ServiceEntry>> {
        self.run("delete_service", |tables| {
            let (shift_id, entry_id) = require_entry_ref(entry)?;
            require_open_shift(tables, shift_id)?;
            if tables.service(entry_id).is_none_or(|e| e.shift_id != shift_id) {
                return Err(Rejection::EntryNotFound { shift_id, entry_id });
            }
            tables
                .remove_service(entry_id)
                .ok_or(Rejection::EntryNotFound { shift_id, entry_id })
        })
    }

    // ---- product sales -------------------------------------------------

    /// Records a product sale on an open shift.
    pub fn add_sale(&self, command: NewSale) -> LedgerResult<Outcome<ProductSale>> {
        let now = self.now();
        self.run("add_sale", |tables| {
            let shift_id = require_id(command.shift_id, "shiftId")?;
            let product = require_text(command.product, "product")?;
            let method = require_method(command.method)?;
            require_positive(command.amount)?;
            require_open_shift(tables, shift_id)?;

            let mut sale = ProductSale {
                id: 0,
                shift_id,
                product,
                amount: command.amount,
                method: method.as_tag().to_string(),
                created_at: now,
            };
            sale.id = tables.insert_sale(sale.clone());
            Ok(sale)
        })
    }

    /// Edits a product sale of an open shift.
    pub fn update_sale(&self, command: SaleUpdate) -> LedgerResult<Outcome<ProductSale>> {
        self.run("update_sale", |tables| {
            let (shift_id, entry_id) = require_entry_ref(command.entry)?;
            if command.product.is_none() && command.method.is_none() && command.amount.is_none() {
                return Err(nothing_to_update());
            }
            let product = command
                .product
                .map(|p| require_text(Some(p), "product"))
                .transpose()?;
            let method = command.method.map(|m| require_method(Some(m))).transpose()?;
            if let Some(amount) = command.amount {
                require_positive(amount)?;
            }
            require_open_shift(tables, shift_id)?;

            let sale = tables
                .sale_mut(entry_id)
                .filter(|e| e.shift_id == shift_id)
                .ok_or(Rejection::EntryNotFound { shift_id, entry_id })?;
            if let Some(product) = product {
                sale.product = product;
            }
            if let Some(method) = method {
                sale.method = method.as_tag().to_string();
            }
            if let Some(amount) = command.amount {
                sale.amount = amount;
            }
            Ok(sale.clone())
        })
    }

    /// Deletes a product sale of an open shift.
    pub fn delete_sale(&self, entry: EntryRef) -> LedgerResult<Outcome<ProductSale>> {
        self.run("delete_sale", |tables| {
            let (shift_id, entry_id) = require_entry_ref(entry)?;
            require_open_shift(tables, shift_id)?;
            if tables.sale(entry_id).is_none_or(|e| e.shift_id != shift_id) {
                return Err(Rejection::EntryNotFound { shift_id, entry_id });
            }
            tables
                .remove_sale(entry_id)
                .ok_or(Rejection::EntryNotFound { shift_id, entry_id })
        })
    }

    // ---- payouts -------------------------------------------------------

    /// Records a payout on an open shift.
    pub fn add_payout(&self, command: NewPayout) -> LedgerResult<Outcome<Payout>> {
        let now = self.now();
        self.run("add_payout", |tables| {
            let shift_id = require_id(command.shift_id, "shiftId")?;
            let worker_id = command.worker_id.filter(|id| *id > 0);
            require_positive(command.amount)?;
            require_open_shift(tables, shift_id)?;
            if let Some(worker_id) = worker_id {
                require_worker(tables, worker_id)?;
            }

            let mut payout = Payout {
                id: 0,
                shift_id,
                worker_id,
                amount: command.amount,
                note: non_empty(command.note),
                created_at: now,
            };
            payout.id = tables.insert_payout(payout.clone());
            Ok(payout)
        })
    }

    /// Edits a payout of an open shift.
    pub fn update_payout(&self, command: PayoutUpdate) -> LedgerResult<Outcome<Payout>> {
        self.run("update_payout", |tables| {
            let (shift_id, entry_id) = require_entry_ref(command.entry)?;
            if command.amount.is_none() && command.note.is_none() {
                return Err(nothing_to_update());
            }
            if let Some(amount) = command.amount {
                require_positive(amount)?;
            }
            require_open_shift(tables, shift_id)?;

            let payout = tables
                .payout_mut(entry_id)
                .filter(|p| p.shift_id == shift_id)
                .ok_or(Rejection::EntryNotFound { shift_id, entry_id })?;
            if let Some(amount) = command.amount {
                payout.amount = amount;
            }
            if command.note.is_some() {
                payout.note = non_empty(command.note);
            }
            Ok(payout.clone())
        })
    }

    /// Deletes a payout of an open shift.
    pub fn delete_payout(&self, entry: EntryRef) -> LedgerResult<Outcome<Payout>> {
        self.run("delete_payout", |tables| {
            let (shift_id, entry_id) = require_entry_ref(entry)?;
            require_open_shift(tables, shift_id)?;
            if tables.payout(entry_id).is_none_or(|p| p.shift_id != shift_id) {
                return Err(Rejection::EntryNotFound { shift_id, entry_id });
            }
            tables
                .remove_payout(entry_id)
                .ok_or(Rejection::EntryNotFound { shift_id, entry_id })
        })
    }

    // ---- tips ----------------------------------------------------------

    /// Sets a worker's tip for an open shift, replacing any earlier amount.
    ///
    /// A zero or negative amount removes the tip; the applied value is then
    /// `None`.
    pub fn set_tip(&self, command: SetTip) -> LedgerResult<Outcome<Option<Tip>>> {
        let now = self.now();
        self.run("set_tip", |tables| {
            let shift_id = require_id(command.target.shift_id, "shiftId")?;
            let worker_id = require_id(command.target.worker_id, "workerId")?;
            require_money(command.amount, "amount")?;
            require_open_shift(tables, shift_id)?;
            require_worker(tables, worker_id)?;

            if command.amount <= Decimal::ZERO {
                tables.remove_tip(shift_id, worker_id);
                return Ok(None);
            }
            tables.upsert_tip(shift_id, worker_id, command.amount, now);
            Ok(tables.tip_for(shift_id, worker_id).cloned())
        })
    }

    /// Removes a worker's tip from an open shift. Applies `true` if a tip
    /// existed.
    pub fn delete_tip(&self, target: ShiftWorker) -> LedgerResult<Outcome<bool>> {
        self.run("delete_tip", |tables| {
            let shift_id = require_id(target.shift_id, "shiftId")?;
            let worker_id = require_id(target.worker_id, "workerId")?;
            require_open_shift(tables, shift_id)?;
            Ok(tables.remove_tip(shift_id, worker_id))
        })
    }
}

// ---- validation ----------------------------------------------------------

pub(super) fn require_id(id: Option<i64>, field: &str) -> Result<i64, Rejection> {
    id.filter(|id| *id > 0)
        .ok_or_else(|| Rejection::invalid(field, "a positive id is required"))
}

pub(super) fn require_text(value: Option<String>, field: &str) -> Result<String, Rejection> {
    non_empty(value).ok_or_else(|| Rejection::invalid(field, "must not be empty"))
}

fn require_method(tag: Option<String>) -> Result<PaymentMethod, Rejection> {
    let tag = require_text(tag, "method")?;
    PaymentMethod::from_tag(&tag)
        .ok_or_else(|| Rejection::invalid("method", format!("unrecognized payment method '{}'", tag)))
}

/// Money columns hold at most ten integer digits and whole cents.
fn require_money(amount: Decimal, field: &str) -> Result<Decimal, Rejection> {
    if amount.abs() >= max_money() {
        return Err(Rejection::invalid(field, format!("must be less than {}", max_money())));
    }
    if amount.normalize().scale() > 2 {
        return Err(Rejection::invalid(field, "must not have fractions of a cent"));
    }
    Ok(amount)
}

fn max_money() -> Decimal {
    Decimal::new(10_000_000_000, 0)
}

fn require_positive(amount: Decimal) -> Result<(), Rejection> {
    require_money(amount, "amount")?;
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(Rejection::invalid("amount", "must be greater than zero"))
    }
}

fn require_entry_ref(entry: EntryRef) -> Result<(i64, i64), Rejection> {
    Ok((
        require_id(entry.shift_id, "shiftId")?,
        require_id(entry.entry_id, "id")?,
    ))
}

fn nothing_to_update() -> Rejection {
    Rejection::invalid("id", "no fields to update")
}

pub(super) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(super) fn require_worker(tables: &Tables, worker_id: i64) -> Result<&Worker, Rejection> {
    tables
        .worker(worker_id)
        .ok_or(Rejection::WorkerNotFound { worker_id })
}

fn require_open_shift(tables: &Tables, shift_id: i64) -> Result<&Shift, Rejection> {
    let shift = tables
        .shift(shift_id)
        .ok_or(Rejection::ShiftNotFound { shift_id })?;
    if shift.is_closed() {
        return Err(Rejection::ShiftClosed { shift_id });
    }
    Ok(shift)
}
