//! Period report calculation.
//!
//! Aggregates every record created within an inclusive date range,
//! independent of which shift it belongs to.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::{
    MethodTotals, Payout, PeriodReport, ProductSale, RevenueLine, ServiceEntry, Tip, Worker,
    WorkerServices,
};

use super::{payroll_row, payroll_totals};

/// Records the report is built from. Only the ones created inside the
/// period are counted.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    /// All known workers.
    pub workers: &'a [Worker],
    /// Service entries.
    pub services: &'a [ServiceEntry],
    /// Product sales.
    pub sales: &'a [ProductSale],
    /// Payouts.
    pub payouts: &'a [Payout],
    /// Tips.
    pub tips: &'a [Tip],
}

/// Builds the report for `start..=end`.
///
/// Totals and payroll use the raw entry amounts, so revenue recorded under a
/// legacy method tag still counts towards them. The per-worker method split
/// only has buckets for recognized methods.
///
/// Payroll rows are produced for active workers only, ordered by role tag
/// (admins first) and then by name.
pub fn build_period_report(start: NaiveDate, end: NaiveDate, input: ReportInput<'_>) -> PeriodReport {
    let in_period = |at: &NaiveDateTime| {
        let day = at.date();
        day >= start && day <= end
    };

    let services: Vec<&ServiceEntry> = input
        .services
        .iter()
        .filter(|e| in_period(&e.created_at))
        .collect();
    let sales = input.sales.iter().filter(|e| in_period(&e.created_at));
    let payouts: Vec<&Payout> = input
        .payouts
        .iter()
        .filter(|p| in_period(&p.created_at))
        .collect();
    let tips = input.tips.iter().filter(|t| in_period(&t.created_at));

    let names: HashMap<i64, &str> = input
        .workers
        .iter()
        .map(|w| (w.id, w.name.as_str()))
        .collect();

    let mut by_worker: BTreeMap<i64, MethodTotals> = BTreeMap::new();
    let mut services_by_worker: HashMap<i64, Decimal> = HashMap::new();
    for entry in &services {
        let split = by_worker.entry(entry.worker_id).or_default();
        if let Some(method) = entry.payment_method() {
            split.add(method, entry.amount);
        }
        *services_by_worker.entry(entry.worker_id).or_default() += entry.amount;
    }

    let mut payouts_by_worker: HashMap<i64, Decimal> = HashMap::new();
    for payout in &payouts {
        if let Some(worker_id) = payout.worker_id {
            *payouts_by_worker.entry(worker_id).or_default() += payout.amount;
        }
    }

    let mut tips_by_worker: HashMap<i64, Decimal> = HashMap::new();
    for tip in tips {
        *tips_by_worker.entry(tip.worker_id).or_default() += tip.amount;
    }

    let workers = by_worker
        .into_iter()
        .map(|(worker_id, by_method)| WorkerServices {
            worker_id,
            name: names.get(&worker_id).map(|n| n.to_string()).unwrap_or_default(),
            by_method,
        })
        .collect();

    let mut active: Vec<&Worker> = input.workers.iter().filter(|w| w.active).collect();
    active.sort_by(|a, b| {
        a.role
            .as_tag()
            .cmp(b.role.as_tag())
            .then_with(|| a.name.cmp(&b.name))
    });

    let payroll: Vec<_> = active
        .into_iter()
        .map(|w| {
            payroll_row(
                w,
                services_by_worker.get(&w.id).copied().unwrap_or_default(),
                tips_by_worker.get(&w.id).copied().unwrap_or_default(),
                payouts_by_worker.get(&w.id).copied().unwrap_or_default(),
            )
        })
        .collect();
    let payroll_totals = payroll_totals(&payroll);

    PeriodReport {
        start,
        end,
        total_services: services.iter().map(|e| e.amount).sum(),
        total_sales: sales.map(|e| e.amount).sum(),
        total_payouts: payouts.iter().map(|p| p.amount).sum(),
        workers,
        payroll,
        payroll_totals,
    }
}
