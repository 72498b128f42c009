//! Read-only views over the ledger.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::controller::ShiftController;
use crate::calculation::{ReportInput, build_period_report, compute_totals};
use crate::error::LedgerResult;
use crate::models::{PeriodReport, ShiftListItem, ShiftSummary, ShiftTotals, Worker};
use crate::store::Tables;

fn totals_of(tables: &Tables, shift_id: i64) -> Option<ShiftTotals> {
    let shift = tables.shift(shift_id)?;
    Some(compute_totals(
        shift.opening_cash,
        &tables.services_for(shift_id),
        &tables.sales_for(shift_id),
        &tables.payouts_for(shift_id),
    ))
}

impl ShiftController {
    /// All shifts, newest shift date first.
    pub fn list_shifts(&self) -> LedgerResult<Vec<ShiftListItem>> {
        self.store().read(|tables| {
            let mut items: Vec<ShiftListItem> = tables
                .shifts()
                .map(|shift| ShiftListItem {
                    state: shift.state(),
                    admin_name: shift
                        .admin_id
                        .and_then(|id| tables.worker(id))
                        .map(|w| w.name.clone()),
                    shift: shift.clone(),
                })
                .collect();
            items.sort_by(|a, b| {
                b.shift
                    .shift_date
                    .cmp(&a.shift.shift_date)
                    .then_with(|| b.shift.id.cmp(&a.shift.id))
            });
            items
        })
    }

    /// Totals of one shift, computed from its current entries.
    pub fn shift_totals(&self, shift_id: i64) -> LedgerResult<Option<ShiftTotals>> {
        self.store().read(|tables| totals_of(tables, shift_id))
    }

    /// The full detail view of one shift, or `None` if it does not exist.
    pub fn shift_summary(&self, shift_id: i64) -> LedgerResult<Option<ShiftSummary>> {
        self.store().read(|tables| {
            let shift = tables.shift(shift_id)?.clone();
            let totals = totals_of(tables, shift_id)?;
            let services = tables.services_for(shift_id);
            let tips = tables.tips_for(shift_id);

            let on_shift: BTreeSet<i64> = services
                .iter()
                .map(|e| e.worker_id)
                .chain(tips.iter().map(|t| t.worker_id))
                .collect();
            let roster: Vec<Worker> = on_shift
                .into_iter()
                .filter_map(|id| tables.worker(id).cloned())
                .collect();

            Some(ShiftSummary {
                state: shift.state(),
                admin: shift.admin_id.and_then(|id| tables.worker(id).cloned()),
                sales: tables.sales_for(shift_id),
                payouts: tables.payouts_for(shift_id),
                shift,
                services,
                tips,
                roster,
                totals,
            })
        })
    }

    /// Report over every record created from `start` through `end`.
    pub fn period_report(&self, start: NaiveDate, end: NaiveDate) -> LedgerResult<PeriodReport> {
        self.store().read(|tables| {
            let workers: Vec<Worker> = tables.workers().cloned().collect();
            let services = tables.all_services();
            let sales = tables.all_sales();
            let payouts = tables.all_payouts();
            let tips = tables.all_tips();
            build_period_report(
                start,
                end,
                ReportInput {
                    workers: &workers,
                    services: &services,
                    sales: &sales,
                    payouts: &payouts,
                    tips: &tips,
                },
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{NewService, NewShift, NewWorker, SetTip, ShiftWorker};
    use crate::store::MemoryStore;
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(15, 30, 0)
            .unwrap()
    }

    fn controller() -> ShiftController {
        ShiftController::new(Arc::new(MemoryStore::new())).with_clock(fixed_now)
    }

    fn open(ctl: &ShiftController, day: u32, admin_id: Option<i64>) -> i64 {
        ctl.create_shift(NewShift {
            shift_date: NaiveDate::from_ymd_opt(2026, 3, day),
            opening_cash: Some(Decimal::new(1000, 0)),
            admin_id,
        })
        .unwrap()
        .applied()
        .unwrap()
        .id
    }

    fn hire(ctl: &ShiftController, name: &str, role: &str) -> i64 {
        ctl.create_worker(NewWorker {
            name: Some(name.to_string()),
            role: Some(role.to_string()),
            ..NewWorker::default()
        })
        .unwrap()
        .applied()
        .unwrap()
        .id
    }

    #[test]
    fn test_shift_list_is_newest_first_with_admin_name() {
        let ctl = controller();
        let olga = hire(&ctl, "Olga", "admin");
        let older = open(&ctl, 1, Some(olga));
        let newer = open(&ctl, 5, None);

        let items = ctl.list_shifts().unwrap();

        assert_eq!(items[0].shift.id, newer);
        assert_eq!(items[1].shift.id, older);
        assert_eq!(items[1].admin_name.as_deref(), Some("Olga"));
        assert_eq!(items[0].admin_name, None);
    }

    #[test]
    fn test_summary_roster_comes_from_entries_and_tips() {
        let ctl = controller();
        let anna = hire(&ctl, "Anna", "master");
        let vera = hire(&ctl, "Vera", "master");
        hire(&ctl, "Idle", "master");
        let shift_id = open(&ctl, 2, None);
        ctl.add_service(NewService {
            shift_id: Some(shift_id),
            worker_id: Some(anna),
            service: Some("manicure".to_string()),
            method: Some("cash".to_string()),
            amount: Decimal::new(500, 0),
        })
        .unwrap();
        ctl.set_tip(SetTip {
            target: ShiftWorker { shift_id: Some(shift_id), worker_id: Some(vera) },
            amount: Decimal::new(20, 0),
        })
        .unwrap();

        let summary = ctl.shift_summary(shift_id).unwrap().unwrap();

        let roster: Vec<&str> = summary.roster.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(roster, vec!["Anna", "Vera"]);
        assert_eq!(summary.totals.cash_end, Decimal::new(1500, 0));
        assert_eq!(summary.tips.len(), 1);
        assert!(ctl.shift_summary(999).unwrap().is_none());
    }

    #[test]
    fn test_period_report_uses_creation_time() {
        let ctl = controller();
        let anna = hire(&ctl, "Anna", "master");
        let shift_id = open(&ctl, 1, None);
        ctl.add_service(NewService {
            shift_id: Some(shift_id),
            worker_id: Some(anna),
            service: Some("cut".to_string()),
            method: Some("noncash".to_string()),
            amount: Decimal::new(800, 0),
        })
        .unwrap();

        let day = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
        let march = ctl.period_report(day(10), day(10)).unwrap();
        assert_eq!(march.total_services, Decimal::new(800, 0));
        assert_eq!(march.payroll[0].accrued, Decimal::new(40000, 2));

        let before = ctl.period_report(day(1), day(9)).unwrap();
        assert_eq!(before.total_services, Decimal::ZERO);
    }
}
