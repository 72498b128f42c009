//! Payroll display figures.
//!
//! Payroll is a reporting aid only: a worker accrues their salary rate times
//! the service revenue they brought in, keeps their tips, and has whatever
//! was already paid out to them deducted.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{PayrollRow, PayrollTotals, Worker};

/// Builds the payroll row of one worker.
///
/// `accrued` is rounded to cents, half away from zero.
///
/// # Examples
///
/// ```
/// use shift_ledger::calculation::payroll_row;
/// use shift_ledger::models::{Worker, WorkerRole};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let worker = Worker {
///     id: 1,
///     name: "Anna".to_string(),
///     role: WorkerRole::Master,
///     category: None,
///     active: true,
///     salary_rate: Decimal::from_str("0.5").unwrap(),
/// };
///
/// let row = payroll_row(
///     &worker,
///     Decimal::from_str("1000").unwrap(),
///     Decimal::from_str("50").unwrap(),
///     Decimal::from_str("200").unwrap(),
/// );
/// assert_eq!(row.accrued, Decimal::from_str("500.00").unwrap());
/// assert_eq!(row.net, Decimal::from_str("350.00").unwrap());
/// ```
pub fn payroll_row(
    worker: &Worker,
    services_total: Decimal,
    tips_total: Decimal,
    payouts_total: Decimal,
) -> PayrollRow {
    let accrued = (worker.salary_rate * services_total)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    PayrollRow {
        worker_id: worker.id,
        name: worker.name.clone(),
        role: worker.role,
        salary_rate: worker.salary_rate,
        services_total,
        tips_total,
        payouts_total,
        accrued,
        net: accrued + tips_total - payouts_total,
    }
}

/// Sums the payroll table's columns.
pub fn payroll_totals(rows: &[PayrollRow]) -> PayrollTotals {
    rows.iter().fold(PayrollTotals::default(), |mut acc, row| {
        acc.services += row.services_total;
        acc.tips += row.tips_total;
        acc.accrued += row.accrued;
        acc.payouts += row.payouts_total;
        acc.net += row.net;
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkerRole;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn worker(id: i64, rate: &str) -> Worker {
        Worker {
            id,
            name: format!("worker {}", id),
            role: WorkerRole::Master,
            category: None,
            active: true,
            salary_rate: dec(rate),
        }
    }

    #[test]
    fn test_accrued_rounds_half_cents_up() {
        let row = payroll_row(&worker(1, "0.5"), dec("100.01"), Decimal::ZERO, Decimal::ZERO);
        // 0.5 * 100.01 = 50.005
        assert_eq!(row.accrued, dec("50.01"));
        assert_eq!(row.net, dec("50.01"));
    }

    #[test]
    fn test_net_can_go_negative_after_advances() {
        let row = payroll_row(&worker(1, "0.4"), dec("500"), dec("0"), dec("300"));
        assert_eq!(row.accrued, dec("200.00"));
        assert_eq!(row.net, dec("-100.00"));
    }

    #[test]
    fn test_zero_rate_keeps_only_tips() {
        let row = payroll_row(&worker(1, "0"), dec("900"), dec("75"), dec("0"));
        assert_eq!(row.accrued, Decimal::ZERO);
        assert_eq!(row.net, dec("75"));
    }

    #[test]
    fn test_totals_sum_every_column() {
        let rows = vec![
            payroll_row(&worker(1, "0.5"), dec("1000"), dec("50"), dec("100")),
            payroll_row(&worker(2, "0.3"), dec("200"), dec("0"), dec("0")),
        ];
        let totals = payroll_totals(&rows);
        assert_eq!(totals.services, dec("1200"));
        assert_eq!(totals.tips, dec("50"));
        assert_eq!(totals.accrued, dec("560.00"));
        assert_eq!(totals.payouts, dec("100"));
        assert_eq!(totals.net, dec("510.00"));
    }

    #[test]
    fn test_empty_table_totals_are_zero() {
        assert_eq!(payroll_totals(&[]), PayrollTotals::default());
    }
}
