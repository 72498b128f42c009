//! Shift totals calculation.
//!
//! This module sums a shift's service entries, product sales and payouts by
//! payment method and projects the cash drawer balance at close.

use rust_decimal::Decimal;

use crate::models::{MethodTotals, PaymentMethod, Payout, RevenueLine, ShiftTotals, TotalsWarning};

/// Warning code for entries whose method tag is not a known payment method.
pub const UNRECOGNIZED_METHOD_WARNING: &str = "UNRECOGNIZED_PAYMENT_METHOD";

/// Warning code for a drawer projected to hold less than nothing.
pub const NEGATIVE_CASH_END_WARNING: &str = "NEGATIVE_CASH_END";

/// Computes the financial totals of a shift.
///
/// Revenue is bucketed by payment method; entries with an unrecognized
/// method tag count towards no bucket and produce a warning instead of an
/// error. Only cash revenue enters the drawer:
///
/// ```text
/// total_cash_in = opening_cash + cash services + cash sales
/// cash_end      = total_cash_in - Σ payouts
/// ```
///
/// The function is pure: the same inputs always give the same totals.
///
/// # Arguments
///
/// * `opening_cash` - Drawer balance when the shift opened
/// * `service_entries` - Services recorded during the shift
/// * `product_sales` - Product sales recorded during the shift
/// * `payouts` - Money taken out of the drawer during the shift
///
/// # Examples
///
/// ```
/// use shift_ledger::calculation::compute_totals;
/// use shift_ledger::models::{Payout, ProductSale, ServiceEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let at = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let services = vec![ServiceEntry {
///     id: 1, shift_id: 1, worker_id: 1,
///     service: "haircut".to_string(),
///     amount: Decimal::from_str("500.00").unwrap(),
///     method: "cash".to_string(),
///     created_at: at,
/// }];
/// let sales = vec![ProductSale {
///     id: 1, shift_id: 1,
///     product: "shampoo".to_string(),
///     amount: Decimal::from_str("200.00").unwrap(),
///     method: "cash".to_string(),
///     created_at: at,
/// }];
/// let payouts = vec![Payout {
///     id: 1, shift_id: 1, worker_id: None,
///     amount: Decimal::from_str("300.00").unwrap(),
///     note: None,
///     created_at: at,
/// }];
///
/// let totals = compute_totals(Decimal::from_str("1000.00").unwrap(), &services, &sales, &payouts);
/// assert_eq!(totals.cash_end, Decimal::from_str("1400.00").unwrap());
/// ```
pub fn compute_totals<S, P>(
    opening_cash: Decimal,
    service_entries: &[S],
    product_sales: &[P],
    payouts: &[Payout],
) -> ShiftTotals
where
    S: RevenueLine,
    P: RevenueLine,
{
    let (services_by_method, unknown_services) = bucket_by_method(service_entries);
    let (sales_by_method, unknown_sales) = bucket_by_method(product_sales);

    let total_payouts: Decimal = payouts.iter().map(|p| p.amount).sum();
    let total_cash_in = opening_cash
        + services_by_method.get(PaymentMethod::Cash)
        + sales_by_method.get(PaymentMethod::Cash);
    let cash_end = total_cash_in - total_payouts;

    let overall_services = services_by_method.total();
    let overall_sales = sales_by_method.total();

    let mut warnings = Vec::new();
    let unknown = unknown_services + unknown_sales;
    if unknown > 0 {
        warnings.push(TotalsWarning {
            code: UNRECOGNIZED_METHOD_WARNING.to_string(),
            message: format!(
                "{} entr{} with an unrecognized payment method excluded from totals",
                unknown,
                if unknown == 1 { "y" } else { "ies" }
            ),
            severity: "medium".to_string(),
        });
    }
    if cash_end < Decimal::ZERO {
        warnings.push(TotalsWarning {
            code: NEGATIVE_CASH_END_WARNING.to_string(),
            message: format!("Drawer is short by {}", -cash_end),
            severity: "high".to_string(),
        });
    }

    ShiftTotals {
        opening_cash,
        services_by_method,
        sales_by_method,
        payment_methods: services_by_method.combined(&sales_by_method),
        total_payouts,
        total_cash_in,
        cash_end,
        overall_services,
        overall_sales,
        overall_income: overall_services + overall_sales,
        warnings,
    }
}

/// Sums entries per recognized method and counts the ones that matched none.
fn bucket_by_method<L: RevenueLine>(lines: &[L]) -> (MethodTotals, usize) {
    let mut totals = MethodTotals::default();
    let mut unknown = 0;
    for line in lines {
        match line.payment_method() {
            Some(method) => totals.add(method, line.amount()),
            None => unknown += 1,
        }
    }
    (totals, unknown)
}
