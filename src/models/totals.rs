//! Result types of the shift totals calculation.
//!
//! [`ShiftTotals`] is what the aggregator produces for one shift: revenue
//! split by payment method, payouts, and the projected drawer balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MethodTotals;

/// A non-fatal condition noticed while totalling a shift.
///
/// # Example
///
/// ```
/// use shift_ledger::models::TotalsWarning;
///
/// let warning = TotalsWarning {
///     code: "NEGATIVE_CASH_END".to_string(),
///     message: "Drawer is short by 50.00".to_string(),
///     severity: "high".to_string(),
/// };
/// assert_eq!(warning.severity, "high");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// Financial totals of one shift.
///
/// All amounts are exact decimals; `cash_end` may be negative while a shift
/// is open, in which case the shift cannot be closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTotals {
    /// The opening balance the totals were computed from.
    pub opening_cash: Decimal,
    /// Service revenue per payment method.
    pub services_by_method: MethodTotals,
    /// Product revenue per payment method.
    pub sales_by_method: MethodTotals,
    /// Service plus product revenue per payment method.
    pub payment_methods: MethodTotals,
    /// Sum of all payouts.
    pub total_payouts: Decimal,
    /// Opening cash plus cash service and cash product revenue.
    pub total_cash_in: Decimal,
    /// Expected drawer balance: cash in minus payouts.
    pub cash_end: Decimal,
    /// Service revenue across all recognized methods.
    pub overall_services: Decimal,
    /// Product revenue across all recognized methods.
    pub overall_sales: Decimal,
    /// Services plus sales.
    pub overall_income: Decimal,
    /// Conditions worth showing next to the totals.
    #[serde(default)]
    pub warnings: Vec<TotalsWarning>,
}

impl ShiftTotals {
    /// Returns true if the drawer would be short at close.
    pub fn is_cash_short(&self) -> bool {
        self.cash_end < Decimal::ZERO
    }

    /// Card, transfer and fast-payment revenue combined.
    ///
    /// Certificates are neither cash nor money received, so they are left
    /// out here as well.
    pub fn non_cash_total(&self) -> Decimal {
        self.payment_methods.noncash + self.payment_methods.transfer + self.payment_methods.sbp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_totals(cash_end: Decimal) -> ShiftTotals {
        let payment_methods = MethodTotals {
            cash: dec("700"),
            noncash: dec("100"),
            transfer: dec("20"),
            sbp: dec("3"),
            certificate: dec("50"),
        };
        ShiftTotals {
            opening_cash: dec("1000"),
            services_by_method: payment_methods,
            sales_by_method: MethodTotals::default(),
            payment_methods,
            total_payouts: dec("300"),
            total_cash_in: dec("1700"),
            cash_end,
            overall_services: dec("873"),
            overall_sales: Decimal::ZERO,
            overall_income: dec("873"),
            warnings: vec![],
        }
    }

    #[test]
    fn test_is_cash_short() {
        assert!(!sample_totals(dec("0")).is_cash_short());
        assert!(!sample_totals(dec("1400")).is_cash_short());
        assert!(sample_totals(dec("-0.01")).is_cash_short());
    }

    #[test]
    fn test_non_cash_total_excludes_cash_and_certificates() {
        assert_eq!(sample_totals(dec("0")).non_cash_total(), dec("123"));
    }

    #[test]
    fn test_totals_serialize_money_as_strings() {
        let json = serde_json::to_value(sample_totals(dec("1400.00"))).unwrap();
        assert_eq!(json["cash_end"], "1400.00");
        assert_eq!(json["payment_methods"]["certificate"], "50");
        assert!(json["warnings"].as_array().unwrap().is_empty());
    }
}
