//! Payment methods and per-method money buckets.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The settlement channel of a revenue entry.
///
/// Entries store the raw method tag they were recorded with; tags that do
/// not parse into this enum are ignored by every method bucket.
///
/// # Example
///
/// ```
/// use shift_ledger::models::PaymentMethod;
///
/// assert_eq!(PaymentMethod::from_tag("sbp"), Some(PaymentMethod::Sbp));
/// assert_eq!(PaymentMethod::from_tag("crypto"), None);
/// assert!(!PaymentMethod::Certificate.is_cash());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash, the only method that lands in the drawer.
    Cash,
    /// Card payment through the terminal.
    Noncash,
    /// Direct bank transfer.
    Transfer,
    /// Fast payment system (QR / phone number transfer).
    Sbp,
    /// Gift certificate redeemed against a service or product.
    Certificate,
}

impl PaymentMethod {
    /// Every recognized method, in display order.
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Noncash,
        PaymentMethod::Transfer,
        PaymentMethod::Sbp,
        PaymentMethod::Certificate,
    ];

    /// Parses a stored method tag. Matching is exact; unknown tags yield
    /// `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "cash" => Some(PaymentMethod::Cash),
            "noncash" => Some(PaymentMethod::Noncash),
            "transfer" => Some(PaymentMethod::Transfer),
            "sbp" => Some(PaymentMethod::Sbp),
            "certificate" => Some(PaymentMethod::Certificate),
            _ => None,
        }
    }

    /// The tag this method is stored and submitted as.
    pub fn as_tag(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Noncash => "noncash",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Sbp => "sbp",
            PaymentMethod::Certificate => "certificate",
        }
    }

    /// Returns true if revenue in this method ends up in the cash drawer.
    pub fn is_cash(self) -> bool {
        self == PaymentMethod::Cash
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| format!("unknown payment method: {}", s))
    }
}

/// One money amount per recognized payment method.
///
/// Serializes as an object keyed by method tag, which is the shape the
/// summary views consume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTotals {
    /// Cash amount.
    pub cash: Decimal,
    /// Card amount.
    pub noncash: Decimal,
    /// Bank transfer amount.
    pub transfer: Decimal,
    /// Fast payment system amount.
    pub sbp: Decimal,
    /// Gift certificate amount.
    pub certificate: Decimal,
}

impl MethodTotals {
    /// Returns the amount recorded for `method`.
    pub fn get(&self, method: PaymentMethod) -> Decimal {
        match method {
            PaymentMethod::Cash => self.cash,
            PaymentMethod::Noncash => self.noncash,
            PaymentMethod::Transfer => self.transfer,
            PaymentMethod::Sbp => self.sbp,
            PaymentMethod::Certificate => self.certificate,
        }
    }

    /// Adds `amount` to the bucket for `method`.
    pub fn add(&mut self, method: PaymentMethod, amount: Decimal) {
        let bucket = match method {
            PaymentMethod::Cash => &mut self.cash,
            PaymentMethod::Noncash => &mut self.noncash,
            PaymentMethod::Transfer => &mut self.transfer,
            PaymentMethod::Sbp => &mut self.sbp,
            PaymentMethod::Certificate => &mut self.certificate,
        };
        *bucket += amount;
    }

    /// Sum across all methods.
    pub fn total(&self) -> Decimal {
        PaymentMethod::ALL.iter().map(|m| self.get(*m)).sum()
    }

    /// Bucket-wise sum of two breakdowns.
    pub fn combined(&self, other: &MethodTotals) -> MethodTotals {
        let mut out = *self;
        for method in PaymentMethod::ALL {
            out.add(method, other.get(method));
        }
        out
    }

    /// Share of `method` in the total as a percentage rounded to one decimal
    /// place. Returns zero when nothing was taken at all.
    pub fn share_of(&self, method: PaymentMethod) -> Decimal {
        let total = self.total();
        if total.is_zero() {
            return Decimal::ZERO;
        }
        (self.get(method) * Decimal::ONE_HUNDRED / total).round_dp(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_every_method_round_trips_through_its_tag() {
        for method in PaymentMethod::ALL {
            assert_eq!(PaymentMethod::from_tag(method.as_tag()), Some(method));
        }
    }

    #[test]
    fn test_unknown_tags_are_not_methods() {
        assert_eq!(PaymentMethod::from_tag(""), None);
        assert_eq!(PaymentMethod::from_tag("Cash"), None);
        assert_eq!(PaymentMethod::from_tag("bitcoin"), None);
        assert_eq!(PaymentMethod::from_tag(" cash "), None);
        assert_eq!(PaymentMethod::from_tag("sbp\n"), None);
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_only_cash_is_cash() {
        let cash: Vec<_> = PaymentMethod::ALL.iter().filter(|m| m.is_cash()).collect();
        assert_eq!(cash, vec![&PaymentMethod::Cash]);
    }

    #[test]
    fn test_method_serialization() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Certificate).unwrap(),
            "\"certificate\""
        );
        let parsed: PaymentMethod = serde_json::from_str("\"noncash\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Noncash);
    }

    #[test]
    fn test_add_touches_only_its_bucket() {
        // Every variant must land in its own bucket and nowhere else.
        for method in PaymentMethod::ALL {
            let mut totals = MethodTotals::default();
            totals.add(method, dec("12.34"));
            for other in PaymentMethod::ALL {
                let expected = if other == method { dec("12.34") } else { Decimal::ZERO };
                assert_eq!(totals.get(other), expected, "{} leaked into {}", method, other);
            }
        }
    }

    #[test]
    fn test_combined_and_total() {
        let mut services = MethodTotals::default();
        services.add(PaymentMethod::Cash, dec("100.10"));
        services.add(PaymentMethod::Sbp, dec("50.00"));
        let mut sales = MethodTotals::default();
        sales.add(PaymentMethod::Cash, dec("0.20"));
        sales.add(PaymentMethod::Certificate, dec("30"));

        let both = services.combined(&sales);
        assert_eq!(both.cash, dec("100.30"));
        assert_eq!(both.sbp, dec("50.00"));
        assert_eq!(both.certificate, dec("30"));
        assert_eq!(both.total(), dec("180.30"));
    }

    #[test]
    fn test_share_of() {
        let mut totals = MethodTotals::default();
        totals.add(PaymentMethod::Cash, dec("1"));
        totals.add(PaymentMethod::Noncash, dec("2"));
        assert_eq!(totals.share_of(PaymentMethod::Cash), dec("33.3"));
        assert_eq!(totals.share_of(PaymentMethod::Noncash), dec("66.7"));
        assert_eq!(MethodTotals::default().share_of(PaymentMethod::Cash), Decimal::ZERO);
    }
}
