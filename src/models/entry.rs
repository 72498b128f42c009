//! Records attached to a shift: service entries, product sales, payouts
//! and tips.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PaymentMethod;

/// A revenue record that settles through a payment method.
///
/// Implemented by [`ServiceEntry`] and [`ProductSale`] so the totals
/// calculation can bucket both the same way.
pub trait RevenueLine {
    /// The raw method tag the entry was recorded with.
    fn method_tag(&self) -> &str;

    /// The entry amount.
    fn amount(&self) -> Decimal;

    /// The parsed payment method, or `None` for unrecognized tags.
    fn payment_method(&self) -> Option<PaymentMethod> {
        PaymentMethod::from_tag(self.method_tag())
    }
}

/// One service performed by a worker during a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Unique identifier for the entry.
    pub id: i64,
    /// The shift the entry belongs to.
    pub shift_id: i64,
    /// The worker who performed the service.
    pub worker_id: i64,
    /// Service label (e.g. "haircut").
    pub service: String,
    /// Amount charged.
    pub amount: Decimal,
    /// Payment method tag.
    pub method: String,
    /// When the entry was recorded.
    pub created_at: NaiveDateTime,
}

impl RevenueLine for ServiceEntry {
    fn method_tag(&self) -> &str {
        &self.method
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

/// One retail product sale during a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSale {
    /// Unique identifier for the sale.
    pub id: i64,
    /// The shift the sale belongs to.
    pub shift_id: i64,
    /// Product label.
    pub product: String,
    /// Amount charged.
    pub amount: Decimal,
    /// Payment method tag.
    pub method: String,
    /// When the sale was recorded.
    pub created_at: NaiveDateTime,
}

impl RevenueLine for ProductSale {
    fn method_tag(&self) -> &str {
        &self.method
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

/// Money taken out of the drawer during a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// Unique identifier for the payout.
    pub id: i64,
    /// The shift the payout belongs to.
    pub shift_id: i64,
    /// The worker the payout was made to, if any.
    #[serde(default)]
    pub worker_id: Option<i64>,
    /// Amount paid out.
    pub amount: Decimal,
    /// Free-text reason.
    #[serde(default)]
    pub note: Option<String>,
    /// When the payout was recorded.
    pub created_at: NaiveDateTime,
}

/// Accumulated gratuity of one worker for one shift.
///
/// There is at most one tip per `(shift_id, worker_id)` pair; setting a tip
/// replaces the previous amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    /// Unique identifier for the tip row.
    pub id: i64,
    /// The shift the tip belongs to.
    pub shift_id: i64,
    /// The worker who received the tip.
    pub worker_id: i64,
    /// Current tip amount.
    pub amount: Decimal,
    /// When the tip row was first created.
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_service_entry_payment_method() {
        let entry = ServiceEntry {
            id: 1,
            shift_id: 1,
            worker_id: 2,
            service: "haircut".to_string(),
            amount: Decimal::new(150000, 2),
            method: "transfer".to_string(),
            created_at: at(10),
        };
        assert_eq!(entry.payment_method(), Some(PaymentMethod::Transfer));
        assert_eq!(RevenueLine::amount(&entry), Decimal::new(150000, 2));
    }

    #[test]
    fn test_product_sale_with_legacy_method_has_no_payment_method() {
        let sale = ProductSale {
            id: 1,
            shift_id: 1,
            product: "shampoo".to_string(),
            amount: Decimal::new(500, 0),
            method: "barter".to_string(),
            created_at: at(11),
        };
        assert_eq!(sale.payment_method(), None);
    }

    #[test]
    fn test_payout_deserialization_defaults() {
        let json = r#"{
            "id": 9,
            "shift_id": 3,
            "amount": "300.00",
            "created_at": "2026-02-01T12:00:00"
        }"#;
        let payout: Payout = serde_json::from_str(json).unwrap();
        assert_eq!(payout.worker_id, None);
        assert_eq!(payout.note, None);
        assert_eq!(payout.amount, Decimal::new(30000, 2));
    }
}
