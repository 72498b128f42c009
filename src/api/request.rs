//! Request parsing for the shift ledger API.
//!
//! Mutations arrive as `application/x-www-form-urlencoded` bodies with loose
//! string values. [`FormFields`] coerces them the way the register forms
//! expect: comma decimals, blank-as-absent text, non-positive ids as absent.
//! The `From<&FormFields>` impls build the controller commands.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::lifecycle::{
    EntryRef, NewPayout, NewSale, NewService, NewShift, NewWorker, PayoutUpdate, Rejection,
    SaleUpdate, ServiceUpdate, SetTip, ShiftWorker,
};

/// A submitted form or query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    /// Returns true if the field was submitted at all, even blank.
    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Trimmed text; blank counts as absent.
    pub fn text(&self, key: &str) -> Option<String> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// A positive id. Missing, non-numeric, zero and negative ids are absent.
    pub fn id(&self, key: &str) -> Option<i64> {
        self.0
            .get(key)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
    }

    /// A money amount. Accepts a comma as decimal separator; anything that
    /// does not parse is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_ledger::api::FormFields;
    /// use rust_decimal::Decimal;
    ///
    /// let form: FormFields = [("amount", "1500,50"), ("bad", "lots")].into_iter().collect();
    /// assert_eq!(form.amount("amount"), Decimal::new(150050, 2));
    /// assert_eq!(form.amount("bad"), Decimal::ZERO);
    /// assert_eq!(form.amount("missing"), Decimal::ZERO);
    /// ```
    pub fn amount(&self, key: &str) -> Decimal {
        self.0
            .get(key)
            .map(|v| parse_amount(v))
            .unwrap_or(Decimal::ZERO)
    }

    /// Like [`amount`](Self::amount) but `None` when the field was not
    /// submitted.
    pub fn optional_amount(&self, key: &str) -> Option<Decimal> {
        self.has(key).then(|| self.amount(key))
    }

    /// A decimal that must parse when present. Blank counts as absent;
    /// anything else that is not a number is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_ledger::api::FormFields;
    /// use rust_decimal::Decimal;
    ///
    /// let form: FormFields = [("rate", "0,6"), ("blank", " "), ("bad", "high")].into_iter().collect();
    /// assert_eq!(form.decimal("rate"), Ok(Some(Decimal::new(6, 1))));
    /// assert_eq!(form.decimal("blank"), Ok(None));
    /// assert!(form.decimal("bad").is_err());
    /// ```
    pub fn decimal(&self, key: &str) -> Result<Option<Decimal>, Rejection> {
        match self.text(key) {
            None => Ok(None),
            Some(raw) => parse_decimal(&raw)
                .map(Some)
                .ok_or_else(|| Rejection::invalid(key, format!("'{}' is not a number", raw))),
        }
    }

    /// A calendar date given as `YYYY-MM-DD` or as an RFC 3339 timestamp.
    pub fn date(&self, key: &str) -> Option<NaiveDate> {
        let raw = self.text(key)?;
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(&raw).ok().map(|dt| dt.date_naive()))
    }

    /// A boolean flag; `true`, `1` and `on` are set.
    pub fn flag(&self, key: &str) -> bool {
        matches!(
            self.text(key).as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("true" | "1" | "on")
        )
    }

    fn entry(&self) -> EntryRef {
        EntryRef {
            shift_id: self.id("shiftId"),
            entry_id: self.id("id"),
        }
    }

    /// Shift and worker named by `shiftId` and `workerId`.
    pub fn shift_worker(&self) -> ShiftWorker {
        ShiftWorker {
            shift_id: self.id("shiftId"),
            worker_id: self.id("workerId"),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

fn parse_amount(raw: &str) -> Decimal {
    parse_decimal(raw).unwrap_or(Decimal::ZERO)
}

impl From<&FormFields> for NewShift {
    fn from(form: &FormFields) -> Self {
        NewShift {
            shift_date: form.date("shiftDate"),
            opening_cash: form.text("openingCash").map(|v| parse_amount(&v)),
            admin_id: form.id("adminId"),
        }
    }
}

impl From<&FormFields> for NewService {
    fn from(form: &FormFields) -> Self {
        NewService {
            shift_id: form.id("shiftId"),
            worker_id: form.id("workerId"),
            service: form.text("service"),
            method: form.text("method"),
            amount: form.amount("amount"),
        }
    }
}

impl From<&FormFields> for NewSale {
    fn from(form: &FormFields) -> Self {
        NewSale {
            shift_id: form.id("shiftId"),
            product: form.text("product"),
            method: form.text("method"),
            amount: form.amount("amount"),
        }
    }
}

impl From<&FormFields> for NewPayout {
    fn from(form: &FormFields) -> Self {
        NewPayout {
            shift_id: form.id("shiftId"),
            worker_id: form.id("workerId"),
            amount: form.amount("amount"),
            note: form.text("note").or_else(|| form.text("reason")),
        }
    }
}

impl From<&FormFields> for EntryRef {
    fn from(form: &FormFields) -> Self {
        form.entry()
    }
}

impl From<&FormFields> for ShiftWorker {
    fn from(form: &FormFields) -> Self {
        form.shift_worker()
    }
}

impl From<&FormFields> for ServiceUpdate {
    fn from(form: &FormFields) -> Self {
        ServiceUpdate {
            entry: form.entry(),
            service: form.text("service"),
            method: form.text("method"),
            amount: form.optional_amount("amount"),
        }
    }
}

impl From<&FormFields> for SaleUpdate {
    fn from(form: &FormFields) -> Self {
        SaleUpdate {
            entry: form.entry(),
            product: form.text("product"),
            method: form.text("method"),
            amount: form.optional_amount("amount"),
        }
    }
}

impl From<&FormFields> for PayoutUpdate {
    fn from(form: &FormFields) -> Self {
        let note_key = if form.has("note") { "note" } else { "reason" };
        PayoutUpdate {
            entry: form.entry(),
            amount: form.optional_amount("amount"),
            // A submitted blank note clears it.
            note: form.has(note_key).then(|| form.text(note_key).unwrap_or_default()),
        }
    }
}

impl From<&FormFields> for SetTip {
    fn from(form: &FormFields) -> Self {
        SetTip {
            target: form.shift_worker(),
            amount: form.amount("amount"),
        }
    }
}

impl TryFrom<&FormFields> for NewWorker {
    type Error = Rejection;

    fn try_from(form: &FormFields) -> Result<Self, Self::Error> {
        Ok(NewWorker {
            name: form.text("name"),
            role: form.text("role"),
            category: form.text("category"),
            salary_rate: form.decimal("salaryRate")?,
        })
    }
}
