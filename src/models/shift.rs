//! Shift model and its lifecycle state.
//!
//! A shift is open while `closing_cash` is `None`. Closing stores the
//! reconciled drawer balance, after which the shift and everything recorded
//! against it are read-only history.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a shift, derived from its closing cash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum ShiftState {
    /// Entries may still be added, edited and removed.
    Open,
    /// Terminal state; carries the drawer balance recorded at close.
    Closed {
        /// The reconciled cash drawer balance.
        closing_cash: Decimal,
    },
}

/// Represents one work session at the register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: i64,
    /// The calendar date the shift belongs to.
    pub shift_date: NaiveDate,
    /// Cash in the drawer when the shift opened.
    pub opening_cash: Decimal,
    /// Cash in the drawer when the shift closed; `None` while open.
    #[serde(default)]
    pub closing_cash: Option<Decimal>,
    /// When the shift row was created.
    pub created_at: NaiveDateTime,
    /// The administrator who opened the shift, if recorded.
    #[serde(default)]
    pub admin_id: Option<i64>,
}

impl Shift {
    /// Returns the lifecycle state of the shift.
    ///
    /// # Examples
    ///
    /// ```
    /// use shift_ledger::models::{Shift, ShiftState};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    /// let mut shift = Shift {
    ///     id: 1,
    ///     shift_date: date,
    ///     opening_cash: Decimal::new(100000, 2),
    ///     closing_cash: None,
    ///     created_at: date.and_hms_opt(9, 0, 0).unwrap(),
    ///     admin_id: None,
    /// };
    /// assert_eq!(shift.state(), ShiftState::Open);
    ///
    /// shift.closing_cash = Some(Decimal::new(140000, 2));
    /// assert!(shift.is_closed());
    /// ```
    pub fn state(&self) -> ShiftState {
        match self.closing_cash {
            None => ShiftState::Open,
            Some(closing_cash) => ShiftState::Closed { closing_cash },
        }
    }

    /// Returns true while entries may still be changed.
    pub fn is_open(&self) -> bool {
        self.closing_cash.is_none()
    }

    /// Returns true once the shift has been reconciled.
    pub fn is_closed(&self) -> bool {
        !self.is_open()
    }
}
