//! Shift ledger for a salon point of sale.
//!
//! This crate keeps the books of a cash-register shift: the services and
//! product sales taken under each payment method, the money paid out of the
//! drawer and the workers' tips. It projects the drawer balance, closes a
//! shift once that balance is reconciled, and builds the period report and
//! payroll figures over closed and open shifts alike.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod store;
