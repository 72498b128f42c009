//! Shift lifecycle and ledger operations.
//!
//! [`ShiftController`] is the single entry point for changing the ledger. It
//! owns the open/closed rules for shifts, the worker registry and the read
//! views, and reports every declined request as a typed [`Rejection`].

mod commands;
mod controller;
mod outcome;
mod registry;
mod views;

pub use commands::{
    EntryRef, NewPayout, NewSale, NewService, NewShift, NewWorker, PayoutUpdate, SaleUpdate,
    ServiceUpdate, SetTip, ShiftWorker,
};
pub use controller::{RosterRemoval, ShiftController};
pub use outcome::{Outcome, Rejection};
