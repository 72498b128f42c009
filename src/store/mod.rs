//! Storage for ledger records.
//!
//! [`Tables`] is the plain record set; [`MemoryStore`] wraps it with
//! all-or-nothing transactions and optional persistence to a JSON snapshot.

mod memory;
mod tables;

pub use memory::MemoryStore;
pub use tables::Tables;
