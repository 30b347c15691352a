//! Read models for the admin back office.
//!
//! The back office reports over denormalized user purchase histories. The
//! flattening lives in a pure builder function ([`build_ledger`]) so it is
//! testable in isolation; [`OrderLedger`] wraps it with re-reads from the
//! user resource and the two admin mutations (status rewrite, deletion).

pub mod error;
pub mod ledger;

pub use error::{ProjectionError, Result};
pub use ledger::{LedgerEntry, OrderLedger, build_ledger};
