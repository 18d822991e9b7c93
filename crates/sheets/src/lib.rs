//! `stockpilot-sheets`
//!
//! **Responsibility:** the persistence capability boundary.
//!
//! The application commits inventory deltas and sale intents through the
//! [`SheetStore`] trait so a real backend (a spreadsheet API behind a server,
//! a database, anything with durable writes) can be substituted without
//! touching reconciliation logic. The only implementation in scope is a mock
//! that simulates latency and succeeds unconditionally.
//!
//! A real implementation would need idempotent writes keyed by a
//! client-generated request id; the reconciliation engine does not
//! deduplicate retried commits.

pub mod mock;
pub mod store;

pub use mock::MockSheetStore;
pub use store::{SheetError, SheetStore};
