//! Sales domain module.
//!
//! This crate contains the append-only sale record and the parsed sale
//! intent, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no AI).

pub mod sale;

pub use sale::{Sale, SaleIntent};
