//! Products domain module.
//!
//! This crate contains the catalog record and the parsed inventory delta,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no AI).

pub mod product;

pub use product::{InventoryDelta, Product};
