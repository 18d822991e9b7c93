//! `stockpilot-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP, no AI
//! concerns): the shared error taxonomy and strongly-typed identifiers.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{ProductId, SaleId};
