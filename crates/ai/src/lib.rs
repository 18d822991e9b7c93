//! `stockpilot-ai`
//!
//! **Responsibility:** the remote parsing boundary.
//!
//! Free-form user text goes out to a hosted generative model together with a
//! fixed JSON output schema; validated structured data (inventory deltas or
//! sale intents) comes back. This crate does not mutate domain state:
//! - It produces **candidate** deltas/intents; reconciliation happens in the
//!   application layer.
//! - One blocking round trip per invocation. No caching, no rate limiting,
//!   no streaming, no retry.

pub mod client;
pub mod error;
pub mod parser;
pub mod schema;

pub use client::{CompletionClient, GeminiClient, GeminiConfig};
pub use error::AiError;
pub use parser::{parse_inventory_prompt, parse_sale_prompt};
