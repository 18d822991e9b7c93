//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable at the submission boundary: the controller
/// turns these into transient user-facing notifications, never panics.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// The AI adapter returned something we could not turn into structured
    /// inventory or sale data.
    #[error("could not understand the prompt: {0}")]
    ParseFailure(String),

    /// A sale referenced a product name with no match in current inventory.
    #[error("product \"{name}\" not found in inventory")]
    ProductNotFound { name: String },

    /// A sale asked for more units than are currently in stock.
    #[error("not enough stock for \"{name}\": requested {requested}, only {available} available")]
    InsufficientStock {
        name: String,
        requested: u32,
        available: u32,
    },

    /// The persistence collaborator reported a failed write.
    #[error("failed to commit to the backing store: {0}")]
    CommitFailure(String),

    /// A value failed deterministic validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn parse_failure(msg: impl Into<String>) -> Self {
        Self::ParseFailure(msg.into())
    }

    pub fn product_not_found(name: impl Into<String>) -> Self {
        Self::ProductNotFound { name: name.into() }
    }

    pub fn insufficient_stock(name: impl Into<String>, requested: u32, available: u32) -> Self {
        Self::InsufficientStock {
            name: name.into(),
            requested,
            available,
        }
    }

    pub fn commit_failure(msg: impl Into<String>) -> Self {
        Self::CommitFailure(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
