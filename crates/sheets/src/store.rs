use async_trait::async_trait;
use thiserror::Error;

use stockpilot_products::{InventoryDelta, Product};
use stockpilot_sales::SaleIntent;

/// Failure at the persistence boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// The store refused the write.
    #[error("write rejected: {0}")]
    WriteRejected(String),

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Capability interface for the backing store.
///
/// All calls are asynchronous and fallible; callers decide what a failed
/// commit means for local state (the controller treats the inventory batch
/// as all-or-nothing).
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Append one inventory delta to the store.
    async fn add_inventory_item(&self, item: &InventoryDelta) -> Result<(), SheetError>;

    /// Append one sale line item to the store.
    async fn record_sale(&self, intent: &SaleIntent) -> Result<(), SheetError>;

    /// Read the full inventory from the store.
    async fn fetch_inventory(&self) -> Result<Vec<Product>, SheetError>;
}
