//! Always-succeeding mock store.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use stockpilot_products::{InventoryDelta, Product};
use stockpilot_sales::SaleIntent;

use crate::store::{SheetError, SheetStore};

const DEFAULT_WRITE_LATENCY: Duration = Duration::from_millis(300);
const DEFAULT_FETCH_LATENCY: Duration = Duration::from_millis(500);

/// Mock [`SheetStore`]: simulates network latency and succeeds
/// unconditionally, unless flipped into failing mode for tests.
#[derive(Debug, Clone)]
pub struct MockSheetStore {
    write_latency: Duration,
    fetch_latency: Duration,
    fail_writes: bool,
}

impl Default for MockSheetStore {
    fn default() -> Self {
        Self {
            write_latency: DEFAULT_WRITE_LATENCY,
            fetch_latency: DEFAULT_FETCH_LATENCY,
            fail_writes: false,
        }
    }
}

impl MockSheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes all fail, for exercising commit-failure paths.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn with_write_latency(mut self, latency: Duration) -> Self {
        self.write_latency = latency;
        self
    }

    pub fn with_fetch_latency(mut self, latency: Duration) -> Self {
        self.fetch_latency = latency;
        self
    }
}

#[async_trait]
impl SheetStore for MockSheetStore {
    async fn add_inventory_item(&self, item: &InventoryDelta) -> Result<(), SheetError> {
        debug!(name = %item.name, stock = item.stock, "simulating inventory append");
        tokio::time::sleep(self.write_latency).await;
        if self.fail_writes {
            return Err(SheetError::WriteRejected(format!(
                "failed to add {} to sheet",
                item.name
            )));
        }
        Ok(())
    }

    async fn record_sale(&self, intent: &SaleIntent) -> Result<(), SheetError> {
        debug!(name = %intent.product_name, quantity = intent.quantity, "simulating sale append");
        tokio::time::sleep(self.write_latency).await;
        if self.fail_writes {
            return Err(SheetError::WriteRejected(
                "failed to record sale to sheet".to_string(),
            ));
        }
        Ok(())
    }

    async fn fetch_inventory(&self) -> Result<Vec<Product>, SheetError> {
        debug!("simulating inventory fetch");
        tokio::time::sleep(self.fetch_latency).await;
        // The mock has nothing durable to return.
        Ok(Vec::new())
    }
}
