use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpilot_core::{DomainError, DomainResult, ProductId, SaleId};
use stockpilot_products::Product;

/// Append-only sale record.
///
/// `price_per_unit` and `promotion_applied` are a **snapshot** of the
/// product's values at the moment of sale. The product's current price and
/// promotion may diverge afterwards without affecting historical sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub sale_date: DateTime<Utc>,
    pub price_per_unit: f64,
    pub promotion_applied: f64,
}

impl Sale {
    /// Freeze the product's current price and promotion into a new record.
    pub fn snapshot(product: &Product, quantity: u32, sale_date: DateTime<Utc>) -> Self {
        Self {
            id: SaleId::new(),
            product_id: product.id,
            quantity,
            sale_date,
            price_per_unit: product.price,
            promotion_applied: product.promotion,
        }
    }

    /// Effective unit price after the promotion captured at sale time.
    pub fn effective_unit_price(&self) -> f64 {
        self.price_per_unit * (1.0 - self.promotion_applied)
    }

    /// Line total for this sale.
    pub fn total(&self) -> f64 {
        self.effective_unit_price() * self.quantity as f64
    }
}

/// A parsed sale line item: which product, how many units.
///
/// Produced by the AI adapter; the reconciliation engine resolves the name
/// against current inventory and validates stock before applying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleIntent {
    pub product_name: String,
    pub quantity: u32,
}

impl SaleIntent {
    pub fn new(product_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
        }
    }

    /// Deterministic validation of a parsed intent.
    pub fn validate(&self) -> DomainResult<()> {
        if self.product_name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }
        if self.quantity == 0 {
            return Err(DomainError::validation("sale quantity must be positive"));
        }
        Ok(())
    }
}
