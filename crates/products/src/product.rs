use serde::{Deserialize, Serialize};

use stockpilot_core::{DomainError, DomainResult, ProductId};

/// Catalog record: a stocked product.
///
/// `name` is the unique match key for reconciliation and sale lookup, compared
/// case-insensitively. Monetary fields are plain `f64` amounts; currency
/// formatting is a presentation concern and lives outside the domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Cost of a single unit.
    pub cost: f64,
    /// Selling price of a single unit.
    pub price: f64,
    /// Units on hand; never negative.
    pub stock: u32,
    /// Promotional discount as a fraction in `[0, 1)` (0.1 = 10% off).
    pub promotion: f64,
}

impl Product {
    /// Case-insensitive name match, the reconciliation key.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Materialize a brand-new product from an unmatched delta.
    pub fn from_delta(delta: &InventoryDelta) -> Self {
        Self {
            id: ProductId::new(),
            name: delta.name.clone(),
            cost: delta.cost,
            price: delta.price,
            stock: delta.stock,
            promotion: delta.promotion,
        }
    }

    /// Merge a delta into this product: stock is **added**, cost / price /
    /// promotion are **overwritten** (last-write-wins, no partial merge).
    pub fn merge_delta(&mut self, delta: &InventoryDelta) {
        self.stock = self.stock.saturating_add(delta.stock);
        self.cost = delta.cost;
        self.price = delta.price;
        self.promotion = delta.promotion;
    }

    /// Effective selling price after the current promotion.
    pub fn effective_price(&self) -> f64 {
        self.price * (1.0 - self.promotion)
    }
}

/// A parsed inventory change extracted from a natural-language prompt.
///
/// The AI adapter produces these; the reconciliation engine merges them into
/// the current product list (update-existing-or-insert, keyed by name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryDelta {
    pub name: String,
    pub cost: f64,
    pub price: f64,
    /// Units to add to stock (additive, unlike the price fields).
    pub stock: u32,
    /// Discount fraction in `[0, 1)`; 0 when the prompt mentions none.
    #[serde(default)]
    pub promotion: f64,
}

impl InventoryDelta {
    /// Deterministic validation of a parsed delta.
    ///
    /// The remote model is trusted to normalize percentages ("10%" -> 0.1)
    /// but not to stay in range, so the bounds are re-checked here.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(DomainError::validation(format!(
                "cost must be a non-negative amount, got {}",
                self.cost
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::validation(format!(
                "price must be a non-negative amount, got {}",
                self.price
            )));
        }
        if !self.promotion.is_finite() || !(0.0..1.0).contains(&self.promotion) {
            return Err(DomainError::validation(format!(
                "promotion must be a fraction in [0, 1), got {}",
                self.promotion
            )));
        }
        Ok(())
    }
}
