//! Reporting aggregator: pure derivations over the product and sale lists.
//!
//! Everything here is recomputed in full on each call. Sale volume is small
//! enough that incremental maintenance is not worth its bookkeeping.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockpilot_core::ProductId;
use stockpilot_products::Product;
use stockpilot_sales::Sale;

/// Aggregate financials across the whole sale log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub revenue: f64,
    pub cost: f64,
    pub profit: f64,
}

/// One row of the inventory table view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryRow {
    pub name: String,
    pub stock: u32,
    pub cost: f64,
    pub price: f64,
    pub promotion: f64,
}

/// One entry of the recent-sales view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesLogEntry {
    /// Resolved product name, or "Unknown" when the id no longer resolves.
    pub product_name: String,
    pub quantity: u32,
    /// Line total at the promotion captured when the sale was made.
    pub total: f64,
    pub sale_date: DateTime<Utc>,
}

fn product_index(products: &[Product]) -> HashMap<ProductId, &Product> {
    products.iter().map(|p| (p.id, p)).collect()
}

/// Revenue, cost and profit over the full sale list.
///
/// Effective unit price is `price_per_unit * (1 - promotion_applied)` using
/// the values frozen into each sale. Cost comes from the product's *current*
/// unit cost. Sales whose product id no longer resolves contribute nothing.
pub fn financial_report(products: &[Product], sales: &[Sale]) -> Report {
    let index = product_index(products);

    let mut revenue = 0.0;
    let mut cost = 0.0;
    for sale in sales {
        let Some(product) = index.get(&sale.product_id) else {
            continue;
        };
        revenue += sale.effective_unit_price() * sale.quantity as f64;
        cost += product.cost * sale.quantity as f64;
    }

    Report {
        revenue,
        cost,
        profit: revenue - cost,
    }
}

/// Tabular inventory view, in list order.
pub fn inventory_rows(products: &[Product]) -> Vec<InventoryRow> {
    products
        .iter()
        .map(|p| InventoryRow {
            name: p.name.clone(),
            stock: p.stock,
            cost: p.cost,
            price: p.price,
            promotion: p.promotion,
        })
        .collect()
}

/// Recent-sales view, most recent entry first.
pub fn sales_log(products: &[Product], sales: &[Sale]) -> Vec<SalesLogEntry> {
    let index = product_index(products);

    sales
        .iter()
        .rev()
        .map(|sale| SalesLogEntry {
            product_name: index
                .get(&sale.product_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            quantity: sale.quantity,
            total: sale.total(),
            sale_date: sale.sale_date,
        })
        .collect()
}
