//! Application state and the reconciliation reducer.
//!
//! State transitions are pure: `apply` takes the old state and an action and
//! returns a brand-new state (or an error, leaving the old state untouched).
//! This is what makes the reconciliation rules testable without a rendering
//! layer and what makes commits atomic swaps of the whole list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockpilot_core::{DomainError, DomainResult, ProductId};
use stockpilot_products::{InventoryDelta, Product};
use stockpilot_sales::{Sale, SaleIntent};

/// A state transition request.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Merge parsed inventory deltas into the product list, in parser order.
    MergeInventory(Vec<InventoryDelta>),

    /// Record parsed sale line items against current stock.
    ///
    /// The timestamp is part of the action so transitions stay deterministic.
    RecordSales {
        intents: Vec<SaleIntent>,
        at: DateTime<Utc>,
    },
}

/// The whole application state: current inventory plus the append-only sale
/// log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Demo state: three products, two historical sales.
    pub fn seeded() -> Self {
        let t_shirt = Product {
            id: ProductId::new(),
            name: "Classic T-Shirt".to_string(),
            cost: 7.50,
            price: 24.99,
            stock: 100,
            promotion: 0.0,
        };
        let jeans = Product {
            id: ProductId::new(),
            name: "Denim Jeans".to_string(),
            cost: 22.00,
            price: 79.99,
            stock: 50,
            promotion: 0.1,
        };
        let belt = Product {
            id: ProductId::new(),
            name: "Leather Belt".to_string(),
            cost: 5.00,
            price: 19.99,
            stock: 75,
            promotion: 0.0,
        };

        let sales = vec![
            Sale::snapshot(&jeans, 2, Utc::now()),
            Sale::snapshot(&t_shirt, 5, Utc::now()),
        ];

        Self {
            products: vec![t_shirt, jeans, belt],
            sales,
        }
    }

    /// Names of every product currently in inventory, in list order.
    pub fn product_names(&self) -> Vec<String> {
        self.products.iter().map(|p| p.name.clone()).collect()
    }

    /// Case-insensitive product lookup by name.
    pub fn find_product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.matches_name(name))
    }

    pub fn product_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Pure transition: old state + action -> new state.
    ///
    /// On error nothing is produced; the caller keeps the old state. A
    /// multi-item action is all-or-nothing from the caller's point of view.
    pub fn apply(&self, action: &Action) -> DomainResult<AppState> {
        let mut next = self.clone();
        match action {
            Action::MergeInventory(deltas) => {
                for delta in deltas {
                    delta.validate()?;
                    match next.products.iter_mut().find(|p| p.matches_name(&delta.name)) {
                        Some(existing) => existing.merge_delta(delta),
                        None => next.products.push(Product::from_delta(delta)),
                    }
                }
            }
            Action::RecordSales { intents, at } => {
                for intent in intents {
                    intent.validate()?;
                    let product = next
                        .products
                        .iter_mut()
                        .find(|p| p.matches_name(&intent.product_name))
                        .ok_or_else(|| DomainError::product_not_found(&intent.product_name))?;
                    if product.stock < intent.quantity {
                        return Err(DomainError::insufficient_stock(
                            &product.name,
                            intent.quantity,
                            product.stock,
                        ));
                    }
                    // Decrement first so a later intent for the same product
                    // validates against the running stock.
                    product.stock -= intent.quantity;
                    let sale = Sale::snapshot(product, intent.quantity, *at);
                    next.sales.push(sale);
                }
            }
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn delta(name: &str, cost: f64, price: f64, stock: u32, promotion: f64) -> InventoryDelta {
        InventoryDelta {
            name: name.to_string(),
            cost,
            price,
            stock,
            promotion,
        }
    }

    fn stock_of(state: &AppState, name: &str) -> u32 {
        state.find_product(name).unwrap().stock
    }

    #[test]
    fn merging_a_delta_for_an_existing_product_is_additive_on_stock_only() {
        let state = AppState::seeded();
        let before_belt = stock_of(&state, "Leather Belt");

        let next = state
            .apply(&Action::MergeInventory(vec![delta(
                "classic t-shirt",
                8.0,
                29.99,
                40,
                0.2,
            )]))
            .unwrap();

        let shirt = next.find_product("Classic T-Shirt").unwrap();
        assert_eq!(shirt.stock, 140);
        assert_eq!(shirt.cost, 8.0);
        assert_eq!(shirt.price, 29.99);
        assert_eq!(shirt.promotion, 0.2);
        // Casing of the stored name is untouched by a lower-cased delta.
        assert_eq!(shirt.name, "Classic T-Shirt");
        // Other products are unaffected.
        assert_eq!(stock_of(&next, "Leather Belt"), before_belt);
        assert_eq!(next.products.len(), 3);
    }

    #[test]
    fn merging_an_unmatched_delta_inserts_a_new_product() {
        let state = AppState::seeded();
        let next = state
            .apply(&Action::MergeInventory(vec![delta(
                "Red Hoodie",
                15.0,
                35.0,
                100,
                0.0,
            )]))
            .unwrap();

        assert_eq!(next.products.len(), 4);
        let hoodie = next.find_product("red hoodie").unwrap();
        assert_eq!(hoodie.stock, 100);
        assert!(!state.products.iter().any(|p| p.id == hoodie.id));
    }

    #[test]
    fn deltas_apply_in_parser_order() {
        let state = AppState::new();
        let next = state
            .apply(&Action::MergeInventory(vec![
                delta("Red Hoodie", 15.0, 35.0, 100, 0.0),
                delta("Red Hoodie", 16.0, 39.99, 50, 0.1),
            ]))
            .unwrap();

        assert_eq!(next.products.len(), 1);
        let hoodie = &next.products[0];
        assert_eq!(hoodie.stock, 150);
        // Last write wins for pricing.
        assert_eq!(hoodie.price, 39.99);
        assert_eq!(hoodie.promotion, 0.1);
    }

    #[test]
    fn a_sale_decrements_stock_and_snapshots_current_pricing() {
        let state = AppState::seeded();
        let at = Utc::now();
        let next = state
            .apply(&Action::RecordSales {
                intents: vec![SaleIntent::new("denim jeans", 2)],
                at,
            })
            .unwrap();

        assert_eq!(stock_of(&next, "Denim Jeans"), 48);
        assert_eq!(next.sales.len(), state.sales.len() + 1);

        let sale = next.sales.last().unwrap();
        let jeans = next.find_product("Denim Jeans").unwrap();
        assert_eq!(sale.product_id, jeans.id);
        assert_eq!(sale.quantity, 2);
        assert_eq!(sale.sale_date, at);
        // Snapshot of the product's values at the time of the call.
        assert_eq!(sale.price_per_unit, 79.99);
        assert_eq!(sale.promotion_applied, 0.1);
    }

    #[test]
    fn oversold_sale_fails_without_producing_a_new_state() {
        let state = AppState::seeded();
        let err = state
            .apply(&Action::RecordSales {
                intents: vec![SaleIntent::new("Leather Belt", 76)],
                at: Utc::now(),
            })
            .unwrap_err();

        match err {
            DomainError::InsufficientStock {
                name,
                requested,
                available,
            } => {
                assert_eq!(name, "Leather Belt");
                assert_eq!(requested, 76);
                assert_eq!(available, 75);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }

    #[test]
    fn unknown_product_sale_fails_with_product_not_found() {
        let state = AppState::seeded();
        let err = state
            .apply(&Action::RecordSales {
                intents: vec![SaleIntent::new("Red Hoodie", 1)],
                at: Utc::now(),
            })
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::product_not_found("Red Hoodie")
        );
    }

    #[test]
    fn repeated_intents_validate_against_the_running_stock() {
        let state = AppState::seeded();

        // 50 in stock: 30 + 21 must fail even though each alone would fit.
        let err = state
            .apply(&Action::RecordSales {
                intents: vec![
                    SaleIntent::new("Denim Jeans", 30),
                    SaleIntent::new("Denim Jeans", 21),
                ],
                at: Utc::now(),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { .. }));

        // 30 + 20 exactly drains the stock.
        let next = state
            .apply(&Action::RecordSales {
                intents: vec![
                    SaleIntent::new("Denim Jeans", 30),
                    SaleIntent::new("Denim Jeans", 20),
                ],
                at: Utc::now(),
            })
            .unwrap();
        assert_eq!(stock_of(&next, "Denim Jeans"), 0);
        assert_eq!(next.sales.len(), state.sales.len() + 2);
    }

    #[test]
    fn failing_mid_list_leaves_the_caller_with_the_old_state() {
        let state = AppState::seeded();
        let result = state.apply(&Action::RecordSales {
            intents: vec![
                SaleIntent::new("Classic T-Shirt", 10),
                SaleIntent::new("Missing Product", 1),
            ],
            at: Utc::now(),
        });

        assert!(result.is_err());
        // The input state is untouched; no partial application leaked out.
        assert_eq!(stock_of(&state, "Classic T-Shirt"), 100);
        assert_eq!(state.sales.len(), 2);
    }

    proptest! {
        /// Property: for any quantity within stock, post-sale stock is
        /// exactly pre-sale stock minus the quantity.
        #[test]
        fn sale_conserves_stock(initial in 1u32..10_000, sold_fraction in 0.0f64..=1.0) {
            let sold = ((initial as f64) * sold_fraction).floor() as u32;
            let sold = sold.max(1).min(initial);

            let state = AppState::new()
                .apply(&Action::MergeInventory(vec![delta("Widget", 1.0, 2.0, initial, 0.0)]))
                .unwrap();
            let next = state
                .apply(&Action::RecordSales {
                    intents: vec![SaleIntent::new("Widget", sold)],
                    at: Utc::now(),
                })
                .unwrap();

            prop_assert_eq!(stock_of(&next, "Widget"), initial - sold);
            prop_assert_eq!(next.sales.len(), 1);
        }
    }
}
