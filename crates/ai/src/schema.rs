//! Fixed structured-output schemas sent with every completion request.
//!
//! These follow the Gemini `responseSchema` format (OpenAPI-style with
//! upper-case type names). The schemas are the contract: the model is asked
//! for JSON matching them, and the parser re-validates what comes back.

use serde_json::{Value as JsonValue, json};

/// Array-of-products schema for inventory prompts.
///
/// `promotion` is optional; the model is instructed to normalize percentage
/// phrasing ("10% off") into a fraction and to default to 0 when the prompt
/// mentions no promotion.
pub fn inventory_schema() -> JsonValue {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": {
                    "type": "STRING",
                    "description": "The name of the product.",
                },
                "cost": {
                    "type": "NUMBER",
                    "description": "The cost price of a single unit of the product.",
                },
                "price": {
                    "type": "NUMBER",
                    "description": "The selling price of a single unit of the product.",
                },
                "stock": {
                    "type": "INTEGER",
                    "description": "The number of units to add to the stock.",
                },
                "promotion": {
                    "type": "NUMBER",
                    "description": "The promotional discount as a decimal (e.g., 0.1 for 10% off). Default to 0 if not mentioned.",
                },
            },
            "required": ["name", "cost", "price", "stock"],
        },
    })
}

/// Array-of-line-items schema for sale prompts.
pub fn sale_schema() -> JsonValue {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "productName": {
                    "type": "STRING",
                    "description": "The name of the product sold. This must exactly match one of the product names provided in the inventory list.",
                },
                "quantity": {
                    "type": "INTEGER",
                    "description": "The number of units sold.",
                },
            },
            "required": ["productName", "quantity"],
        },
    })
}
