//! Prompt-to-domain-object translation.
//!
//! Builds the instruction sent to the completion service, then validates the
//! structured response into domain input types. Failure anywhere surfaces as
//! an [`AiError`]; there is no retry and no partial acceptance.

use serde::Deserialize;
use tracing::debug;

use stockpilot_products::InventoryDelta;
use stockpilot_sales::SaleIntent;

use crate::client::CompletionClient;
use crate::error::AiError;
use crate::schema;

/// Wire shape of one inventory item as the model returns it.
#[derive(Debug, Deserialize)]
struct WireInventoryItem {
    name: String,
    cost: f64,
    price: f64,
    stock: u32,
    /// Missing or null when the prompt mentions no promotion.
    #[serde(default)]
    promotion: Option<f64>,
}

impl WireInventoryItem {
    fn into_delta(self) -> InventoryDelta {
        InventoryDelta {
            name: self.name,
            cost: self.cost,
            price: self.price,
            stock: self.stock,
            promotion: self.promotion.unwrap_or(0.0),
        }
    }
}

/// Wire shape of one sale line item.
#[derive(Debug, Deserialize)]
struct WireSaleItem {
    #[serde(rename = "productName")]
    product_name: String,
    quantity: u32,
}

/// Translate a free-form inventory update into a list of deltas.
///
/// The model is instructed to normalize percentage phrasing into fractions
/// and to default a missing promotion to 0; the adapter re-checks ranges but
/// does not re-derive the normalization.
pub async fn parse_inventory_prompt(
    client: &dyn CompletionClient,
    prompt: &str,
) -> Result<Vec<InventoryDelta>, AiError> {
    let instruction = format!(
        "Parse the following inventory update and provide a JSON output. \
         If a promotion is mentioned as a percentage, convert it to a decimal \
         (e.g., 10% becomes 0.1). If no promotion is mentioned, it should be 0. \
         Prompt: \"{prompt}\""
    );

    let text = client
        .complete(&instruction, &schema::inventory_schema())
        .await?;

    let items: Vec<WireInventoryItem> = serde_json::from_str(&text)
        .map_err(|e| AiError::UnexpectedResponse(format!("expected an array of products: {e}")))?;

    let deltas: Vec<InventoryDelta> = items.into_iter().map(WireInventoryItem::into_delta).collect();
    for delta in &deltas {
        delta
            .validate()
            .map_err(|e| AiError::UnexpectedResponse(e.to_string()))?;
    }

    debug!(count = deltas.len(), "parsed inventory deltas");
    Ok(deltas)
}

/// Translate a free-form sales update into sale intents.
///
/// The current product-name list is embedded in the instruction so the model
/// can only answer with known names. Every returned line item is surfaced;
/// multi-item prompts are processed in full, not truncated to the first item.
pub async fn parse_sale_prompt(
    client: &dyn CompletionClient,
    prompt: &str,
    product_names: &[String],
) -> Result<Vec<SaleIntent>, AiError> {
    let listing = product_names.join(", ");
    let instruction = format!(
        "Parse the following sales update. Identify the product name and \
         quantity sold for each item. The product name must be one of the \
         following: [{listing}]. Prompt: \"{prompt}\""
    );

    let text = client.complete(&instruction, &schema::sale_schema()).await?;

    let items: Vec<WireSaleItem> = serde_json::from_str(&text)
        .map_err(|e| AiError::UnexpectedResponse(format!("expected an array of sales: {e}")))?;
    if items.is_empty() {
        return Err(AiError::UnexpectedResponse(
            "expected at least one sale item".to_string(),
        ));
    }

    let intents: Vec<SaleIntent> = items
        .into_iter()
        .map(|item| SaleIntent::new(item.product_name, item.quantity))
        .collect();
    for intent in &intents {
        intent
            .validate()
            .map_err(|e| AiError::UnexpectedResponse(e.to_string()))?;
    }

    debug!(count = intents.len(), "parsed sale intents");
    Ok(intents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value as JsonValue;
    use std::sync::Mutex;

    /// Canned-response client that records the instruction it was given.
    struct StubClient {
        response: String,
        last_prompt: Mutex<Option<String>>,
    }

    impl StubClient {
        fn returning(response: &str) -> Self {
            Self {
                response: response.to_string(),
                last_prompt: Mutex::new(None),
            }
        }

        fn last_prompt(&self) -> String {
            self.last_prompt.lock().unwrap().clone().unwrap()
        }
    }

    #[async_trait]
    impl CompletionClient for StubClient {
        async fn complete(
            &self,
            prompt: &str,
            _response_schema: &JsonValue,
        ) -> Result<String, AiError> {
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            Ok(self.response.clone())
        }
    }

    #[tokio::test]
    async fn inventory_response_parses_into_deltas() {
        let client = StubClient::returning(
            r#"[
                {"name": "Red Hoodie", "cost": 15, "price": 35, "stock": 100, "promotion": 0.1},
                {"name": "Blue Cap", "cost": 5, "price": 15, "stock": 50}
            ]"#,
        );

        let deltas = parse_inventory_prompt(&client, "Add 100 Red Hoodies...")
            .await
            .unwrap();

        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].name, "Red Hoodie");
        assert_eq!(deltas[0].stock, 100);
        assert_eq!(deltas[0].promotion, 0.1);
        // Omitted promotion defaults to 0.
        assert_eq!(deltas[1].promotion, 0.0);
    }

    #[tokio::test]
    async fn inventory_instruction_carries_the_user_prompt() {
        let client = StubClient::returning("[]");
        parse_inventory_prompt(&client, "Add 10 Widgets, cost $1, price $2")
            .await
            .unwrap();
        let prompt = client.last_prompt();
        assert!(prompt.contains("Add 10 Widgets, cost $1, price $2"));
        assert!(prompt.contains("10% becomes 0.1"));
    }

    #[tokio::test]
    async fn non_array_inventory_response_is_rejected() {
        let client = StubClient::returning(r#"{"name": "Red Hoodie"}"#);
        let err = parse_inventory_prompt(&client, "whatever").await.unwrap_err();
        assert!(matches!(err, AiError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn inventory_item_missing_required_field_is_rejected() {
        // "price" missing.
        let client =
            StubClient::returning(r#"[{"name": "Red Hoodie", "cost": 15, "stock": 100}]"#);
        let err = parse_inventory_prompt(&client, "whatever").await.unwrap_err();
        assert!(matches!(err, AiError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn out_of_range_promotion_is_rejected() {
        let client = StubClient::returning(
            r#"[{"name": "Red Hoodie", "cost": 15, "price": 35, "stock": 100, "promotion": 1.5}]"#,
        );
        let err = parse_inventory_prompt(&client, "whatever").await.unwrap_err();
        assert!(matches!(err, AiError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn sale_response_surfaces_every_line_item() {
        let client = StubClient::returning(
            r#"[
                {"productName": "Red Hoodie", "quantity": 3},
                {"productName": "Blue Cap", "quantity": 1}
            ]"#,
        );
        let names = vec!["Red Hoodie".to_string(), "Blue Cap".to_string()];

        let intents = parse_sale_prompt(&client, "Sold 3 Red Hoodies and 1 Blue Cap", &names)
            .await
            .unwrap();

        assert_eq!(intents.len(), 2);
        assert_eq!(intents[0], SaleIntent::new("Red Hoodie", 3));
        assert_eq!(intents[1], SaleIntent::new("Blue Cap", 1));
    }

    #[tokio::test]
    async fn sale_instruction_lists_current_product_names() {
        let client = StubClient::returning(r#"[{"productName": "Red Hoodie", "quantity": 1}]"#);
        let names = vec!["Red Hoodie".to_string(), "Blue Cap".to_string()];
        parse_sale_prompt(&client, "Sold one hoodie", &names)
            .await
            .unwrap();
        assert!(client.last_prompt().contains("[Red Hoodie, Blue Cap]"));
    }

    #[tokio::test]
    async fn empty_sale_response_is_rejected() {
        let client = StubClient::returning("[]");
        let err = parse_sale_prompt(&client, "Sold nothing", &[]).await.unwrap_err();
        assert!(matches!(err, AiError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn sale_item_missing_quantity_is_rejected() {
        let client = StubClient::returning(r#"[{"productName": "Red Hoodie"}]"#);
        let err = parse_sale_prompt(&client, "Sold hoodies", &[]).await.unwrap_err();
        assert!(matches!(err, AiError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn zero_quantity_sale_is_rejected() {
        let client = StubClient::returning(r#"[{"productName": "Red Hoodie", "quantity": 0}]"#);
        let err = parse_sale_prompt(&client, "Sold zero hoodies", &[]).await.unwrap_err();
        assert!(matches!(err, AiError::UnexpectedResponse(_)));
    }
}
