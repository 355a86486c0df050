use serde::{Deserialize, Serialize};
use serde_json::Value;

use pantry_ai::Recipe;
use pantry_core::{Item, Quantity};
use pantry_inventory::InventorySnapshot;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    #[serde(default)]
    pub name: String,
    /// Usually a string as typed; any other JSON value is accepted and goes
    /// through the same text parsing (missing or `null` is empty text).
    #[serde(default)]
    pub quantity: Option<Value>,
}

impl ItemRequest {
    pub fn quantity_text(&self) -> String {
        match &self.quantity {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemsQuery {
    #[serde(default)]
    pub search: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    /// Items matching the search, in display order.
    pub items: Vec<Item>,
    /// Sum over the whole inventory, not just `items`.
    pub total: Quantity,
    pub count: usize,
}

impl ItemsResponse {
    pub fn from_snapshot(snapshot: &InventorySnapshot, search: &str) -> Self {
        let items = snapshot.filter(search);
        Self {
            count: items.len(),
            total: snapshot.total(),
            items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub enabled: bool,
    pub recipe: Option<Recipe>,
}
