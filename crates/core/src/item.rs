use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::id::ItemId;
use crate::quantity::Quantity;

/// Document body of an item as written to the store (everything but the id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFields {
    pub name: String,
    pub quantity: Quantity,
}

impl ItemFields {
    pub fn new(name: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    /// Build fields from user input, trimming the name.
    pub fn from_input(name: &str, quantity: Quantity) -> ValidationResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(Self::new(name, quantity))
    }
}

/// A named, quantified pantry entry as observed from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub quantity: Quantity,
}

impl Item {
    pub fn new(id: ItemId, fields: ItemFields) -> Self {
        Self {
            id,
            name: fields.name,
            quantity: fields.quantity,
        }
    }

    pub fn fields(&self) -> ItemFields {
        ItemFields::new(self.name.clone(), self.quantity)
    }

    /// Whether this item is the one identified by `name` (case-insensitive, trimmed).
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// Case-insensitive identity key for an item name.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Whether two names identify the same item.
pub fn names_match(a: &str, b: &str) -> bool {
    name_key(a) == name_key(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_input_trims_name() {
        let fields = ItemFields::from_input("  rice \n", 2.0).unwrap();
        assert_eq!(fields.name, "rice");
        assert_eq!(fields.quantity, 2.0);
    }

    #[test]
    fn from_input_rejects_blank_name() {
        assert_eq!(
            ItemFields::from_input("   ", 1.0),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn name_identity_ignores_case_and_padding() {
        let item = Item::new(ItemId::from_raw("a"), ItemFields::new("Rice", 1.0));
        assert!(item.is_named(" rICE "));
        assert!(!item.is_named("rice flour"));
    }
}
