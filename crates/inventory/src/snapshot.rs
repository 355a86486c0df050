//! Inventory snapshot: the full, sorted, locally held copy of all items.

use core::cmp::Ordering;

use pantry_core::{Item, Quantity};
use pantry_store::ItemDocument;

/// Items as last reported by the store, sorted by name, with their total.
///
/// Always rebuilt in full from a notification; never patched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InventorySnapshot {
    items: Vec<Item>,
    total: Quantity,
}

impl InventorySnapshot {
    pub fn from_documents(docs: Vec<ItemDocument>) -> Self {
        Self::from_items(docs.into_iter().map(Item::from).collect())
    }

    pub fn from_items(mut items: Vec<Item>) -> Self {
        items.sort_by(|a, b| compare_names(&a.name, &b.name));
        let total = items.iter().map(|i| i.quantity).sum();
        Self { items, total }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities (`0` when empty).
    pub fn total(&self) -> Quantity {
        self.total
    }

    /// Item names in display order.
    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|i| i.name.clone()).collect()
    }

    /// Case-insensitive lookup by name.
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.is_named(name))
    }

    /// Items whose name contains `search` (case-insensitive), in display order.
    pub fn filter(&self, search: &str) -> Vec<Item> {
        self.items
            .iter()
            .filter(|i| matches_search(&i.name, search))
            .cloned()
            .collect()
    }
}

/// Display ordering for item names.
///
/// Case-insensitive first so `"apple" < "Banana" < "cherry"`. Names equal up
/// to case put lowercase first (`"apple" < "Apple"`), as locale collation does.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Case-insensitive substring match; the empty search matches everything.
pub fn matches_search(name: &str, search: &str) -> bool {
    search.is_empty() || name.to_lowercase().contains(&search.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::{ItemFields, ItemId};
    use proptest::prelude::*;

    fn item(id: &str, name: &str, quantity: f64) -> Item {
        Item::new(ItemId::from_raw(id), ItemFields::new(name, quantity))
    }

    #[test]
    fn notification_order_is_replaced_by_name_order() {
        let snap = InventorySnapshot::from_items(vec![item("1", "banana", 1.0), item("2", "apple", 2.0)]);
        assert_eq!(snap.names(), vec!["apple", "banana"]);
    }

    #[test]
    fn ordering_ignores_case() {
        let snap = InventorySnapshot::from_items(vec![
            item("1", "cherry", 1.0),
            item("2", "Banana", 1.0),
            item("3", "apple", 1.0),
        ]);
        assert_eq!(snap.names(), vec!["apple", "Banana", "cherry"]);
    }

    #[test]
    fn lowercase_sorts_before_uppercase_on_case_ties() {
        let snap = InventorySnapshot::from_items(vec![
            item("1", "Apple", 1.0),
            item("2", "apple", 1.0),
            item("3", "APPLE", 1.0),
        ]);
        assert_eq!(snap.names(), vec!["apple", "Apple", "APPLE"]);
    }

    #[test]
    fn empty_snapshot_totals_zero() {
        let snap = InventorySnapshot::default();
        assert!(snap.is_empty());
        assert_eq!(snap.total(), 0.0);
        assert!(snap.filter("").is_empty());
    }

    #[test]
    fn total_includes_fractional_quantities() {
        let snap = InventorySnapshot::from_items(vec![item("1", "milk", 1.5), item("2", "rice", 2.25)]);
        assert_eq!(snap.total(), 3.75);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let snap = InventorySnapshot::from_items(vec![
            item("1", "Brown Rice", 1.0),
            item("2", "rice flour", 1.0),
            item("3", "beans", 1.0),
        ]);
        let names: Vec<_> = snap.filter("RICE").into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Brown Rice", "rice flour"]);
        assert_eq!(snap.filter("").len(), 3);
        assert!(snap.filter("pasta").is_empty());
    }

    #[test]
    fn find_by_name_trims_and_ignores_case() {
        let snap = InventorySnapshot::from_items(vec![item("1", "Rice", 2.0)]);
        assert_eq!(snap.find_by_name("  rice ").unwrap().id, ItemId::from_raw("1"));
        assert!(snap.find_by_name("ric").is_none());
    }

    fn arb_items() -> impl Strategy<Value = Vec<Item>> {
        prop::collection::vec(("[A-Za-z ]{1,12}", -1000.0f64..1000.0), 0..30).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, q))| item(&i.to_string(), &name, q))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn snapshot_is_sorted_after_any_notification(items in arb_items()) {
            let snap = InventorySnapshot::from_items(items);
            for pair in snap.items().windows(2) {
                prop_assert_ne!(compare_names(&pair[0].name, &pair[1].name), Ordering::Greater);
            }
        }

        #[test]
        fn total_equals_sum_of_quantities(items in arb_items()) {
            let expected: f64 = {
                let mut sorted = items.clone();
                sorted.sort_by(|a, b| compare_names(&a.name, &b.name));
                sorted.iter().map(|i| i.quantity).sum()
            };
            let snap = InventorySnapshot::from_items(items);
            prop_assert_eq!(snap.total(), expected);
        }

        #[test]
        fn filter_yields_matching_subsequence(items in arb_items(), search in "[A-Za-z]{0,3}") {
            let snap = InventorySnapshot::from_items(items);
            let filtered = snap.filter(&search);
            let expected: Vec<Item> = snap
                .items()
                .iter()
                .filter(|i| i.name.to_lowercase().contains(&search.to_lowercase()))
                .cloned()
                .collect();
            prop_assert_eq!(filtered, expected);
        }
    }
}
