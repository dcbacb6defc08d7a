use crate::core::codec::{self, OnMalformed};
use crate::domain::model::{Availability, BatchOutcome, Item, InventoryStats};
use crate::domain::ports::Storage;
use crate::utils::error::{InventoryError, Result};

/// Ordered, owned collection of items.
///
/// Insertion order is kept until one of the sort operations runs. Names may
/// repeat; single-item lookups (`update_item`, `restock_item`, `search_item`,
/// `check_item_availability`) act on the first match while `remove_item`
/// removes every match.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Vec<Item>,
    on_malformed: OnMalformed,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how `load_from_file` and `import_from_csv` treat undecodable lines.
    pub fn with_on_malformed(mut self, on_malformed: OnMalformed) -> Self {
        self.on_malformed = on_malformed;
        self
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add_item(&mut self, item: Item) {
        tracing::debug!("Adding item \"{}\"", item.name);
        self.items.push(item);
    }

    /// Removes every item called `name` and returns how many went.
    pub fn remove_item(&mut self, name: &str) -> Result<usize> {
        let before = self.items.len();
        self.items.retain(|item| item.name != name);
        let removed = before - self.items.len();

        if removed == 0 {
            return Err(InventoryError::not_found(name));
        }
        tracing::debug!("Removed {} item(s) named \"{}\"", removed, name);
        Ok(removed)
    }

    pub fn update_item(&mut self, name: &str, quantity: i64, price: f64) -> Result<&Item> {
        let item = self.first_match_mut(name)?;
        item.quantity = quantity;
        item.price = price;
        tracing::debug!("Updated \"{}\": quantity={}, price={}", name, quantity, price);
        Ok(&*item)
    }

    /// Adds `additional_quantity` (possibly negative) to the first match.
    pub fn restock_item(&mut self, name: &str, additional_quantity: i64) -> Result<&Item> {
        let item = self.first_match_mut(name)?;
        item.quantity = item
            .quantity
            .checked_add(additional_quantity)
            .ok_or_else(|| {
                InventoryError::invalid_input(
                    "quantity",
                    additional_quantity.to_string(),
                    format!("restocking \"{}\" would overflow its quantity", name),
                )
            })?;
        tracing::debug!("Restocked \"{}\" by {} units", name, additional_quantity);
        Ok(&*item)
    }

    pub fn search_item(&self, name: &str) -> Result<&Item> {
        self.items
            .iter()
            .find(|item| item.name == name)
            .ok_or_else(|| InventoryError::not_found(name))
    }

    pub fn check_item_availability(&self, name: &str) -> Result<Availability> {
        self.search_item(name).map(Item::availability)
    }

    /// Stable sort by name, byte-wise and case-sensitive.
    pub fn sort_items(&mut self) {
        self.items.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!("Sorted {} items by name", self.items.len());
    }

    /// Stable sort by ascending price.
    pub fn sort_items_by_price(&mut self) {
        self.items.sort_by(|a, b| a.price.total_cmp(&b.price));
        tracing::debug!("Sorted {} items by price", self.items.len());
    }

    pub fn statistics(&self) -> InventoryStats {
        InventoryStats {
            item_count: self.items.len(),
            total_value: self.items.iter().map(Item::value).sum(),
        }
    }

    /// Highest price; on ties the earliest item wins.
    pub fn most_expensive_item(&self) -> Result<&Item> {
        self.items
            .iter()
            .reduce(|best, item| if item.price > best.price { item } else { best })
            .ok_or(InventoryError::EmptyCollection)
    }

    /// Lowest price; on ties the earliest item wins.
    pub fn least_expensive_item(&self) -> Result<&Item> {
        self.items
            .iter()
            .reduce(|best, item| if item.price < best.price { item } else { best })
            .ok_or(InventoryError::EmptyCollection)
    }

    pub fn list_items_below_threshold(&self, threshold: i64) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.quantity < threshold)
            .collect()
    }

    /// Items with `min_price <= price <= max_price`. An inverted range is empty.
    pub fn filter_items_by_price_range(&self, min_price: f64, max_price: f64) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.price >= min_price && item.price <= max_price)
            .collect()
    }

    /// Appends up to `count` items pulled from `descriptions`.
    ///
    /// Stops at the first bad or missing description. Whatever was added
    /// before that stays in the inventory.
    pub fn batch_add_items<I>(&mut self, count: usize, descriptions: I) -> BatchOutcome
    where
        I: IntoIterator<Item = Result<Item>>,
    {
        let mut descriptions = descriptions.into_iter();
        let mut added = 0;

        while added < count {
            match descriptions.next() {
                Some(Ok(item)) => {
                    self.add_item(item);
                    added += 1;
                }
                Some(Err(e)) => {
                    tracing::warn!("Batch add stopped after {} of {} items: {}", added, count, e);
                    return BatchOutcome {
                        requested: count,
                        added,
                        failure: Some(e),
                    };
                }
                None => {
                    let e = InventoryError::invalid_input(
                        "batch",
                        added.to_string(),
                        format!("input ended after {} of {} items", added, count),
                    );
                    tracing::warn!("{}", e);
                    return BatchOutcome {
                        requested: count,
                        added,
                        failure: Some(e),
                    };
                }
            }
        }

        BatchOutcome {
            requested: count,
            added,
            failure: None,
        }
    }

    /// Writes every item to `path`, replacing the file. Returns the item count.
    pub fn save_to_file<S: Storage>(&self, storage: &S, path: &str) -> Result<usize> {
        self.write_items(storage, path)?;
        tracing::info!("Inventory saved to {} ({} items)", path, self.items.len());
        Ok(self.items.len())
    }

    /// Replaces the whole inventory with the contents of `path`.
    ///
    /// The file is decoded before anything is cleared, so a failed load leaves
    /// the current items in place.
    pub fn load_from_file<S: Storage>(&mut self, storage: &S, path: &str) -> Result<usize> {
        let loaded = self.read_items(storage, path)?;
        let count = loaded.len();
        self.items = loaded;
        tracing::info!("Inventory loaded from {} ({} items)", path, count);
        Ok(count)
    }

    /// Same format and semantics as `save_to_file`.
    pub fn export_to_csv<S: Storage>(&self, storage: &S, path: &str) -> Result<usize> {
        self.write_items(storage, path)?;
        tracing::info!("Inventory exported to {} ({} items)", path, self.items.len());
        Ok(self.items.len())
    }

    /// Appends the contents of `path` after the current items, without clearing.
    pub fn import_from_csv<S: Storage>(&mut self, storage: &S, path: &str) -> Result<usize> {
        let imported = self.read_items(storage, path)?;
        let count = imported.len();
        self.items.extend(imported);
        tracing::info!("Inventory imported from {} ({} items)", path, count);
        Ok(count)
    }

    fn write_items<S: Storage>(&self, storage: &S, path: &str) -> Result<()> {
        let data = codec::encode(&self.items)?;
        storage.write_file(path, &data)
    }

    fn read_items<S: Storage>(&self, storage: &S, path: &str) -> Result<Vec<Item>> {
        let data = storage.read_file(path)?;
        codec::decode(&data, self.on_malformed)
    }

    fn first_match_mut(&mut self, name: &str) -> Result<&mut Item> {
        self.items
            .iter_mut()
            .find(|item| item.name == name)
            .ok_or_else(|| InventoryError::not_found(name))
    }
}

impl FromIterator<Item> for Inventory {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
            on_malformed: OnMalformed::default(),
        }
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.borrow().get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                InventoryError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    fn names(items: &[&Item]) -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    }

    fn sample() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add_item(Item::new("Widget", 10, 2.50));
        inventory.add_item(Item::new("Gadget", 3, 9.99));
        inventory
    }

    #[test]
    fn test_add_appends_without_dedup() {
        let mut inventory = sample();
        inventory.add_item(Item::new("Widget", 1, 1.0));
        assert_eq!(inventory.len(), 3);
        assert_eq!(inventory.items()[2], Item::new("Widget", 1, 1.0));
    }

    #[test]
    fn test_remove_removes_all_matches() {
        let mut inventory = sample();
        inventory.add_item(Item::new("Widget", 1, 1.0));
        assert_eq!(inventory.remove_item("Widget").unwrap(), 2);
        assert_eq!(inventory.len(), 1);
        assert!(matches!(
            inventory.remove_item("Widget"),
            Err(InventoryError::NotFound { .. })
        ));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_update_touches_first_match_only() {
        let mut inventory = sample();
        inventory.add_item(Item::new("Widget", 1, 1.0));
        let updated = inventory.update_item("Widget", -5, 0.0).unwrap().clone();
        assert_eq!(updated, Item::new("Widget", -5, 0.0));
        assert_eq!(inventory.items()[2], Item::new("Widget", 1, 1.0));
        assert!(inventory.update_item("Missing", 1, 1.0).is_err());
    }

    #[test]
    fn test_restock_adds_possibly_negative_amount() {
        let mut inventory = sample();
        assert_eq!(inventory.restock_item("Gadget", 7).unwrap().quantity, 10);
        assert_eq!(inventory.restock_item("Gadget", -12).unwrap().quantity, -2);
        assert!(matches!(
            inventory.restock_item("Missing", 1),
            Err(InventoryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_restock_overflow_leaves_item_unchanged() {
        let mut inventory = Inventory::new();
        inventory.add_item(Item::new("Bolt", i64::MAX, 0.1));
        assert!(matches!(
            inventory.restock_item("Bolt", 1),
            Err(InventoryError::InvalidInput { .. })
        ));
        assert_eq!(inventory.search_item("Bolt").unwrap().quantity, i64::MAX);
    }

    #[test]
    fn test_availability() {
        let mut inventory = sample();
        inventory.add_item(Item::new("Gizmo", 0, 4.0));
        assert_eq!(
            inventory.check_item_availability("Gadget").unwrap(),
            Availability::InStock { quantity: 3 }
        );
        assert_eq!(
            inventory.check_item_availability("Gizmo").unwrap(),
            Availability::OutOfStock
        );
        assert!(inventory.check_item_availability("Missing").is_err());
    }

    #[test]
    fn test_sort_by_name_is_case_sensitive() {
        let mut inventory: Inventory = vec![
            Item::new("banana", 1, 1.0),
            Item::new("Cherry", 1, 1.0),
            Item::new("apple", 1, 1.0),
        ]
        .into_iter()
        .collect();
        inventory.sort_items();
        let sorted: Vec<&str> = inventory.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(sorted, vec!["Cherry", "apple", "banana"]);
    }

    #[test]
    fn test_sort_by_price_is_stable() {
        let mut inventory: Inventory = vec![
            Item::new("b", 1, 2.0),
            Item::new("a", 1, 1.0),
            Item::new("c", 1, 2.0),
        ]
        .into_iter()
        .collect();
        inventory.sort_items_by_price();
        let sorted: Vec<&str> = inventory.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(sorted, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_statistics_scenario() {
        let stats = sample().statistics();
        assert_eq!(stats.item_count, 2);
        assert!((stats.total_value - 54.97).abs() < 1e-9);
    }

    #[test]
    fn test_most_and_least_expensive_prefer_first_on_ties() {
        let inventory: Inventory = vec![
            Item::new("first-cheap", 1, 1.0),
            Item::new("first-dear", 1, 5.0),
            Item::new("second-dear", 1, 5.0),
            Item::new("second-cheap", 1, 1.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(inventory.most_expensive_item().unwrap().name, "first-dear");
        assert_eq!(inventory.least_expensive_item().unwrap().name, "first-cheap");
    }

    #[test]
    fn test_extremes_on_empty_inventory() {
        let inventory = Inventory::new();
        assert!(matches!(
            inventory.most_expensive_item(),
            Err(InventoryError::EmptyCollection)
        ));
        assert!(matches!(
            inventory.least_expensive_item(),
            Err(InventoryError::EmptyCollection)
        ));
    }

    #[test]
    fn test_threshold_and_price_range() {
        let inventory = sample();
        assert_eq!(names(&inventory.list_items_below_threshold(5)), vec!["Gadget"]);
        assert!(inventory.list_items_below_threshold(3).is_empty());
        assert_eq!(
            names(&inventory.filter_items_by_price_range(2.5, 9.99)),
            vec!["Widget", "Gadget"]
        );
        assert!(inventory.filter_items_by_price_range(10.0, 1.0).is_empty());
    }

    #[test]
    fn test_batch_add_is_partial_on_failure() {
        let mut inventory = Inventory::new();
        let descriptions = vec![
            Ok(Item::new("a", 1, 1.0)),
            Ok(Item::new("b", 2, 2.0)),
            Err(InventoryError::invalid_input("quantity", "x", "not a number")),
            Ok(Item::new("c", 3, 3.0)),
        ];
        let outcome = inventory.batch_add_items(4, descriptions);
        assert_eq!(outcome.added, 2);
        assert!(!outcome.is_complete());
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_batch_add_stops_at_count_and_reports_short_input() {
        let mut inventory = Inventory::new();
        let outcome = inventory.batch_add_items(
            1,
            vec![Ok(Item::new("a", 1, 1.0)), Ok(Item::new("b", 1, 1.0))],
        );
        assert!(outcome.is_complete());
        assert_eq!(inventory.len(), 1);

        let outcome = inventory.batch_add_items(3, vec![Ok(Item::new("c", 1, 1.0))]);
        assert_eq!(outcome.added, 1);
        assert!(outcome.failure.is_some());
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_save_and_export_write_same_bytes() {
        let storage = MockStorage::default();
        let inventory = sample();

        assert_eq!(inventory.save_to_file(&storage, "a.txt").unwrap(), 2);
        assert_eq!(inventory.export_to_csv(&storage, "b.csv").unwrap(), 2);

        let saved = storage.get_file("a.txt").unwrap();
        assert_eq!(saved, b"Widget,10,2.5\nGadget,3,9.99\n".to_vec());
        assert_eq!(storage.get_file("b.csv").unwrap(), saved);
    }

    #[test]
    fn test_load_replaces_and_import_appends() {
        let storage = MockStorage::default();
        storage.write_file("more.csv", b"Gizmo,1,0.5\n").unwrap();

        let mut inventory = sample();
        assert_eq!(inventory.import_from_csv(&storage, "more.csv").unwrap(), 1);
        assert_eq!(inventory.len(), 3);

        assert_eq!(inventory.load_from_file(&storage, "more.csv").unwrap(), 1);
        assert_eq!(inventory.items(), &[Item::new("Gizmo", 1, 0.5)]);
    }

    #[test]
    fn test_missing_file_leaves_inventory_alone() {
        let storage = MockStorage::default();
        let mut inventory = sample();
        assert!(matches!(
            inventory.load_from_file(&storage, "missing.txt"),
            Err(InventoryError::IoError(_))
        ));
        assert_eq!(inventory.len(), 2);
    }
}
