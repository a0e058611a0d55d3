//! Cart store.
//!
//! The cart is an insertion-ordered list of entries, at most one per
//! product id, each with a quantity of at least one. Every effective
//! mutation is persisted synchronously under [`keys::CART`] and then
//! announced to subscribers.
//!
//! Lookup misses are silent no-ops. A failed write is logged and the
//! in-memory cart keeps the mutation.

use std::fmt;
use std::rc::Rc;

use bazaar_core::{CartAction, Direction, Price, Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::storage::{self, KeyValueStore, StorageError, keys};

/// A product snapshot plus quantity.
///
/// Fields are copied from the catalog when the product is first added and
/// are never refreshed, so entries survive catalog changes unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: String,
    #[serde(alias = "img")]
    pub image: String,
    pub qty: u32,
}

impl CartEntry {
    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            image: product.image.clone(),
            qty: 1,
        }
    }

    /// Price × quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.qty)
    }
}

/// What a mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    Added(ProductId),
    Increased(ProductId),
    Decreased(ProductId),
    Removed(ProductId),
    Cleared,
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartChange, &[CartEntry])>;

/// The shopping cart.
pub struct CartStore {
    catalog: Rc<Catalog>,
    storage: Rc<dyn KeyValueStore>,
    entries: Vec<CartEntry>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("entries", &self.entries)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Load the cart persisted in `storage`.
    ///
    /// Missing or malformed data yields an empty cart. Entries are not
    /// checked against `catalog`; stale products are kept as stored.
    #[must_use]
    pub fn load(catalog: Rc<Catalog>, storage: Rc<dyn KeyValueStore>) -> Self {
        let stored: Vec<CartEntry> =
            storage::load_json(storage.as_ref(), keys::CART).unwrap_or_default();
        let entries = normalize(stored);

        tracing::debug!(entries = entries.len(), "Cart loaded");

        Self {
            catalog,
            storage,
            entries,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of quantities, as shown on the cart badge.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.qty)).sum()
    }

    /// Sum of price × quantity over all entries.
    #[must_use]
    pub fn total(&self) -> Price {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Add one unit of a catalog product.
    ///
    /// Ids missing from the catalog are ignored. Returns whether the cart
    /// changed.
    pub fn add(&mut self, id: ProductId) -> bool {
        let Some(product) = self.catalog.find(id) else {
            tracing::debug!(%id, "Add ignored: product not in catalog");
            return false;
        };

        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.qty = entry.qty.saturating_add(1);
        } else {
            self.entries.push(CartEntry::from_product(product));
        }

        self.commit(CartChange::Added(id));
        true
    }

    /// Change an entry's quantity by one. Decreasing the last unit removes
    /// the entry.
    ///
    /// Returns whether the cart changed.
    pub fn adjust(&mut self, id: ProductId, direction: Direction) -> bool {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            tracing::debug!(%id, ?direction, "Adjust ignored: not in cart");
            return false;
        };
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };

        let change = match direction {
            Direction::Increase => {
                entry.qty = entry.qty.saturating_add(1);
                CartChange::Increased(id)
            }
            Direction::Decrease if entry.qty > 1 => {
                entry.qty -= 1;
                CartChange::Decreased(id)
            }
            Direction::Decrease => {
                self.entries.remove(index);
                CartChange::Removed(id)
            }
        };

        self.commit(change);
        true
    }

    /// Delete an entry regardless of quantity.
    ///
    /// Returns whether the cart changed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            tracing::debug!(%id, "Remove ignored: not in cart");
            return false;
        }

        self.commit(CartChange::Removed(id));
        true
    }

    /// Apply a line-control action.
    pub fn apply(&mut self, id: ProductId, action: CartAction) -> bool {
        match action {
            CartAction::Adjust(direction) => self.adjust(id, direction),
            CartAction::Remove => self.remove(id),
        }
    }

    /// Empty the cart. Returns whether it held anything.
    pub fn clear(&mut self) -> bool {
        if self.entries.is_empty() {
            return false;
        }

        self.entries.clear();
        self.commit(CartChange::Cleared);
        true
    }

    /// Write the current entries to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn save(&self) -> Result<(), StorageError> {
        storage::save_json(self.storage.as_ref(), keys::CART, &self.entries)
    }

    /// Register a listener called after every effective mutation.
    ///
    /// Listeners see the entries read-only and cannot reach back into the
    /// store.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartChange, &[CartEntry]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < before
    }

    fn commit(&mut self, change: CartChange) {
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, ?change, "Failed to persist cart");
        }

        for (_, listener) in &mut self.listeners {
            listener(&change, &self.entries);
        }
    }
}

/// Drop zero-quantity entries and merge repeated ids into the first
/// occurrence, summing quantities.
fn normalize(stored: Vec<CartEntry>) -> Vec<CartEntry> {
    let total = stored.len();
    let mut zero = 0_usize;
    let mut merged = 0_usize;
    let mut entries: Vec<CartEntry> = Vec::with_capacity(total);

    for entry in stored {
        if entry.qty == 0 {
            zero += 1;
        } else if let Some(first) = entries.iter_mut().find(|e| e.id == entry.id) {
            first.qty = first.qty.saturating_add(entry.qty);
            merged += 1;
        } else {
            entries.push(entry);
        }
    }

    if zero > 0 {
        tracing::warn!(dropped = zero, "Dropped stored cart entries with zero quantity");
    }
    if merged > 0 {
        tracing::warn!(merged, "Merged stored cart entries with repeated product ids");
    }

    entries
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::storage::{MemoryStore, ReadOnlyStore};

    const HEADPHONES: ProductId = ProductId::new(1);
    const WALLET: ProductId = ProductId::new(3);

    fn store_with(storage: &Rc<MemoryStore>) -> CartStore {
        CartStore::load(Rc::new(Catalog::builtin()), storage.clone())
    }

    fn fresh() -> CartStore {
        store_with(&Rc::new(MemoryStore::new()))
    }

    #[test]
    fn test_add_twice_yields_single_entry() {
        let mut cart = fresh();
        assert!(cart.add(HEADPHONES));
        assert!(cart.add(HEADPHONES));
        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.get(HEADPHONES).unwrap().qty, 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_add_unknown_product_is_noop() {
        let mut cart = fresh();
        assert!(!cart.add(ProductId::new(42)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut cart = fresh();
        cart.add(WALLET);
        cart.add(HEADPHONES);
        cart.add(WALLET);
        let ids: Vec<ProductId> = cart.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, [WALLET, HEADPHONES]);
    }

    #[test]
    fn test_decrease_last_unit_removes_entry() {
        let mut cart = fresh();
        cart.add(HEADPHONES);
        cart.add(WALLET);
        assert!(cart.adjust(HEADPHONES, Direction::Decrease));
        assert!(cart.get(HEADPHONES).is_none());
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_increase_then_decrease() {
        let mut cart = fresh();
        cart.add(WALLET);
        cart.adjust(WALLET, Direction::Increase);
        cart.adjust(WALLET, Direction::Increase);
        cart.adjust(WALLET, Direction::Decrease);
        assert_eq!(cart.get(WALLET).unwrap().qty, 2);
    }

    #[test]
    fn test_adjust_missing_entry_is_noop() {
        let mut cart = fresh();
        assert!(!cart.adjust(WALLET, Direction::Increase));
        assert!(!cart.apply(WALLET, CartAction::Remove));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_ignores_quantity() {
        let mut cart = fresh();
        cart.add(WALLET);
        cart.add(WALLET);
        assert!(cart.apply(WALLET, CartAction::Remove));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total() {
        let mut cart = fresh();
        cart.add(HEADPHONES);
        cart.add(HEADPHONES);
        cart.add(WALLET);
        assert_eq!(cart.total(), Price::new(5699));
    }

    #[test]
    fn test_clear_on_empty_reports_no_change() {
        let mut cart = fresh();
        assert!(!cart.clear());
        cart.add(WALLET);
        assert!(cart.clear());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let storage = Rc::new(MemoryStore::new());
        let mut cart = store_with(&storage);
        cart.add(HEADPHONES);
        cart.add(HEADPHONES);
        cart.add(WALLET);

        let raw = storage.get(keys::CART).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], 1);
        assert_eq!(value[0]["qty"], 2);
        assert_eq!(value[1]["name"], "Leather Wallet");
        assert!(value[1]["image"].as_str().unwrap().starts_with("https://"));

        cart.clear();
        assert_eq!(storage.get(keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_reload_round_trip() {
        let storage = Rc::new(MemoryStore::new());
        let mut cart = store_with(&storage);
        cart.add(HEADPHONES);
        cart.add(WALLET);
        cart.add(WALLET);

        let reloaded = store_with(&storage);
        assert_eq!(reloaded.entries(), cart.entries());
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        let storage = Rc::new(MemoryStore::with_entries([(keys::CART, "{oops")]));
        assert!(store_with(&storage).is_empty());

        let storage = Rc::new(MemoryStore::with_entries([(keys::CART, r#"{"id":1}"#)]));
        assert!(store_with(&storage).is_empty());
    }

    #[test]
    fn test_stale_entries_are_kept_verbatim() {
        let raw = r#"[{"id":77,"name":"Discontinued Hat","price":500,"category":"Hats","img":"https://example.com/hat.jpg","qty":3}]"#;
        let storage = Rc::new(MemoryStore::with_entries([(keys::CART, raw)]));
        let mut cart = store_with(&storage);

        let entry = cart.get(ProductId::new(77)).unwrap();
        assert_eq!(entry.name, "Discontinued Hat");
        assert_eq!(cart.total(), Price::new(1500));

        // Adjusting works; adding does not, since the catalog lacks it.
        assert!(cart.adjust(ProductId::new(77), Direction::Increase));
        assert!(!cart.add(ProductId::new(77)));
        assert_eq!(cart.count(), 4);
    }

    #[test]
    fn test_zero_quantity_entries_dropped_on_load() {
        let raw = r#"[{"id":1,"name":"A","price":1,"category":"X","image":"https://example.com/a","qty":0},
                      {"id":2,"name":"B","price":2,"category":"X","image":"https://example.com/b","qty":1}]"#;
        let storage = Rc::new(MemoryStore::with_entries([(keys::CART, raw)]));
        let cart = store_with(&storage);
        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_repeated_ids_merged_on_load() {
        let raw = r#"[{"id":1,"name":"A","price":10,"category":"X","image":"https://example.com/a","qty":1},
                      {"id":3,"name":"C","price":5,"category":"X","image":"https://example.com/c","qty":1},
                      {"id":1,"name":"A","price":10,"category":"X","image":"https://example.com/a","qty":2}]"#;
        let storage = Rc::new(MemoryStore::with_entries([(keys::CART, raw)]));
        let mut cart = store_with(&storage);

        let ids: Vec<ProductId> = cart.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, [HEADPHONES, WALLET]);
        assert_eq!(cart.get(HEADPHONES).unwrap().qty, 3);

        cart.add(HEADPHONES);
        assert_eq!(cart.entries().len(), 2);
        assert_eq!(cart.get(HEADPHONES).unwrap().qty, 4);
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_failed_write_keeps_mutation_and_notifies() {
        let mut cart = CartStore::load(Rc::new(Catalog::builtin()), Rc::new(ReadOnlyStore));
        let notified = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&notified);
        cart.subscribe(move |_, _| *sink.borrow_mut() += 1);

        assert!(cart.save().is_err());
        assert!(cart.add(WALLET));
        assert!(cart.add(WALLET));
        assert_eq!(cart.get(WALLET).unwrap().qty, 2);

        assert!(cart.clear());
        assert!(cart.is_empty());
        assert_eq!(*notified.borrow(), 3);
    }

    #[test]
    fn test_subscribers_see_effective_mutations_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut cart = fresh();

        let sink = Rc::clone(&seen);
        let sub = cart.subscribe(move |change, entries| {
            sink.borrow_mut().push((*change, entries.len()));
        });

        cart.add(WALLET);
        cart.add(ProductId::new(99));
        cart.adjust(WALLET, Direction::Decrease);
        cart.clear();

        assert_eq!(
            *seen.borrow(),
            [
                (CartChange::Added(WALLET), 1),
                (CartChange::Removed(WALLET), 0)
            ]
        );

        assert!(cart.unsubscribe(sub));
        assert!(!cart.unsubscribe(sub));
        cart.add(WALLET);
        assert_eq!(seen.borrow().len(), 2);
    }
}
