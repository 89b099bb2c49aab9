//! Cart aggregate owned by a single storefront session

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of catalog item a cart line refers to; part of the entry key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Book,
    Ebook,
    Audiobook,
}

/// One cart line, unique by `(item_id, kind)`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    pub item_id: String,
    pub kind: ItemKind,
    pub title: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartEntry {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Shopping cart aggregate. Entries keep insertion order for display;
/// every entry holds quantity >= 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CartAggregate {
    entries: Vec<CartEntry>,
}

impl CartAggregate {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Rebuild from the persisted entry array, dropping rows that violate
    /// the quantity invariant
    pub fn from_entries(entries: Vec<CartEntry>) -> Self {
        Self {
            entries: entries.into_iter().filter(|e| e.quantity >= 1).collect(),
        }
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Add one unit of an item: increments the matching entry's quantity,
    /// or appends a new entry with quantity 1
    pub fn add_item(&mut self, item_id: &str, kind: ItemKind, title: &str, unit_price: Decimal) {
        if let Some(entry) = self.find_mut(item_id, kind) {
            entry.quantity += 1;
            return;
        }
        self.entries.push(CartEntry {
            item_id: item_id.to_string(),
            kind,
            title: title.to_string(),
            unit_price,
            quantity: 1,
        });
    }

    /// Set an entry's quantity. A quantity of zero or less removes the
    /// entry entirely; removing an absent entry is not an error.
    pub fn update_quantity(&mut self, item_id: &str, kind: ItemKind, quantity: i64) {
        if quantity <= 0 {
            self.entries.retain(|e| !(e.item_id == item_id && e.kind == kind));
            return;
        }
        if let Some(entry) = self.find_mut(item_id, kind) {
            entry.quantity = quantity as u32;
        }
    }

    /// Derived total over all entries
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    /// Empty the aggregate
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn find_mut(&mut self, item_id: &str, kind: ItemKind) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.item_id == item_id && e.kind == kind)
    }
}
