//! Cart quantity bookkeeping.

use serde::{Deserialize, Serialize};

use crate::menu::{Menu, MenuItem};

/// A cart line resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> u64 {
        self.item.price as u64 * self.quantity as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CartEntry {
    item_id: u32,
    quantity: u32,
}

/// The in-progress order: item id to quantity, in the order items were first
/// added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item_id: u32, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.entries.iter_mut().find(|e| e.item_id == item_id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => self.entries.push(CartEntry { item_id, quantity }),
        }
    }

    pub fn remove_item(&mut self, item_id: u32) {
        self.entries.retain(|e| e.item_id != item_id);
    }

    /// Set an item's quantity; zero removes the line.
    pub fn update_quantity(&mut self, item_id: u32, quantity: u32) {
        if quantity == 0 {
            self.remove_item(item_id);
            return;
        }
        match self.entries.iter_mut().find(|e| e.item_id == item_id) {
            Some(entry) => entry.quantity = quantity,
            None => self.entries.push(CartEntry { item_id, quantity }),
        }
    }

    pub fn quantity(&self, item_id: u32) -> u32 {
        self.entries
            .iter()
            .find(|e| e.item_id == item_id)
            .map_or(0, |e| e.quantity)
    }

    /// Lines with catalog details. Ids missing from the catalog are skipped.
    pub fn lines(&self, menu: &Menu) -> Vec<CartLine> {
        self.entries
            .iter()
            .filter_map(|e| {
                menu.item(e.item_id).map(|item| CartLine {
                    item: item.clone(),
                    quantity: e.quantity,
                })
            })
            .collect()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of line totals before tax.
    pub fn subtotal(&self, menu: &Menu) -> u64 {
        self.lines(menu).iter().map(CartLine::line_total).sum()
    }
}
