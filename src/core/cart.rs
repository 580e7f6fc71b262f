//! Cart state machine.
//!
//! A cart maps menu item ids to positive quantities for the length of one
//! checkout session. Entries are kept in the order they were first added, and
//! an entry that would drop to zero is removed instead of being stored.

use serde::{Deserialize, Serialize};

/// One entry of a cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Menu item id
    pub item_id: String,
    /// Requested quantity, always at least 1
    pub quantity: u32,
}

/// Mapping from menu item id to requested quantity.
///
/// The cart does not check ids against the catalog; that happens when items
/// are added through the service and when an order is placed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Adds one unit of `item_id`, starting a new line at 1 if needed.
    pub fn add(&mut self, item_id: &str) {
        if let Some(line) = self.lines.iter_mut().find(|line| line.item_id == item_id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                item_id: item_id.to_string(),
                quantity: 1,
            });
        }
    }

    /// Removes one unit of `item_id`; the line disappears when it reaches zero.
    /// Unknown ids are ignored.
    pub fn remove(&mut self, item_id: &str) {
        let Some(index) = self.lines.iter().position(|line| line.item_id == item_id) else {
            return;
        };
        if self.lines[index].quantity <= 1 {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity -= 1;
        }
    }

    /// Drops an entry regardless of its quantity.
    pub fn purge(&mut self, item_id: &str) {
        self.lines.retain(|line| line.item_id != item_id);
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Quantity requested for `item_id`, 0 if absent.
    #[must_use]
    pub fn quantity(&self, item_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.item_id == item_id)
            .map_or(0, |line| line.quantity)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count: u32, line| count.saturating_add(line.quantity))
    }

    /// Lines in first-added order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
