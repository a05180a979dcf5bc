//! Shopping cart behind the navigation bar badge.

use crate::catalog::Item;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl CartLine {
    pub fn total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `item`, merging with an existing line.
    pub fn add(&mut self, item: &Item, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.lines.iter_mut().find(|line| line.item_id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                item_id: item.id.clone(),
                name: item.name.clone(),
                unit_price: item.price,
                quantity,
            }),
        }
    }

    /// Set a line's quantity; zero removes the line. Returns whether the
    /// item was in the cart.
    pub fn set_quantity(&mut self, item_id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(item_id);
        }
        match self.lines.iter_mut().find(|line| line.item_id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, item_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.item_id != item_id);
        self.lines.len() != before
    }

    /// Number shown on the badge: total units, not distinct lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::total).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
