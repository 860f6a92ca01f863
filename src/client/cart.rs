use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Rabbit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub rabbit_id: i32,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Shopping cart; one line per listing, in the order first added
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` of a listing, merging with an existing line.
    /// The line keeps the price it was first added at.
    pub fn add(&mut self, rabbit: &Rabbit, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.lines.iter_mut().find(|l| l.rabbit_id == rabbit.rabbit_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                rabbit_id: rabbit.rabbit_id,
                name: rabbit.name.clone(),
                unit_price: rabbit.price,
                quantity,
            }),
        }
    }

    /// Set the quantity of a line; zero removes it. `false` if absent.
    pub fn set_quantity(&mut self, rabbit_id: i32, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(rabbit_id);
        }
        match self.lines.iter_mut().find(|l| l.rabbit_id == rabbit_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, rabbit_id: i32) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.rabbit_id != rabbit_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}
