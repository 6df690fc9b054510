use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// A purchasable item as published by the menu service. Read-only to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub image: String,
}

/// One entry in the cart. Name and price are captured when the item is first
/// added and are not refreshed from the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

impl CartLine {
    /// A quantity-1 line for `item`. Items whose price could not be stored and
    /// read back (negative or non-finite) are rejected.
    pub fn snapshot(item: &MenuItem) -> Result<Self, CartInvariantViolation> {
        check_price(&item.id, item.price)?;
        Ok(Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            quantity: 1,
        })
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartInvariantViolation {
    #[error("line '{id}' has quantity 0")]
    ZeroQuantity { id: String },

    #[error("line '{id}' appears more than once")]
    DuplicateId { id: String },

    #[error("line '{id}' has invalid price {price}")]
    InvalidPrice { id: String, price: f64 },
}

fn check_price(id: &str, price: f64) -> Result<(), CartInvariantViolation> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(CartInvariantViolation::InvalidPrice {
            id: id.to_string(),
            price,
        })
    }
}

/// Ordered set of cart lines, at most one per item id, every quantity >= 1.
///
/// Lines keep the order in which their item was first added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from previously stored lines, rejecting anything that
    /// breaks the cart invariants rather than repairing it.
    pub fn from_lines(lines: Vec<CartLine>) -> Result<Self, CartInvariantViolation> {
        let mut seen = HashSet::with_capacity(lines.len());
        for line in &lines {
            if line.quantity == 0 {
                return Err(CartInvariantViolation::ZeroQuantity {
                    id: line.id.clone(),
                });
            }
            check_price(&line.id, line.price)?;
            if !seen.insert(line.id.as_str()) {
                return Err(CartInvariantViolation::DuplicateId {
                    id: line.id.clone(),
                });
            }
        }
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, id: &str) -> u32 {
        self.get(id).map(|line| line.quantity).unwrap_or(0)
    }

    pub fn total_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Adds one unit of `item`, snapshotting name and price on first insert.
    /// The cart is left unchanged when `item` carries an invalid price, even if
    /// a line for its id already exists.
    pub(crate) fn increment(&mut self, item: &MenuItem) -> Result<u32, CartInvariantViolation> {
        check_price(&item.id, item.price)?;
        match self.lines.iter_mut().find(|line| line.id == item.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                Ok(line.quantity)
            }
            None => {
                self.lines.push(CartLine::snapshot(item)?);
                Ok(1)
            }
        }
    }

    /// Removes one unit of `id`. A line at quantity 1 is deleted, never zeroed.
    /// Returns the remaining quantity, or `None` when the id was not in the cart.
    pub(crate) fn decrement(&mut self, id: &str) -> Option<u32> {
        let index = self.lines.iter().position(|line| line.id == id)?;
        if self.lines[index].quantity > 1 {
            self.lines[index].quantity -= 1;
            Some(self.lines[index].quantity)
        } else {
            self.lines.remove(index);
            Some(0)
        }
    }
}

/// Snapshot of a cart handed to the payment stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub item_count: u64,
    pub total_price: f64,
}

impl CartSummary {
    pub fn of(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            item_count: cart.total_count(),
            total_price: cart.total_price(),
        }
    }

    pub fn checkout_label(&self) -> String {
        let plural = if self.item_count > 1 { "s" } else { "" };
        format!("Proceed to checkout · {} item{}", self.item_count, plural)
    }
}
