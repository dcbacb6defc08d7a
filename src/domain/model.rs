use crate::utils::error::InventoryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One inventory line. The name acts as the lookup key, but nothing enforces
/// uniqueness; lookups act on the first match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }

    /// Gross value of the line, `price * quantity`.
    pub fn value(&self) -> f64 {
        self.price * self.quantity as f64
    }

    pub fn availability(&self) -> Availability {
        if self.quantity > 0 {
            Availability::InStock {
                quantity: self.quantity,
            }
        } else {
            Availability::OutOfStock
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Quantity: {}, Price: ${:.2}",
            self.name, self.quantity, self.price
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
    InStock { quantity: i64 },
    OutOfStock,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InventoryStats {
    pub item_count: usize,
    pub total_value: f64,
}

/// Result of a batch add. Items added before a failure stay in the inventory.
#[derive(Debug)]
pub struct BatchOutcome {
    pub requested: usize,
    pub added: usize,
    pub failure: Option<InventoryError>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none() && self.added == self.requested
    }
}
