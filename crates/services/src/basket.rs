//! Basket API types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An item to add to, or update in, a basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    pub quantity: u32,
    /// Unit price in minor currency units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
            price: None,
        }
    }

    pub fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }
}

/// An item as stored in a basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    pub name: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
}

impl From<Item> for BasketItem {
    fn from(item: Item) -> Self {
        Self {
            name: item.name,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

/// A shopping basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    pub id: Uuid,
    #[serde(default)]
    pub items: Vec<BasketItem>,
}

impl Basket {
    /// Find an item by name.
    pub fn item(&self, name: &str) -> Option<&BasketItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Sum of `price * quantity` over priced items, in minor units.
    ///
    /// Returns `None` if the total does not fit in a `u64`.
    pub fn total(&self) -> Option<u64> {
        self.items
            .iter()
            .filter_map(|item| item.price.map(|price| (price, item.quantity)))
            .try_fold(0u64, |total, (price, quantity)| {
                price
                    .checked_mul(u64::from(quantity))
                    .and_then(|line| total.checked_add(line))
            })
    }
}
