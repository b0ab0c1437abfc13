use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::money::{Money, Pricing, MAX_PRICE_CENTS};

/// Largest subtotal a cart may reach: 10,000,000,000.00.
pub const MAX_ORDER_CENTS: u64 = 1_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Cart is empty")]
    EmptyCart,
}

impl CartError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CartError::InvalidArgument {
            message: message.into(),
        }
    }
}

/// One distinct menu item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: Uuid,
    pub name: String,
    /// Price recorded when the item was first added.
    pub unit_price: Money,
    pub quantity: u32,
}

impl LineItem {
    fn new(name: String, unit_price: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            unit_price,
            quantity: 1,
        }
    }

    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub grand_total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLine {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Read-only view of the cart handed to renderers after every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub item_count: u32,
    pub lines: Vec<SnapshotLine>,
    pub subtotal: Money,
    pub tax: Money,
    pub grand_total: Money,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn totals(&self) -> Totals {
        Totals {
            subtotal: self.subtotal,
            tax: self.tax,
            grand_total: self.grand_total,
        }
    }
}

/// Acknowledgment of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub order: CartSnapshot,
}

// request dto
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AddItemRequest {
    #[validate(length(min = 1, max = 100, message = "Item name must be 1-100 characters"))]
    #[validate(custom = "validate_item_name")]
    pub name: String,

    #[validate(length(min = 1, max = 32, message = "Price must be 1-32 characters"))]
    pub price_text: String,
}

impl AddItemRequest {
    pub fn new(name: &str, price_text: &str) -> Self {
        Self {
            name: name.to_string(),
            price_text: price_text.to_string(),
        }
    }
}

fn validate_item_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("Item name is required"));
    }
    Ok(())
}

/// The visitor's order. Counts and totals are always derived from `items`.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
    pricing: Pricing,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pricing(pricing: Pricing) -> Self {
        Self {
            items: Vec::new(),
            pricing,
        }
    }

    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: &Uuid) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Add one unit of `name`.
    ///
    /// A name already in the cart keeps its first recorded price and only has
    /// its quantity bumped; a new name is appended with quantity 1.
    /// The name is matched exactly. Prices above `MAX_PRICE_CENTS` and adds
    /// that would push the subtotal past `MAX_ORDER_CENTS` are rejected.
    pub fn add_item(&mut self, name: &str, unit_price: Money) -> Result<CartSnapshot, CartError> {
        if name.trim().is_empty() {
            return Err(CartError::invalid("item name must not be empty"));
        }

        let existing = self.items.iter().position(|item| item.name == name);
        let added = match existing {
            Some(index) => self.items[index].unit_price,
            None => unit_price,
        };

        if added.cents() > MAX_PRICE_CENTS {
            return Err(CartError::invalid(format!(
                "price {} exceeds the maximum of {}",
                added,
                Money::from_cents(MAX_PRICE_CENTS)
            )));
        }

        self.subtotal()
            .cents()
            .checked_add(added.cents())
            .filter(|cents| *cents <= MAX_ORDER_CENTS)
            .ok_or_else(|| CartError::invalid("order total exceeds the maximum order size"))?;

        match existing {
            Some(index) => {
                let line = &mut self.items[index];
                line.quantity = line
                    .quantity
                    .checked_add(1)
                    .ok_or_else(|| CartError::invalid(format!("too many of '{}' in the order", name)))?;
            }
            None => self.items.push(LineItem::new(name.to_string(), unit_price)),
        }

        Ok(self.snapshot())
    }

    /// Remove the whole line with this id. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &Uuid) -> CartSnapshot {
        self.items.retain(|item| item.id != *id);
        self.snapshot()
    }

    pub fn compute_totals(&self) -> Totals {
        let subtotal = self.subtotal();
        let tax = self.pricing.tax_on(subtotal);
        Totals {
            subtotal,
            tax,
            grand_total: subtotal + tax,
        }
    }

    /// Place the order and reset the cart.
    pub fn checkout(&mut self) -> Result<CheckoutReceipt, CartError> {
        if self.items.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let order = self.snapshot();
        self.items.clear();

        Ok(CheckoutReceipt {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            order,
        })
    }

    pub fn snapshot(&self) -> CartSnapshot {
        let totals = self.compute_totals();
        CartSnapshot {
            item_count: self.item_count(),
            lines: self
                .items
                .iter()
                .map(|item| SnapshotLine {
                    id: item.id,
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    line_total: item.line_total(),
                })
                .collect(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            grand_total: totals.grand_total,
        }
    }
}
