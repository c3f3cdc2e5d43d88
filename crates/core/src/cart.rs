//! Shopping cart state and its reducer.
//!
//! [`CartState`] is a plain value. Every change goes through
//! [`CartState::apply`], which fully applies one [`CartAction`] before the
//! caller can observe the result. Persistence and change notification live in
//! the client crate's cart store.
//!
//! Invariants:
//! - at most one line per product id;
//! - quantities never drop below 1 through `Add`; removing a line is always
//!   an explicit `Remove`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{ProductId, line_total, sum_amounts};

/// The product data a cart line needs for display and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio_venta")]
    pub unit_price: Decimal,
    #[serde(rename = "imagen_url", default)]
    pub image_url: Option<String>,
    #[serde(rename = "stock_actual", default)]
    pub available_stock: u32,
}

impl From<&Product> for ProductRef {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            unit_price: product.sale_price,
            image_url: product.image_url.clone(),
            available_stock: product.stock,
        }
    }
}

/// One product and its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(rename = "producto")]
    pub product: ProductRef,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

impl CartLineItem {
    /// `unit_price × quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        line_total(self.product.unit_price, self.quantity)
    }

    /// Whether one more unit fits in the available stock.
    #[must_use]
    pub const fn can_increment(&self) -> bool {
        self.quantity < self.product.available_stock
    }

    /// Whether the quantity can go down without reaching zero.
    #[must_use]
    pub const fn can_decrement(&self) -> bool {
        self.quantity > 1
    }
}

/// A state transition of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Change the quantity of `product` by `delta`, inserting a line if needed.
    Add { product: ProductRef, delta: i32 },
    /// Drop the line for a product.
    Remove { product_id: ProductId },
    /// Empty the cart.
    Clear,
}

/// The ordered line items of a cart (insertion order).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartLineItem>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Apply one action.
    ///
    /// `Add` on an existing line adds `delta` to its quantity, clamped to a
    /// floor of 1. `Add` for a product without a line inserts one only when
    /// `delta` is positive. No stock ceiling is enforced here.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add { product, delta } => self.add(product, delta),
            CartAction::Remove { product_id } => self.items.retain(|i| i.product.id != product_id),
            CartAction::Clear => self.items.clear(),
        }
    }

    fn add(&mut self, product: ProductRef, delta: i32) {
        if let Some(line) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            let next = i64::from(line.quantity) + i64::from(delta);
            line.quantity = u32::try_from(next.max(1)).unwrap_or(u32::MAX);
            return;
        }

        if let Ok(quantity) = u32::try_from(delta)
            && quantity > 0
        {
            self.items.push(CartLineItem { product, quantity });
        }
    }

    /// Sum of `unit_price × quantity` over all lines, computed on each call.
    #[must_use]
    pub fn total(&self) -> Decimal {
        sum_amounts(self.items.iter().map(CartLineItem::subtotal))
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// The line for a product, if any.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.product.id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Restore the invariants on data read back from storage.
    ///
    /// Duplicate product lines are merged into the first occurrence and
    /// zero-quantity lines are dropped.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut items: Vec<CartLineItem> = Vec::with_capacity(self.items.len());
        for line in self.items {
            if line.quantity == 0 {
                continue;
            }
            match items.iter_mut().find(|i| i.product.id == line.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => items.push(line),
            }
        }
        Self { items }
    }
}
