//! Sales history and counter-sale registration.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::{CustomerId, ProductId, SaleChannel, SaleId, line_total, sum_amounts};

/// Payment type sent with every counter sale.
pub const CASH_SALE: &str = "Contado";

/// Customer summary embedded in a sale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SaleCustomer {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(rename = "nombre", default)]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", default)]
    pub last_name: Option<String>,
    #[serde(rename = "correo", default)]
    pub email: Option<String>,
}

/// A line of a recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleDetail {
    /// Either the product id or an embedded product object.
    #[serde(rename = "producto", default)]
    pub product: serde_json::Value,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "precio_unitario", default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
}

/// A recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    #[serde(rename = "fecha_venta", default)]
    pub sold_at: String,
    #[serde(rename = "cliente", default)]
    pub customer: Option<SaleCustomer>,
    pub total: Decimal,
    #[serde(rename = "metodo_entrada", default)]
    pub channel: String,
    #[serde(rename = "tipo_venta", default)]
    pub payment_type: Option<String>,
    #[serde(rename = "detalles", default)]
    pub details: Vec<SaleDetail>,
}

impl Sale {
    /// Email of the customer, or `"N/A"`.
    #[must_use]
    pub fn customer_email(&self) -> &str {
        self.customer
            .as_ref()
            .and_then(|c| c.email.as_deref())
            .unwrap_or("N/A")
    }
}

/// Filters for the sales history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaleFilters {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub customer: Option<CustomerId>,
    pub channel: Option<SaleChannel>,
}

impl SaleFilters {
    /// Query parameters for the set filters; unset filters are omitted.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(from) = self.from {
            pairs.push(("fecha_min", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("fecha_max", to.format("%Y-%m-%d").to_string()));
        }
        if let Some(customer) = self.customer {
            pairs.push(("cliente", customer.to_string()));
        }
        if let Some(channel) = self.channel {
            pairs.push(("metodo_entrada", channel.as_str().to_owned()));
        }
        pairs
    }
}

/// One product line of a sale request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLineRequest {
    pub producto_id: ProductId,
    pub cantidad: u32,
}

/// Payload registering a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleRequest {
    #[serde(rename = "cliente")]
    pub customer: CustomerId,
    #[serde(rename = "metodo_entrada")]
    pub channel: SaleChannel,
    #[serde(rename = "tipo_venta")]
    pub payment_type: String,
    #[serde(rename = "detalles")]
    pub lines: Vec<SaleLineRequest>,
}

/// Why a line could not be added to a draft, or a draft not submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaleDraftError {
    #[error("quantity must be greater than zero")]
    InvalidQuantity,
    #[error("{name} is not available for sale")]
    Unavailable { name: String },
    #[error("insufficient stock for {name}: available {available}")]
    InsufficientStock { name: String, available: u32 },
    #[error(
        "insufficient stock: {in_draft} of {name} already in the sale, available {available}"
    )]
    InsufficientStockForTotal {
        name: String,
        in_draft: u32,
        available: u32,
    },
    #[error("a customer must be selected")]
    MissingCustomer,
    #[error("the sale has no products")]
    Empty,
}

/// A line of a sale being assembled at the counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl DraftLine {
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        line_total(self.unit_price, self.quantity)
    }
}

/// Line items of a counter sale before it is registered.
///
/// Unlike the shopping cart, the draft checks stock itself: a line can only
/// grow while the product's current stock covers the new total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SaleDraft {
    customer: Option<CustomerId>,
    channel: SaleChannel,
    lines: Vec<DraftLine>,
}

impl SaleDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn set_customer(&mut self, customer: Option<CustomerId>) {
        self.customer = customer;
    }

    pub const fn set_channel(&mut self, channel: SaleChannel) {
        self.channel = channel;
    }

    #[must_use]
    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Fails if the quantity is zero, the product is not available, or its
    /// stock does not cover the requested (or merged) quantity.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), SaleDraftError> {
        if quantity == 0 {
            return Err(SaleDraftError::InvalidQuantity);
        }
        if !product.is_available() {
            return Err(SaleDraftError::Unavailable {
                name: product.name.clone(),
            });
        }
        if product.stock < quantity {
            return Err(SaleDraftError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let merged = line.quantity.saturating_add(quantity);
            if product.stock < merged {
                return Err(SaleDraftError::InsufficientStockForTotal {
                    name: product.name.clone(),
                    in_draft: line.quantity,
                    available: product.stock,
                });
            }
            line.quantity = merged;
            line.unit_price = product.sale_price;
            return Ok(());
        }

        self.lines.push(DraftLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.sale_price,
            quantity,
        });
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        sum_amounts(self.lines.iter().map(DraftLine::subtotal))
    }

    /// Build the registration payload.
    ///
    /// # Errors
    ///
    /// Fails without a customer or without lines.
    pub fn to_request(&self) -> Result<SaleRequest, SaleDraftError> {
        let customer = self.customer.ok_or(SaleDraftError::MissingCustomer)?;
        if self.lines.is_empty() {
            return Err(SaleDraftError::Empty);
        }
        Ok(SaleRequest {
            customer,
            channel: self.channel,
            payment_type: CASH_SALE.to_owned(),
            lines: self
                .lines
                .iter()
                .map(|l| SaleLineRequest {
                    producto_id: l.product_id,
                    cantidad: l.quantity,
                })
                .collect(),
        })
    }

    /// Reset after a successful registration.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
