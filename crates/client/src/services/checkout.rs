//! Storefront checkout: turns the local cart into a backend cart order.

use appliance_store_core::catalog::InputError;
use appliance_store_core::{CartOrderId, CartState, Email, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::cart_store::CartStore;
use crate::error::ApiError;
use crate::storage::StorageError;

const CART_ORDERS: &str = "/api/carritos/";
const CART_ORDER_LINES: &str = "/api/detallecarritos/";

/// Checkout errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The order was placed but the local cart could not be emptied.
    #[error("Order placed but cart not cleared: {0}")]
    Storage(#[from] StorageError),
}

/// Delivery details collected by the checkout form.
///
/// Every field is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutContact {
    pub name: String,
    pub email: Email,
    pub address: String,
    pub phone: String,
}

impl CheckoutContact {
    /// # Errors
    ///
    /// Returns `InputError::MissingField` naming the first blank field.
    pub fn new(name: &str, email: Email, address: &str, phone: &str) -> Result<Self, InputError> {
        let required = |value: &str, field: &'static str| {
            let value = value.trim();
            if value.is_empty() {
                Err(InputError::MissingField(field))
            } else {
                Ok(value.to_owned())
            }
        };
        Ok(Self {
            name: required(name, "nombre")?,
            email,
            address: required(address, "direccion")?,
            phone: required(phone, "telefono")?,
        })
    }
}

#[derive(Serialize)]
struct CartOrderRequest {
    total: Decimal,
}

#[derive(Deserialize)]
struct CartOrderCreated {
    id: CartOrderId,
}

#[derive(Serialize)]
struct CartOrderLine {
    carrito: CartOrderId,
    producto: ProductId,
    cantidad: u32,
    precio_unitario: Decimal,
    subtotal: Decimal,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order_id: CartOrderId,
    pub total: Decimal,
    pub lines: usize,
}

/// Cart order endpoints.
#[derive(Debug, Clone)]
pub struct CheckoutService {
    api: ApiClient,
}

impl CheckoutService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Post the cart as an order, one detail row per line.
    ///
    /// Lines are posted in cart order. If one fails, the rows already
    /// created stay on the backend and the local cart is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotLoggedIn` (wrapped) without a session, or
    /// `CheckoutError::EmptyCart`.
    #[instrument(skip_all, fields(lines = cart.items.len()))]
    pub async fn place_order(&self, cart: &CartState) -> Result<CheckoutReceipt, CheckoutError> {
        if !self.api.session().is_logged_in() {
            return Err(ApiError::NotLoggedIn.into());
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let total = cart.total();
        let order: CartOrderCreated = self
            .api
            .post(CART_ORDERS, &CartOrderRequest { total })
            .await?;

        for line in &cart.items {
            let _: serde_json::Value = self
                .api
                .post(
                    CART_ORDER_LINES,
                    &CartOrderLine {
                        carrito: order.id,
                        producto: line.product.id,
                        cantidad: line.quantity,
                        precio_unitario: line.product.unit_price,
                        subtotal: line.subtotal(),
                    },
                )
                .await?;
        }

        info!(order_id = %order.id, total = %total, "Order placed");
        Ok(CheckoutReceipt {
            order_id: order.id,
            total,
            lines: cart.items.len(),
        })
    }

    /// Place the current cart of `store` as an order and empty the cart.
    ///
    /// # Errors
    ///
    /// See [`CheckoutService::place_order`]. `CheckoutError::Storage` means
    /// the order exists but the emptied cart was not persisted.
    pub async fn checkout(
        &self,
        store: &CartStore,
        contact: &CheckoutContact,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let receipt = self.place_order(&store.state()).await?;
        info!(order_id = %receipt.order_id, contact = %contact.email, "Checkout complete");
        store.clear()?;
        Ok(receipt)
    }
}
