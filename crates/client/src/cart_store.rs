//! Observable cart store with write-through persistence.
//!
//! Every action is applied in full, the resulting state is written to storage
//! under [`CART_KEY`], and only then are subscribers notified. Views read the
//! latest state from a [`watch::Receiver`].

use std::sync::Arc;

use appliance_store_core::{CartAction, CartState, ProductId, ProductRef};
use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the serialized cart.
pub const CART_KEY: &str = "carrito";

/// Single-writer cart store.
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    state: watch::Sender<CartState>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Load the persisted cart, falling back to an empty one.
    ///
    /// An absent, unreadable or malformed entry never fails construction.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let initial = load_state(storage.as_ref());
        let (state, _) = watch::channel(initial);
        Self { storage, state }
    }

    /// Receiver that observes every committed state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    /// Copy of the current state.
    #[must_use]
    pub fn state(&self) -> CartState {
        self.state.borrow().clone()
    }

    /// Apply `action`, persist the result, then notify subscribers.
    ///
    /// The whole sequence runs under the channel's write lock, so concurrent
    /// dispatches are applied one after another and storage always holds the
    /// state subscribers see. The in-memory state advances even if
    /// persisting fails.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the new state could not be written.
    pub fn dispatch(&self, action: CartAction) -> Result<(), StorageError> {
        let mut persisted = Ok(());
        self.state.send_modify(|state| {
            state.apply(action);
            persisted = persist(self.storage.as_ref(), state);
        });
        if let Err(e) = &persisted {
            tracing::warn!(error = %e, "Failed to persist cart");
        }
        persisted
    }

    /// Add `delta` units of `product`; negative deltas decrement.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the new state could not be written.
    pub fn add(&self, product: ProductRef, delta: i32) -> Result<(), StorageError> {
        self.dispatch(CartAction::Add { product, delta })
    }

    /// Remove the line for `product_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the new state could not be written.
    pub fn remove(&self, product_id: ProductId) -> Result<(), StorageError> {
        self.dispatch(CartAction::Remove { product_id })
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the new state could not be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.dispatch(CartAction::Clear)
    }

    /// Sum of unit price times quantity, computed from the current lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.state.borrow().total()
    }

    /// Units across all lines, for the header badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.state.borrow().item_count()
    }
}

fn load_state(storage: &dyn KeyValueStore) -> CartState {
    let raw = match storage.get_item(CART_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return CartState::empty(),
        Err(e) => {
            tracing::debug!(error = %e, "Cart storage unreadable, starting empty");
            return CartState::empty();
        }
    };
    match serde_json::from_str::<CartState>(&raw) {
        Ok(state) => state.normalized(),
        Err(e) => {
            tracing::debug!(error = %e, "Persisted cart malformed, starting empty");
            CartState::empty()
        }
    }
}

fn persist(storage: &dyn KeyValueStore, state: &CartState) -> Result<(), StorageError> {
    let json = serde_json::to_string(state)?;
    storage.set_item(CART_KEY, &json)
}
