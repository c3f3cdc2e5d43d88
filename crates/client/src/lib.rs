//! Appliance Store Client - state and REST access for the console.
//!
//! - [`storage`] - Durable key/value storage (`carrito`, `token`, `user`)
//! - [`session`] - Auth session store over that storage
//! - [`cart_store`] - Observable, write-through cart store
//! - [`api`] - Authenticated REST gateway
//! - [`services`] - Typed wrappers for each backend resource
//! - [`config`] - Environment configuration
//!
//! Handles are injected: build one [`storage::KeyValueStore`], hand it to the
//! session and cart stores, then give the session store to the gateway.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart_store;
pub mod config;
pub mod error;
pub mod services;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use cart_store::CartStore;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use session::SessionStore;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
