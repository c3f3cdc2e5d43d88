//! CLI error type.

use appliance_store_client::services::{CheckoutError, RegisterSaleError};
use appliance_store_client::{ApiError, ConfigError, StorageError};
use appliance_store_core::EmailError;
use appliance_store_core::catalog::InputError;
use appliance_store_core::sale::SaleDraftError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error(transparent)]
    Draft(#[from] SaleDraftError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    RegisterSale(#[from] RegisterSaleError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The guard sent the user to the login route.
    #[error("Login required")]
    LoginRequired,

    /// The guard sent the user back to the default route.
    #[error("Access denied: administrator role required")]
    Forbidden,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
