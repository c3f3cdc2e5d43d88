//! Wiring of storage, stores and services for one CLI invocation.

use std::sync::Arc;

use appliance_store_client::services::{
    AccountService, AnalyticsService, AuthService, CatalogService, CheckoutService,
    CustomerService, NoticeService, SaleService,
};
use appliance_store_client::{
    ApiClient, CartStore, ClientConfig, FileStore, KeyValueStore, SessionStore,
};
use appliance_store_core::{GuardDecision, guard};

use crate::error::CliError;

/// Stores and the API client shared by every command.
pub struct App {
    pub session: SessionStore,
    pub cart: CartStore,
    pub api: ApiClient,
}

impl App {
    /// Open the state directory and build the stores and client.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the state directory or HTTP client cannot be set up.
    pub fn from_config(config: ClientConfig) -> Result<Self, CliError> {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.state_dir)?);
        Ok(Self::with_storage(&config, storage)?)
    }

    /// Build on an existing storage backend.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client fails to build.
    pub fn with_storage(
        config: &ClientConfig,
        storage: Arc<dyn KeyValueStore>,
    ) -> Result<Self, appliance_store_client::ApiError> {
        let session = SessionStore::new(storage.clone());
        let cart = CartStore::load(storage);
        let api = ApiClient::new(config, session.clone())?;
        Ok(Self { session, cart, api })
    }

    /// Apply the route guard for `roles`.
    ///
    /// # Errors
    ///
    /// `CliError::LoginRequired` or `CliError::Forbidden` when the guard
    /// redirects.
    pub fn require(&self, roles: &[&str]) -> Result<(), CliError> {
        match guard(&self.session.snapshot(), roles) {
            GuardDecision::Allow => Ok(()),
            GuardDecision::RedirectToLogin => Err(CliError::LoginRequired),
            GuardDecision::RedirectToDefault => Err(CliError::Forbidden),
        }
    }

    #[must_use]
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.api.clone())
    }

    #[must_use]
    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.api.clone())
    }

    #[must_use]
    pub fn customers(&self) -> CustomerService {
        CustomerService::new(self.api.clone())
    }

    #[must_use]
    pub fn accounts(&self) -> AccountService {
        AccountService::new(self.api.clone())
    }

    #[must_use]
    pub fn sales(&self) -> SaleService {
        SaleService::new(self.api.clone())
    }

    #[must_use]
    pub fn analytics(&self) -> AnalyticsService {
        AnalyticsService::new(self.api.clone())
    }

    #[must_use]
    pub fn notices(&self) -> NoticeService {
        NoticeService::new(self.api.clone())
    }

    #[must_use]
    pub fn checkout(&self) -> CheckoutService {
        CheckoutService::new(self.api.clone())
    }
}
