//! Customer management.

use appliance_store_core::UserId;
use appliance_store_core::customer::{Customer, CustomerInput};
use tracing::instrument;

use crate::api::ApiClient;
use crate::error::ApiError;

const CUSTOMERS: &str = "/api/clientes/";

/// Customer endpoints. Ids are the customer's user id.
#[derive(Debug, Clone)]
pub struct CustomerService {
    api: ApiClient,
}

impl CustomerService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// All customers, optionally filtered by the backend's `search`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Customer>, ApiError> {
        let query = [("search", search.unwrap_or_default().trim().to_string())];
        self.api.get_with_query(CUSTOMERS, &query).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn get(&self, id: UserId) -> Result<Customer, ApiError> {
        self.api.get(&format!("{CUSTOMERS}{id}/")).await
    }

    /// Create the user account and customer profile together.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: &CustomerInput) -> Result<Customer, ApiError> {
        self.api.post(CUSTOMERS, input).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: UserId, input: &CustomerInput) -> Result<Customer, ApiError> {
        self.api.put(&format!("{CUSTOMERS}{id}/"), input).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<(), ApiError> {
        self.api.delete(&format!("{CUSTOMERS}{id}/")).await
    }

    /// Flip the customer between active and inactive.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn toggle_status(&self, id: UserId) -> Result<serde_json::Value, ApiError> {
        self.api
            .post_empty(&format!("{CUSTOMERS}{id}/toggle-estado/"))
            .await
    }
}
