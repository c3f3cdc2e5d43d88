//! Categories, products, warehouses and stock entries.

use appliance_store_core::catalog::{
    Category, CategoryInput, Product, ProductInput, StockEntry, StockEntryRequest, Warehouse,
    WarehouseInput,
};
use appliance_store_core::{CategoryId, ProductId, WarehouseId};
use tracing::instrument;

use crate::api::ApiClient;
use crate::error::ApiError;

const CATEGORIES: &str = "/api/categorias/";
const PRODUCTS: &str = "/api/productos/";
const WAREHOUSES: &str = "/api/inventarios/";
const STOCK_ENTRIES: &str = "/api/inventario-productos/";

/// Catalog and inventory endpoints.
#[derive(Debug, Clone)]
pub struct CatalogService {
    api: ApiClient,
}

impl CatalogService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.api.get(CATEGORIES).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn category(&self, id: CategoryId) -> Result<Category, ApiError> {
        self.api.get(&format!("{CATEGORIES}{id}/")).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, ApiError> {
        self.api.post(CATEGORIES, input).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Category, ApiError> {
        self.api.put(&format!("{CATEGORIES}{id}/"), input).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        self.api.delete(&format!("{CATEGORIES}{id}/")).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.api.get(PRODUCTS).await
    }

    /// Products that can be sold right now (status `Disponible`).
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn available_products(&self) -> Result<Vec<Product>, ApiError> {
        let mut products = self.products().await?;
        products.retain(Product::is_available);
        Ok(products)
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.api.get(&format!("{PRODUCTS}{id}/")).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ApiError> {
        self.api.post(PRODUCTS, input).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<Product, ApiError> {
        self.api.put(&format!("{PRODUCTS}{id}/"), input).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.api.delete(&format!("{PRODUCTS}{id}/")).await
    }

    // =========================================================================
    // Warehouses
    // =========================================================================

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn warehouses(&self) -> Result<Vec<Warehouse>, ApiError> {
        self.api.get(WAREHOUSES).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn warehouse(&self, id: WarehouseId) -> Result<Warehouse, ApiError> {
        self.api.get(&format!("{WAREHOUSES}{id}/")).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create_warehouse(&self, input: &WarehouseInput) -> Result<Warehouse, ApiError> {
        self.api.post(WAREHOUSES, input).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, input))]
    pub async fn update_warehouse(
        &self,
        id: WarehouseId,
        input: &WarehouseInput,
    ) -> Result<Warehouse, ApiError> {
        self.api.put(&format!("{WAREHOUSES}{id}/"), input).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn delete_warehouse(&self, id: WarehouseId) -> Result<(), ApiError> {
        self.api.delete(&format!("{WAREHOUSES}{id}/")).await
    }

    // =========================================================================
    // Stock entries
    // =========================================================================

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn stock_entries(&self) -> Result<Vec<StockEntry>, ApiError> {
        self.api.get(STOCK_ENTRIES).await
    }

    /// Record goods received into a warehouse. The backend raises the
    /// product's stock.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn record_stock_entry(
        &self,
        request: &StockEntryRequest,
    ) -> Result<StockEntry, ApiError> {
        self.api.post(STOCK_ENTRIES, request).await
    }
}
