//! Catalog entities: categories, products, warehouses and stock entries.
//!
//! Field names on the wire are the backend's Spanish names; the Rust side
//! uses English names and maps them with `serde(rename)`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CategoryId, ProductId, ProductStatus, StockEntryId, WarehouseId};

/// Input rejected before it is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A required field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// A quantity or price must be greater than zero.
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
}

fn require(value: &str, field: &'static str) -> Result<(), InputError> {
    if value.trim().is_empty() {
        Err(InputError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Drop blank optional strings so they are omitted from payloads.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

const fn default_true() -> bool {
    true
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "estado", default = "default_true")]
    pub active: bool,
}

/// Create/update payload for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInput {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "estado")]
    pub active: bool,
}

impl CategoryInput {
    /// Build a trimmed category payload.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingField`] if the name is blank.
    pub fn new(name: &str, active: bool) -> Result<Self, InputError> {
        require(name, "nombre")?;
        Ok(Self {
            name: name.trim().to_owned(),
            active,
        })
    }
}

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "codigo_producto", default)]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio_venta")]
    pub sale_price: Decimal,
    #[serde(rename = "precio_compra", default)]
    pub purchase_price: Decimal,
    #[serde(rename = "imagen_url", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "estado", default)]
    pub status: ProductStatus,
    #[serde(rename = "stock_actual", default)]
    pub stock: u32,
    #[serde(rename = "ano_garantia", default)]
    pub warranty_years: u32,
    #[serde(rename = "categoria", default)]
    pub category: Option<CategoryId>,
    #[serde(rename = "marca", default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl Product {
    /// Whether the product can be offered in a sale.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Available
    }
}

/// Create/update payload for a product.
///
/// Blank optional fields (`descripcion`, `imagen_url`, `marca`) are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductInput {
    #[serde(rename = "codigo_producto")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio_venta")]
    pub sale_price: Decimal,
    #[serde(rename = "precio_compra")]
    pub purchase_price: Decimal,
    #[serde(rename = "imagen_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "estado")]
    pub status: ProductStatus,
    #[serde(rename = "stock_actual")]
    pub stock: u32,
    #[serde(rename = "ano_garantia")]
    pub warranty_years: u32,
    #[serde(rename = "categoria")]
    pub category: CategoryId,
    #[serde(rename = "marca", skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl ProductInput {
    /// Check required fields and normalize blank optionals.
    ///
    /// # Errors
    ///
    /// Returns an error if the code or name is blank, or a price is not
    /// positive.
    pub fn validated(mut self) -> Result<Self, InputError> {
        require(&self.code, "codigo_producto")?;
        require(&self.name, "nombre")?;
        if self.sale_price <= Decimal::ZERO {
            return Err(InputError::NotPositive("precio_venta"));
        }
        if self.purchase_price <= Decimal::ZERO {
            return Err(InputError::NotPositive("precio_compra"));
        }
        self.code = self.code.trim().to_owned();
        self.name = self.name.trim().to_owned();
        self.description = non_blank(self.description);
        self.image_url = non_blank(self.image_url);
        self.brand = non_blank(self.brand);
        Ok(self)
    }
}

impl ProductInput {
    /// Start an update payload from an existing product.
    ///
    /// Returns `None` when the product has no category, since the backend
    /// requires one on every write.
    #[must_use]
    pub fn from_product(product: &Product) -> Option<Self> {
        Some(Self {
            code: product.code.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            sale_price: product.sale_price,
            purchase_price: product.purchase_price,
            image_url: product.image_url.clone(),
            status: product.status,
            stock: product.stock,
            warranty_years: product.warranty_years,
            category: product.category?,
            brand: product.brand.clone(),
        })
    }
}

/// A warehouse (`inventario`) that holds stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "estado", default = "default_true")]
    pub active: bool,
}

/// Create/update payload for a warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarehouseInput {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "estado")]
    pub active: bool,
}

impl WarehouseInput {
    /// Build a trimmed warehouse payload.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingField`] if the code is blank.
    pub fn new(code: &str, active: bool) -> Result<Self, InputError> {
        require(code, "codigo")?;
        Ok(Self {
            code: code.trim().to_owned(),
            active,
        })
    }
}

/// A recorded stock-in movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub id: StockEntryId,
    #[serde(rename = "inventario")]
    pub warehouse: WarehouseId,
    #[serde(rename = "producto_id", alias = "producto", default)]
    pub product: Option<ProductId>,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
    #[serde(rename = "fecha_ingreso", default, skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
}

/// Payload recording new stock for a product in a warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StockEntryRequest {
    #[serde(rename = "inventario")]
    pub warehouse: WarehouseId,
    #[serde(rename = "producto_id")]
    pub product: ProductId,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

impl StockEntryRequest {
    /// Build a stock entry.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NotPositive`] if the quantity is zero.
    pub const fn new(
        warehouse: WarehouseId,
        product: ProductId,
        quantity: u32,
    ) -> Result<Self, InputError> {
        if quantity == 0 {
            return Err(InputError::NotPositive("cantidad"));
        }
        Ok(Self {
            warehouse,
            product,
            quantity,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_product_accepts_string_and_number_prices() {
        let product: Product = serde_json::from_value(json!({
            "id": 3,
            "codigo_producto": "REF-01",
            "nombre": "Refrigerador",
            "precio_venta": "4500.00",
            "precio_compra": 3900,
            "estado": true,
            "stock_actual": 4,
            "categoria": 2
        }))
        .unwrap();

        assert_eq!(product.sale_price, Decimal::new(4500, 0));
        assert_eq!(product.purchase_price, Decimal::new(3900, 0));
        assert!(product.is_available());
        assert_eq!(product.category, Some(CategoryId::new(2)));
        assert_eq!(product.image_url, None);
    }

    #[test]
    fn test_product_input_drops_blank_optionals() {
        let input = ProductInput {
            code: " LAV-9 ".into(),
            name: "Lavadora".into(),
            description: Some("   ".into()),
            sale_price: Decimal::new(2800, 0),
            purchase_price: Decimal::new(2100, 0),
            image_url: Some(String::new()),
            status: ProductStatus::Available,
            stock: 0,
            warranty_years: 2,
            category: CategoryId::new(1),
            brand: Some("Mabe".into()),
        }
        .validated()
        .unwrap();

        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["codigo_producto"], "LAV-9");
        assert!(value.get("descripcion").is_none());
        assert!(value.get("imagen_url").is_none());
        assert_eq!(value["marca"], "Mabe");
        assert_eq!(value["estado"], "Disponible");
    }

    #[test]
    fn test_product_input_requires_prices() {
        let input = ProductInput {
            code: "X".into(),
            name: "Y".into(),
            description: None,
            sale_price: Decimal::ZERO,
            purchase_price: Decimal::ONE,
            image_url: None,
            status: ProductStatus::Available,
            stock: 0,
            warranty_years: 0,
            category: CategoryId::new(1),
            brand: None,
        };
        assert_eq!(
            input.validated(),
            Err(InputError::NotPositive("precio_venta"))
        );
    }

    #[test]
    fn test_stock_entry_rejects_zero_quantity() {
        let err = StockEntryRequest::new(WarehouseId::new(1), ProductId::new(2), 0);
        assert_eq!(err, Err(InputError::NotPositive("cantidad")));

        let ok = StockEntryRequest::new(WarehouseId::new(1), ProductId::new(2), 5).unwrap();
        assert_eq!(
            serde_json::to_value(ok).unwrap(),
            json!({"inventario": 1, "producto_id": 2, "cantidad": 5})
        );
    }

    #[test]
    fn test_category_input_trims_name() {
        let input = CategoryInput::new("  Línea blanca ", true).unwrap();
        assert_eq!(input.name, "Línea blanca");
        assert!(CategoryInput::new(" ", true).is_err());
    }
}
