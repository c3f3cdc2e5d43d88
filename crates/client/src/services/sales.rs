//! Sales history, counter-sale registration and receipts.

use appliance_store_core::SaleId;
use appliance_store_core::analytics::Trend;
use appliance_store_core::sale::{Sale, SaleDraft, SaleDraftError, SaleFilters, SaleRequest};
use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::error::ApiError;

const SALES: &str = "/api/ventas/";
const TRENDS: &str = "/api/ventas/analisis-tendencias/";

/// Why registering a drafted sale failed.
#[derive(Debug, thiserror::Error)]
pub enum RegisterSaleError {
    #[error(transparent)]
    Draft(#[from] SaleDraftError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Sales endpoints.
#[derive(Debug, Clone)]
pub struct SaleService {
    api: ApiClient,
}

impl SaleService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Sales history, filtered server-side.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn list(&self, filters: &SaleFilters) -> Result<Vec<Sale>, ApiError> {
        self.api
            .get_with_query(SALES, &filters.query_pairs())
            .await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn get(&self, id: SaleId) -> Result<Sale, ApiError> {
        self.api.get(&format!("{SALES}{id}/")).await
    }

    /// # Errors
    ///
    /// See [`ApiError`]. Stock shortfalls come back as `ApiError::Status`.
    #[instrument(skip(self, request), fields(customer = %request.customer, lines = request.lines.len()))]
    pub async fn create(&self, request: &SaleRequest) -> Result<Sale, ApiError> {
        let sale: Sale = self.api.post(SALES, request).await?;
        info!(sale_id = %sale.id, total = %sale.total, "Sale registered");
        Ok(sale)
    }

    /// Submit a draft and reset it once the backend accepts the sale.
    ///
    /// # Errors
    ///
    /// Returns `RegisterSaleError::Draft` if the draft is incomplete, or
    /// `RegisterSaleError::Api` if the backend rejects it. The draft is kept
    /// on error.
    pub async fn register(&self, draft: &mut SaleDraft) -> Result<Sale, RegisterSaleError> {
        let request = draft.to_request()?;
        let sale = self.create(&request).await?;
        draft.reset();
        Ok(sale)
    }

    /// PDF receipt for a sale.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn receipt_pdf(&self, id: SaleId) -> Result<Vec<u8>, ApiError> {
        self.api.get_file(&format!("{SALES}{id}/comprobante/")).await
    }

    /// Monthly sale counts and totals.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn trends(&self) -> Result<Vec<Trend>, ApiError> {
        let trends: Option<Vec<Trend>> = self.api.get(TRENDS).await?;
        Ok(trends.unwrap_or_default())
    }
}

/// Conventional file name for a downloaded receipt.
#[must_use]
pub fn receipt_file_name(id: SaleId) -> String {
    format!("nota_venta_{id}.pdf")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use appliance_store_core::catalog::Product;
    use appliance_store_core::{CustomerId, SaleChannel};
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ClientConfig;
    use crate::session::SessionStore;
    use crate::storage::MemoryStore;

    fn service(base: &str) -> SaleService {
        let config = ClientConfig::with_api_base(base).unwrap();
        let session = SessionStore::new(Arc::new(MemoryStore::new()));
        SaleService::new(ApiClient::new(&config, session).unwrap())
    }

    fn fridge() -> Product {
        serde_json::from_value(json!({
            "id": 5,
            "codigo_producto": "REF-01",
            "nombre": "Refrigerador",
            "precio_venta": "4200.00",
            "precio_compra": "3500.00",
            "estado": "Disponible",
            "stock_actual": 4,
            "ano_garantia": 2,
            "categoria": 1
        }))
        .unwrap()
    }

    fn sale_json() -> serde_json::Value {
        json!({
            "id": 31,
            "fecha_venta": "2025-03-04T10:00:00Z",
            "cliente": {"id": 4, "nombre": "Luis", "apellido": "Perez", "correo": "luis@correo.bo"},
            "total": "8400.00",
            "metodo_entrada": "Mostrador",
            "tipo_venta": "Contado",
            "detalles": []
        })
    }

    #[tokio::test]
    async fn test_list_sends_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SALES))
            .and(query_param("fecha_min", "2025-03-01"))
            .and(query_param("metodo_entrada", "Telefono"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([sale_json()])))
            .mount(&server)
            .await;

        let filters = SaleFilters {
            from: NaiveDate::from_ymd_opt(2025, 3, 1),
            channel: Some(SaleChannel::Phone),
            ..SaleFilters::default()
        };
        let sales = service(&server.uri()).list(&filters).await.unwrap();
        assert_eq!(sales[0].customer_email(), "luis@correo.bo");
    }

    #[tokio::test]
    async fn test_register_posts_draft_and_resets() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SALES))
            .and(body_json(json!({
                "cliente": 4,
                "metodo_entrada": "Mostrador",
                "tipo_venta": "Contado",
                "detalles": [{"producto_id": 5, "cantidad": 2}]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(sale_json()))
            .expect(1)
            .mount(&server)
            .await;

        let mut draft = SaleDraft::new();
        draft.set_customer(Some(CustomerId::new(4)));
        draft.add_item(&fridge(), 2).unwrap();

        let sale = service(&server.uri()).register(&mut draft).await.unwrap();
        assert_eq!(sale.id, SaleId::new(31));
        assert!(draft.lines().is_empty());
    }

    #[tokio::test]
    async fn test_register_keeps_draft_on_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SALES))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "Stock insuficiente"})),
            )
            .mount(&server)
            .await;

        let mut draft = SaleDraft::new();
        draft.set_customer(Some(CustomerId::new(4)));
        draft.add_item(&fridge(), 1).unwrap();

        let err = service(&server.uri())
            .register(&mut draft)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Stock insuficiente");
        assert_eq!(draft.lines().len(), 1);
    }

    #[tokio::test]
    async fn test_register_requires_customer() {
        let mut draft = SaleDraft::new();
        draft.add_item(&fridge(), 1).unwrap();
        let err = service("http://127.0.0.1:9")
            .register(&mut draft)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RegisterSaleError::Draft(SaleDraftError::MissingCustomer)
        ));
    }

    #[test]
    fn test_receipt_file_name() {
        assert_eq!(receipt_file_name(SaleId::new(31)), "nota_venta_31.pdf");
    }
}
