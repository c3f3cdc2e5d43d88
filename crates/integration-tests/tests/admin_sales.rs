//! Administrator flow: register a counter sale, fetch its receipt, read
//! the forecast.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use appliance_store_client::services::{
    AnalyticsService, AuthService, CatalogService, RegisterSaleError, SaleService,
    receipt_file_name,
};
use appliance_store_core::analytics::ForecastHorizon;
use appliance_store_core::sale::{SaleDraft, SaleDraftError};
use appliance_store_core::{CustomerId, Email, ProductId, SaleChannel, SaleId};
use appliance_store_integration_tests::{Harness, TestBackend, admin_user, product_json};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn admin(backend: &TestBackend) -> Harness {
    backend.mount_login(admin_user()).await;
    let harness = backend.open();
    AuthService::new(harness.api.clone())
        .login(
            &Email::parse("admin@tienda.bo").unwrap(),
            &SecretString::from("secreto"),
        )
        .await
        .unwrap();
    harness
}

#[tokio::test]
async fn test_register_counter_sale_and_download_receipt() {
    let backend = TestBackend::start().await;
    let harness = admin(&backend).await;
    Mock::given(method("GET"))
        .and(path("/api/productos/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json(1, "Refrigerador", "3500.00", 2),
            product_json(2, "Licuadora", "250.50", 10),
        ])))
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/ventas/"))
        .and(body_json(json!({
            "cliente": 4,
            "metodo_entrada": "Telefono",
            "tipo_venta": "Contado",
            "detalles": [
                {"producto_id": 1, "cantidad": 2},
                {"producto_id": 2, "cantidad": 1}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 55,
            "fecha_venta": "2026-10-19T10:00:00Z",
            "total": "7250.50",
            "metodo_entrada": "Telefono"
        })))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ventas/55/comprobante/"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
        .mount(&backend.server)
        .await;

    let products = CatalogService::new(harness.api.clone())
        .available_products()
        .await
        .unwrap();
    let mut draft = SaleDraft::new();
    draft.set_customer(Some(CustomerId::new(4)));
    draft.set_channel(SaleChannel::Phone);
    draft.add_item(&products[0], 1).unwrap();
    draft.add_item(&products[0], 1).unwrap();
    assert!(matches!(
        draft.add_item(&products[0], 1),
        Err(SaleDraftError::InsufficientStockForTotal { .. })
    ));
    draft.add_item(&products[1], 1).unwrap();
    assert_eq!(draft.total(), Decimal::new(725_050, 2));

    let sales = SaleService::new(harness.api.clone());
    let sale = sales.register(&mut draft).await.unwrap();
    assert_eq!(sale.id, SaleId::new(55));
    assert!(draft.lines().is_empty());

    let pdf = sales.receipt_pdf(sale.id).await.unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    assert_eq!(receipt_file_name(sale.id), "nota_venta_55.pdf");
}

#[tokio::test]
async fn test_rejected_sale_keeps_draft() {
    let backend = TestBackend::start().await;
    let harness = admin(&backend).await;
    Mock::given(method("POST"))
        .and(path("/api/ventas/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Cliente inexistente"})),
        )
        .mount(&backend.server)
        .await;

    let product = serde_json::from_value(product_json(2, "Licuadora", "250.50", 10)).unwrap();
    let mut draft = SaleDraft::new();
    draft.set_customer(Some(CustomerId::new(999)));
    draft.add_item(&product, 3).unwrap();

    let err = SaleService::new(harness.api.clone())
        .register(&mut draft)
        .await
        .unwrap_err();
    assert!(matches!(err, RegisterSaleError::Api(_)));
    assert_eq!(err.to_string(), "Cliente inexistente");
    assert_eq!(draft.lines()[0].product_id, ProductId::new(2));
}

#[tokio::test]
async fn test_forecast_for_category() {
    let backend = TestBackend::start().await;
    let harness = admin(&backend).await;
    Mock::given(method("GET"))
        .and(path("/api/predicciones/"))
        .and(query_param("categoria", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"periodo_inicio": "2026-12-01", "venta_predicha": "40.00", "categoria": 2},
            {"periodo_inicio": "2026-11-01", "venta_predicha": "30.00", "categoria": 2},
            {"periodo_inicio": "2026-10-01", "venta_predicha": "20.00", "categoria": 2},
            {"periodo_inicio": "2026-09-01", "venta_predicha": "10.00", "categoria": 2}
        ])))
        .mount(&backend.server)
        .await;

    let forecast = AnalyticsService::new(harness.api.clone())
        .forecast(
            Some(appliance_store_core::CategoryId::new(2)),
            ForecastHorizon::ThreeMonths,
        )
        .await
        .unwrap();
    let labels: Vec<_> = forecast.points.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["2026-09", "2026-10", "2026-11"]);
    assert_eq!(forecast.total, Decimal::new(6000, 2));
}
