//! Sales predictions and trends.

use appliance_store_core::CategoryId;
use appliance_store_core::analytics::{
    ForecastHorizon, ForecastPoint, Prediction, forecast_series, forecast_total,
};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::api::ApiClient;
use crate::error::ApiError;

const PREDICTIONS: &str = "/api/predicciones/";

/// Forecast chart data with its total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forecast {
    pub points: Vec<ForecastPoint>,
    pub total: Decimal,
}

/// Prediction endpoints.
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    api: ApiClient,
}

impl AnalyticsService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Raw prediction rows, optionally for one category.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn predictions(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Prediction>, ApiError> {
        let query = [(
            "categoria",
            category.map(|c| c.to_string()).unwrap_or_default(),
        )];
        self.api.get_with_query(PREDICTIONS, &query).await
    }

    /// Predictions shaped for the dashboard chart.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn forecast(
        &self,
        category: Option<CategoryId>,
        horizon: ForecastHorizon,
    ) -> Result<Forecast, ApiError> {
        let rows = self.predictions(category).await?;
        let points = forecast_series(&rows, category.is_some(), horizon);
        let total = forecast_total(&points);
        Ok(Forecast { points, total })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ClientConfig;
    use crate::session::SessionStore;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_forecast_for_category() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(PREDICTIONS))
            .and(query_param("categoria", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"periodo_inicio": "2025-06-01", "venta_predicha": "900", "categoria": 3},
                {"periodo_inicio": "2025-05-01", "venta_predicha": "800", "categoria": 3},
                {"periodo_inicio": "2025-04-01", "venta_predicha": "700", "categoria": 3},
                {"periodo_inicio": "2025-03-01", "venta_predicha": "600", "categoria": 3}
            ])))
            .mount(&server)
            .await;

        let config = ClientConfig::with_api_base(&server.uri()).unwrap();
        let session = SessionStore::new(Arc::new(MemoryStore::new()));
        let analytics = AnalyticsService::new(ApiClient::new(&config, session).unwrap());

        let forecast = analytics
            .forecast(Some(CategoryId::new(3)), ForecastHorizon::ThreeMonths)
            .await
            .unwrap();
        let labels: Vec<_> = forecast.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["2025-03", "2025-04", "2025-05"]);
        assert_eq!(forecast.total, Decimal::new(2100, 0));
    }
}
