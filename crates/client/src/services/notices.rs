//! Customer notices (`avisos`).

use appliance_store_core::NoticeId;
use appliance_store_core::notice::{DEFAULT_NOTICE_STATUS, Notice, NoticeDraft};
use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::error::ApiError;

const NOTICES: &str = "/api/acceso_seguridad/avisos/";

/// Notice endpoints.
#[derive(Debug, Clone)]
pub struct NoticeService {
    api: ApiClient,
}

impl NoticeService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Notices, optionally restricted to one `estado`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Notice>, ApiError> {
        let query = [("estado", status.unwrap_or_default().to_string())];
        self.api.get_with_query(NOTICES, &query).await
    }

    /// Notices currently in the `Activo` state.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    pub async fn active(&self) -> Result<Vec<Notice>, ApiError> {
        self.list(Some(DEFAULT_NOTICE_STATUS)).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn get(&self, id: NoticeId) -> Result<Notice, ApiError> {
        self.api.get(&format!("{NOTICES}{id}/")).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub async fn create(&self, draft: NoticeDraft) -> Result<Notice, ApiError> {
        self.api.post(NOTICES, &draft.into_payload()).await
    }

    /// Replace a notice with the contents of `draft`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, draft))]
    pub async fn update(&self, id: NoticeId, draft: NoticeDraft) -> Result<Notice, ApiError> {
        self.api
            .put(&format!("{NOTICES}{id}/"), &draft.into_payload())
            .await
    }

    /// Change individual fields, e.g. `{"estado": "Inactivo"}`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, changes))]
    pub async fn patch(
        &self,
        id: NoticeId,
        changes: &serde_json::Value,
    ) -> Result<Notice, ApiError> {
        self.api.patch(&format!("{NOTICES}{id}/"), changes).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn delete(&self, id: NoticeId) -> Result<(), ApiError> {
        self.api.delete(&format!("{NOTICES}{id}/")).await
    }

    /// Send the notice immediately instead of waiting for its schedule.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn send_now(&self, id: NoticeId) -> Result<serde_json::Value, ApiError> {
        let response = self
            .api
            .post_empty(&format!("{NOTICES}{id}/enviar/"))
            .await?;
        info!(notice_id = %id, "Notice sent");
        Ok(response)
    }

    /// Delivery statistics as reported by the backend.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn statistics(&self, id: NoticeId) -> Result<serde_json::Value, ApiError> {
        self.api
            .get(&format!("{NOTICES}{id}/estadisticas/"))
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ClientConfig;
    use crate::session::SessionStore;
    use crate::storage::MemoryStore;

    fn service(base: &str) -> NoticeService {
        let config = ClientConfig::with_api_base(base).unwrap();
        let session = SessionStore::new(Arc::new(MemoryStore::new()));
        NoticeService::new(ApiClient::new(&config, session).unwrap())
    }

    fn notice_json() -> serde_json::Value {
        json!({
            "id": 2,
            "asunto": "Liquidacion",
            "mensaje": "Hasta 30% en lavadoras",
            "tipo": "Promocion",
            "estado": "Activo",
            "prioridad": 2
        })
    }

    #[tokio::test]
    async fn test_active_filters_by_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(NOTICES))
            .and(query_param("estado", "Activo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([notice_json()])))
            .expect(1)
            .mount(&server)
            .await;

        let notices = service(&server.uri()).active().await.unwrap();
        assert_eq!(notices[0].subject, "Liquidacion");
    }

    #[tokio::test]
    async fn test_create_maps_title_to_subject() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(NOTICES))
            .and(body_json(json!({
                "asunto": "Liquidacion",
                "mensaje": "Hasta 30% en lavadoras",
                "tipo": "Informativo",
                "estado": "Activo",
                "prioridad": 1
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(notice_json()))
            .expect(1)
            .mount(&server)
            .await;

        let draft = NoticeDraft {
            title: "Liquidacion".into(),
            message: "Hasta 30% en lavadoras".into(),
            ..NoticeDraft::default()
        };
        let created = service(&server.uri()).create(draft).await.unwrap();
        assert_eq!(created.id, NoticeId::new(2));
    }

    #[tokio::test]
    async fn test_send_now_and_statistics() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/acceso_seguridad/avisos/2/enviar/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"enviados": 14})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/acceso_seguridad/avisos/2/estadisticas/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"total": 14, "leidos": 5})),
            )
            .mount(&server)
            .await;

        let notices = service(&server.uri());
        let sent = notices.send_now(NoticeId::new(2)).await.unwrap();
        assert_eq!(sent["enviados"], 14);
        let stats = notices.statistics(NoticeId::new(2)).await.unwrap();
        assert_eq!(stats["leidos"], 5);
    }
}
