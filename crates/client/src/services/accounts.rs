//! Staff and customer login accounts.

use appliance_store_core::UserId;
use appliance_store_core::customer::{UserAccount, UserAccountInput};
use tracing::instrument;

use crate::api::ApiClient;
use crate::error::ApiError;

const USERS: &str = "/api/acceso_seguridad/usuarios/";

/// User account endpoints.
#[derive(Debug, Clone)]
pub struct AccountService {
    api: ApiClient,
}

impl AccountService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.api.get(USERS).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn get(&self, id: UserId) -> Result<UserAccount, ApiError> {
        self.api.get(&format!("{USERS}{id}/")).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, input), fields(email = %input.email, role = %input.role))]
    pub async fn create(&self, input: &UserAccountInput) -> Result<UserAccount, ApiError> {
        self.api.post(USERS, input).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: UserId,
        input: &UserAccountInput,
    ) -> Result<UserAccount, ApiError> {
        self.api.put(&format!("{USERS}{id}/"), input).await
    }

    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<(), ApiError> {
        self.api.delete(&format!("{USERS}{id}/")).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ClientConfig;
    use crate::session::SessionStore;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_list_reads_legacy_superuser_flags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(USERS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "nombre": "Root", "apellido": "", "correo": "root@tienda.bo",
                 "rol": "CLIENTE", "is_superuser": "True", "is_active": true},
                {"id": 2, "nombre": "Eva", "apellido": "Rios", "correo": "eva@tienda.bo",
                 "rol": "ADMIN", "is_superuser": 0, "is_active": true}
            ])))
            .mount(&server)
            .await;

        let config = ClientConfig::with_api_base(&server.uri()).unwrap();
        let session = SessionStore::new(Arc::new(MemoryStore::new()));
        let accounts = AccountService::new(ApiClient::new(&config, session).unwrap());

        let users = accounts.list().await.unwrap();
        assert!(users[0].is_superuser.is_set());
        assert!(!users[1].is_superuser.is_set());
        assert_eq!(users[1].full_name(), "Eva Rios");
    }
}
