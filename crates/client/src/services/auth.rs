//! Login, registration and password recovery.

use appliance_store_core::customer::Registration;
use appliance_store_core::{Email, SessionUser};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::storage::StorageError;

/// Token endpoint. A 401 here means bad credentials, not an expired session.
pub const LOGIN_ENDPOINT: &str = "/api/acceso_seguridad/token/";

const REGISTER_ENDPOINT: &str = "/api/acceso_seguridad/registro/";
const RESET_REQUEST_ENDPOINT: &str = "/api/acceso_seguridad/solicitar-recuperacion/";
const RESET_CONFIRM_ENDPOINT: &str = "/api/acceso_seguridad/confirmar-recuperacion/";

#[derive(Serialize)]
struct LoginRequest<'a> {
    correo: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    access: Option<String>,
    #[serde(default)]
    usuario: Option<SessionUser>,
}

#[derive(Serialize)]
struct ResetRequest<'a> {
    correo: &'a str,
}

#[derive(Serialize)]
struct ResetConfirmation<'a> {
    token: &'a str,
    nueva_password: &'a str,
    confirmar_password: &'a str,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: SessionUser,
    /// Whether the user may open the administrative console.
    pub is_admin: bool,
}

/// Authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange credentials for a token and store the session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingAccessToken` if the backend answers without
    /// a token, `ApiError::Unauthorized` for bad credentials, or any
    /// transport error.
    #[instrument(skip(self, email, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<LoginOutcome, ApiError> {
        let response: LoginResponse = self
            .api
            .post(
                LOGIN_ENDPOINT,
                &LoginRequest {
                    correo: email.as_str(),
                    password: password.expose_secret(),
                },
            )
            .await?;

        let token = response
            .access
            .filter(|t| !t.is_empty())
            .ok_or(ApiError::MissingAccessToken)?;
        let user = response.usuario.ok_or(ApiError::MissingUser)?;

        let session = self.api.session();
        session.set_token(&token)?;
        session.set_user(&user)?;

        let is_admin = user.is_admin();
        info!(user_id = %user.id, is_admin, "Logged in");
        Ok(LoginOutcome { user, is_admin })
    }

    /// Drop the stored session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entries cannot be removed.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.api.session().clear_auth()?;
        info!("Logged out");
        Ok(())
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with the backend's validation message.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<serde_json::Value, ApiError> {
        self.api.post(REGISTER_ENDPOINT, registration).await
    }

    /// Ask the backend to email a recovery token.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, email), fields(email = %email))]
    pub async fn request_password_reset(&self, email: &Email) -> Result<serde_json::Value, ApiError> {
        self.api
            .post(
                RESET_REQUEST_ENDPOINT,
                &ResetRequest {
                    correo: email.as_str(),
                },
            )
            .await
    }

    /// Set a new password using a recovery token.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]. Mismatched passwords are reported by the backend.
    #[instrument(skip_all)]
    pub async fn confirm_password_reset(
        &self,
        token: &str,
        new_password: &SecretString,
        confirmation: &SecretString,
    ) -> Result<serde_json::Value, ApiError> {
        self.api
            .post(
                RESET_CONFIRM_ENDPOINT,
                &ResetConfirmation {
                    token,
                    nueva_password: new_password.expose_secret(),
                    confirmar_password: confirmation.expose_secret(),
                },
            )
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::ClientConfig;
    use crate::session::SessionStore;
    use crate::storage::MemoryStore;

    fn service(base: &str) -> AuthService {
        let config = ClientConfig::with_api_base(base).unwrap();
        let session = SessionStore::new(Arc::new(MemoryStore::new()));
        AuthService::new(ApiClient::new(&config, session).unwrap())
    }

    fn credentials() -> (Email, SecretString) {
        (
            Email::parse("ana@tienda.bo").unwrap(),
            SecretString::from("clave-segura"),
        )
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_ENDPOINT))
            .and(body_json(json!({"correo": "ana@tienda.bo", "password": "clave-segura"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access": "jwt-abc",
                "usuario": {"id": 3, "rol": "Administrador", "nombre": "Ana"}
            })))
            .mount(&server)
            .await;

        let auth = service(&server.uri());
        let (email, password) = credentials();
        let outcome = auth.login(&email, &password).await.unwrap();

        assert!(outcome.is_admin);
        assert_eq!(auth.api.session().token().as_deref(), Some("jwt-abc"));
        assert_eq!(
            auth.api.session().user().unwrap().profile_str("nombre"),
            Some("Ana")
        );

        auth.logout().unwrap();
        assert!(!auth.api.session().is_logged_in());
    }

    #[tokio::test]
    async fn test_login_without_token_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_ENDPOINT))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"usuario": {"id": 3}})),
            )
            .mount(&server)
            .await;

        let auth = service(&server.uri());
        let (email, password) = credentials();
        let err = auth.login(&email, &password).await.unwrap_err();
        assert!(matches!(err, ApiError::MissingAccessToken));
        assert!(!auth.api.session().is_logged_in());
    }

    #[tokio::test]
    async fn test_customer_login_is_not_admin() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_ENDPOINT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access": "jwt",
                "usuario": {"id": 8, "rol": "CLIENTE", "is_superuser": false}
            })))
            .mount(&server)
            .await;

        let auth = service(&server.uri());
        let (email, password) = credentials();
        assert!(!auth.login(&email, &password).await.unwrap().is_admin);
    }

    #[tokio::test]
    async fn test_confirm_password_reset_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(RESET_CONFIRM_ENDPOINT))
            .and(body_json(json!({
                "token": "tok",
                "nueva_password": "nueva",
                "confirmar_password": "nueva"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"mensaje": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let auth = service(&server.uri());
        let secret = SecretString::from("nueva");
        auth.confirm_password_reset("tok", &secret, &secret)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_register_posts_customer_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(REGISTER_ENDPOINT))
            .and(body_json(json!({
                "nombre": "Ana",
                "apellido": "Pérez",
                "correo": "ana@tienda.bo",
                "password": "clave-segura",
                "rol": "CLIENTE"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 30})))
            .expect(1)
            .mount(&server)
            .await;

        let registration = Registration {
            first_name: "Ana".into(),
            last_name: "Pérez".into(),
            email: Email::parse("ana@tienda.bo").unwrap(),
            password: "clave-segura".into(),
            role: appliance_store_core::CUSTOMER_ROLE.to_owned(),
        };
        let created = service(&server.uri()).register(&registration).await.unwrap();
        assert_eq!(created["id"], 30);
    }
}
