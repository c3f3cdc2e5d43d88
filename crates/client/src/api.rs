//! Authenticated REST gateway for the store backend.
//!
//! All services go through [`ApiClient`]. It resolves paths against the
//! configured base URL, attaches the bearer token from the session store,
//! decodes JSON bodies into typed responses, and turns failures into
//! [`ApiError`]. A 401 clears the stored session.
//!
//! There are no retries and no request deduplication.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, error_message};
use crate::services::auth::LOGIN_ENDPOINT;
use crate::session::SessionStore;

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the store REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and session store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

/// Body-less requests still need a concrete body type.
const NO_BODY: Option<&()> = None;

impl ApiClient {
    /// Create a client for `config.api_base`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client fails to build.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client: builder.build()?,
                base_url: config.api_base.trim_end_matches('/').to_string(),
                session,
            }),
        })
    }

    /// Session store the client reads tokens from.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Absolute URL for `path`.
    ///
    /// `http(s)://` URLs are used as-is; anything else is appended to the
    /// base URL.
    #[must_use]
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{path}", self.inner.base_url)
        } else {
            format!("{}/{path}", self.inner.base_url)
        }
    }

    // -------------------------------------------------------------------------
    // Verbs
    // -------------------------------------------------------------------------

    /// `GET path` decoded as `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self), fields(method = "GET"))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_with_query(path, &[]).await
    }

    /// `GET path?query` decoded as `T`. Pairs with empty values are skipped.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, query), fields(method = "GET"))]
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let bytes = self
            .execute(Method::GET, path, query, NO_BODY, true)
            .await?;
        decode(&bytes)
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, body), fields(method = "POST"))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self
            .execute(Method::POST, path, &[], Some(body), true)
            .await?;
        decode(&bytes)
    }

    /// `POST path` without a body, for action endpoints.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self), fields(method = "POST"))]
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let bytes = self
            .execute(Method::POST, path, &[], NO_BODY, true)
            .await?;
        decode(&bytes)
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, body), fields(method = "PUT"))]
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self
            .execute(Method::PUT, path, &[], Some(body), true)
            .await?;
        decode(&bytes)
    }

    /// `PATCH path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self, body), fields(method = "PATCH"))]
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self
            .execute(Method::PATCH, path, &[], Some(body), true)
            .await?;
        decode(&bytes)
    }

    /// `DELETE path`. Most endpoints answer 204, which decodes as `()`.
    ///
    /// # Errors
    ///
    /// See [`ApiError`].
    #[instrument(skip(self), fields(method = "DELETE"))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let bytes = self
            .execute(Method::DELETE, path, &[], NO_BODY, true)
            .await?;
        decode(&bytes)
    }

    /// `GET path` returning the raw payload (PDF receipts).
    ///
    /// # Errors
    ///
    /// See [`ApiError`]. Failure messages are always `HTTP <status>`.
    #[instrument(skip(self), fields(method = "GET"))]
    pub async fn get_file(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        self.execute(Method::GET, path, &[], NO_BODY, false).await
    }

    // -------------------------------------------------------------------------
    // Transport
    // -------------------------------------------------------------------------

    fn build_url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.resolve_url(path))?;
        let mut pairs = query.iter().filter(|(_, v)| !v.trim().is_empty()).peekable();
        if pairs.peek().is_some() {
            let mut serializer = url.query_pairs_mut();
            for (key, value) in pairs {
                serializer.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        json: bool,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.build_url(path, query)?;
        let mut request = self.inner.client.request(method, url);
        if json {
            request = request.header(CONTENT_TYPE, "application/json");
        }
        if let Some(token) = self.inner.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.inner.session.clear_auth() {
                warn!(error = %e, "Failed to clear rejected session");
            }
            let redirect_to_login = !is_login_path(path);
            warn!(path, redirect_to_login, "Backend rejected credentials");
            return Err(ApiError::Unauthorized { redirect_to_login });
        }

        if !status.is_success() {
            let message = if json {
                error_message(status, &bytes)
            } else {
                format!("HTTP {}", status.as_u16())
            };
            debug!(status = %status, message = %message, "API call failed");
            return Err(ApiError::Status { status, message });
        }

        Ok(bytes.to_vec())
    }
}

fn is_login_path(path: &str) -> bool {
    path.contains("/login") || path.contains(LOGIN_ENDPOINT)
}

/// Decode a success body; an empty body is JSON `null`.
fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::storage::MemoryStore;

    fn test_client(base: &str) -> ApiClient {
        let config = ClientConfig::with_api_base(base).unwrap();
        let session = SessionStore::new(Arc::new(MemoryStore::new()));
        ApiClient::new(&config, session).unwrap()
    }

    #[test]
    fn test_resolve_url() {
        let client = test_client("http://127.0.0.1:8000/");
        assert_eq!(
            client.resolve_url("/api/productos/"),
            "http://127.0.0.1:8000/api/productos/"
        );
        assert_eq!(
            client.resolve_url("api/productos/"),
            "http://127.0.0.1:8000/api/productos/"
        );
        assert_eq!(
            client.resolve_url("https://cdn.tienda.bo/x.json"),
            "https://cdn.tienda.bo/x.json"
        );
    }

    #[tokio::test]
    async fn test_sends_bearer_and_json_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/productos/"))
            .and(header("authorization", "Bearer jwt-123"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.session().set_token("jwt-123").unwrap();
        let body: serde_json::Value = client.get("/api/productos/").await.unwrap();
        assert_eq!(body, json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn test_query_skips_empty_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ventas/"))
            .and(query_param("cliente", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let query = [("cliente", "4".to_string()), ("fecha_min", String::new())];
        let sales: Vec<serde_json::Value> =
            client.get_with_query("/api/ventas/", &query).await.unwrap();
        assert!(sales.is_empty());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("cliente=4"));
    }

    #[tokio::test]
    async fn test_empty_body_decodes_as_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/categorias/3/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let _: () = client.delete("/api/categorias/3/").await.unwrap();
        let value: Option<serde_json::Value> = client.delete("/api/categorias/3/").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/categorias/"))
            .and(body_json(json!({"nombre": "Linea blanca", "estado": true})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"id": 9, "nombre": "Linea blanca", "estado": true})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let created: serde_json::Value = client
            .post(
                "/api/categorias/",
                &json!({"nombre": "Linea blanca", "estado": true}),
            )
            .await
            .unwrap();
        assert_eq!(created["id"], 9);
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.session().set_token("stale").unwrap();

        let err = client
            .get::<serde_json::Value>("/api/ventas/")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Unauthorized {
                redirect_to_login: true
            }
        ));
        assert!(!client.session().is_logged_in());
    }

    #[tokio::test]
    async fn test_unauthorized_login_does_not_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_ENDPOINT))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .post::<_, serde_json::Value>(LOGIN_ENDPOINT, &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Unauthorized {
                redirect_to_login: false
            }
        ));
    }

    #[tokio::test]
    async fn test_error_message_from_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"correo": ["Ya registrado."]})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .post::<_, serde_json::Value>("/api/clientes/", &json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "correo: Ya registrado.");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .get::<Vec<serde_json::Value>>("/api/productos/")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_get_file_returns_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ventas/5/comprobante/"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/ventas/6/comprobante/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "x"})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let pdf = client.get_file("/api/ventas/5/comprobante/").await.unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let err = client
            .get_file("/api/ventas/6/comprobante/")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404");
    }
}
