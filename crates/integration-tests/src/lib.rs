//! Integration tests for the Appliance Store console.
//!
//! The tests drive the client library against a [`wiremock`] backend with
//! session and cart state persisted to a temporary directory, so reopening
//! a [`Harness`] behaves like restarting the console.
//!
//! ```bash
//! cargo test -p appliance-store-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::sync::Arc;

use appliance_store_client::services::LOGIN_ENDPOINT;
use appliance_store_client::{ApiClient, CartStore, ClientConfig, FileStore, SessionStore};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock backend plus a state directory that outlives [`Harness`] handles.
pub struct TestBackend {
    pub server: MockServer,
    state: TempDir,
}

/// Client-side handles opened on the persisted state.
pub struct Harness {
    pub session: SessionStore,
    pub cart: CartStore,
    pub api: ApiClient,
}

impl TestBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            state: tempfile::tempdir().unwrap(),
        }
    }

    #[must_use]
    pub fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::with_api_base(&self.server.uri()).unwrap();
        config.state_dir = self.state.path().to_path_buf();
        config
    }

    /// Open fresh stores on the state directory, as a new console process would.
    #[must_use]
    pub fn open(&self) -> Harness {
        let config = self.config();
        let storage = Arc::new(FileStore::open(&config.state_dir).unwrap());
        let session = SessionStore::new(storage.clone());
        let cart = CartStore::load(storage);
        let api = ApiClient::new(&config, session.clone()).unwrap();
        Harness { session, cart, api }
    }

    /// Answer logins with a token and the given user profile.
    pub async fn mount_login(&self, user: Value) {
        Mock::given(method("POST"))
            .and(path(LOGIN_ENDPOINT))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({
                    "access": "tok-integration",
                    "refresh": "refresh-integration",
                    "usuario": user,
                })),
            )
            .mount(&self.server)
            .await;
    }
}

/// A customer profile as returned by the login endpoint.
#[must_use]
pub fn customer_user() -> Value {
    json!({"id": 21, "nombre": "Lucía", "apellido": "Mamani", "rol": "CLIENTE"})
}

/// An administrator profile as returned by the login endpoint.
#[must_use]
pub fn admin_user() -> Value {
    json!({"id": 1, "nombre": "Admin", "rol": "ADMIN", "is_superuser": false})
}

/// A catalog product in backend shape.
#[must_use]
pub fn product_json(id: i32, name: &str, price: &str, stock: u32) -> Value {
    json!({
        "id": id,
        "codigo_producto": format!("P-{id:03}"),
        "nombre": name,
        "precio_venta": price,
        "precio_compra": "0.00",
        "estado": "Disponible",
        "stock_actual": stock,
        "ano_garantia": 1,
        "categoria": 1,
    })
}
