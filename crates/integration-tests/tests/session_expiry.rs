//! A 401 from any endpoint ends the persisted session.

#![allow(clippy::unwrap_used)]

use appliance_store_client::ApiError;
use appliance_store_client::services::{AuthService, SaleService};
use appliance_store_core::sale::SaleFilters;
use appliance_store_core::{ADMIN_ROLE, Email, GuardDecision, LOGIN_ROUTE, guard};
use appliance_store_integration_tests::{TestBackend, admin_user, customer_user};
use secrecy::SecretString;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

async fn login(backend: &TestBackend) {
    let harness = backend.open();
    AuthService::new(harness.api)
        .login(
            &Email::parse("admin@tienda.bo").unwrap(),
            &SecretString::from("secreto"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unauthorized_response_clears_session_on_disk() {
    let backend = TestBackend::start().await;
    backend.mount_login(admin_user()).await;
    Mock::given(method("GET"))
        .and(path("/api/ventas/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&backend.server)
        .await;
    login(&backend).await;

    let harness = backend.open();
    assert_eq!(
        guard(&harness.session.snapshot(), &[ADMIN_ROLE]),
        GuardDecision::Allow
    );

    let err = SaleService::new(harness.api.clone())
        .list(&SaleFilters::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Unauthorized {
            redirect_to_login: true
        }
    ));

    let reopened = backend.open();
    assert!(!reopened.session.is_logged_in());
    let decision = guard(&reopened.session.snapshot(), &[ADMIN_ROLE]);
    assert_eq!(decision, GuardDecision::RedirectToLogin);
    assert_eq!(decision.redirect_target(), Some(LOGIN_ROUTE));
}

#[tokio::test]
async fn test_customer_is_sent_back_from_admin_sections() {
    let backend = TestBackend::start().await;
    backend.mount_login(customer_user()).await;
    login(&backend).await;

    let session = backend.open().session.snapshot();
    assert_eq!(guard(&session, &[ADMIN_ROLE]), GuardDecision::RedirectToDefault);
    assert_eq!(guard::<&str>(&session, &[]), GuardDecision::Allow);
}

#[tokio::test]
async fn test_logout_then_restart_is_anonymous() {
    let backend = TestBackend::start().await;
    backend.mount_login(admin_user()).await;
    login(&backend).await;

    let harness = backend.open();
    AuthService::new(harness.api.clone()).logout().unwrap();
    assert!(backend.open().session.user().is_none());
}
