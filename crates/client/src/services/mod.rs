//! Typed wrappers over the backend resources.
//!
//! Each service owns a clone of the [`crate::ApiClient`] and maps one REST
//! resource family to request and response types from
//! `appliance-store-core`.

pub mod accounts;
pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod customers;
pub mod notices;
pub mod sales;

pub use accounts::AccountService;
pub use analytics::{AnalyticsService, Forecast};
pub use auth::{AuthService, LOGIN_ENDPOINT, LoginOutcome};
pub use catalog::CatalogService;
pub use checkout::{CheckoutContact, CheckoutError, CheckoutReceipt, CheckoutService};
pub use customers::CustomerService;
pub use notices::NoticeService;
pub use sales::{RegisterSaleError, SaleService, receipt_file_name};
