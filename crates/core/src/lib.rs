//! Appliance Store Core - Shared domain types.
//!
//! This crate provides the types used by the console client and CLI:
//!
//! - [`types`] - Newtype IDs, email, money helpers, roles and statuses
//! - [`catalog`] - Categories, products, warehouses and stock entries
//! - [`customer`] - Customers and staff accounts
//! - [`cart`] - Cart state and its reducer
//! - [`session`] and [`guard`] - Authenticated session and route guard
//! - [`sale`] - Sales history and counter-sale drafts
//! - [`notice`] - Customer notices
//! - [`analytics`] - Forecast and trend series
//! - [`pagination`] - Client-side paging
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage, no HTTP clients. State that has to be persisted or shared lives in
//! `appliance-store-client`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod customer;
pub mod guard;
pub mod notice;
pub mod pagination;
pub mod sale;
pub mod session;
pub mod types;

pub use cart::{CartAction, CartLineItem, CartState, ProductRef};
pub use guard::{DEFAULT_ROUTE, GuardDecision, LOGIN_ROUTE, guard};
pub use session::{Session, SessionUser};
pub use types::*;
