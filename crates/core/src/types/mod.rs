//! Core types for the Appliance Store console.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use money::{format_amount, line_total, sum_amounts};
pub use role::{ADMIN_ROLE, ADMIN_ROLE_LABEL, CUSTOMER_ROLE, SuperuserFlag, roles_match};
pub use status::*;
