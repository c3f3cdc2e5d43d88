//! Staff roles and the superuser flag.
//!
//! Roles are free-form strings owned by the backend (`ADMIN`, `Administrador`,
//! `CLIENTE`, ...). Comparisons are case-insensitive everywhere.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Role required by the administrative console sections.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Spanish label some backend rows use for administrators.
pub const ADMIN_ROLE_LABEL: &str = "Administrador";

/// Role assigned to storefront customers.
pub const CUSTOMER_ROLE: &str = "CLIENTE";

/// Compare two role names ignoring case.
#[must_use]
pub fn roles_match(a: &str, b: &str) -> bool {
    a.trim().to_uppercase() == b.trim().to_uppercase()
}

/// Superuser flag as stored in the user profile.
///
/// The backend and older stored profiles encode it as a boolean, the number
/// `1`, or the string `"true"` in any case. Anything else is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SuperuserFlag(bool);

impl SuperuserFlag {
    /// Create a flag from a boolean.
    #[must_use]
    pub const fn new(value: bool) -> Self {
        Self(value)
    }

    /// Whether the flag is set.
    #[must_use]
    pub const fn is_set(self) -> bool {
        self.0
    }

    /// Interpret a raw JSON value with the accepted truthy encodings.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        let set = match value {
            serde_json::Value::Bool(b) => *b,
            serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| (f - 1.0).abs() < f64::EPSILON),
            serde_json::Value::String(s) => s.eq_ignore_ascii_case("true"),
            _ => false,
        };
        Self(set)
    }
}

impl From<bool> for SuperuserFlag {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl Serialize for SuperuserFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

impl<'de> Deserialize<'de> for SuperuserFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}
