//! Authenticated session model.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{SuperuserFlag, UserId, roles_match};
use crate::types::{ADMIN_ROLE, ADMIN_ROLE_LABEL};

/// Profile of the logged-in user as returned by the login endpoint.
///
/// Only the fields the console reads are typed; everything else the backend
/// sends (`nombre`, `correo`, ...) is kept in `profile` so the record
/// round-trips through storage unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    #[serde(rename = "rol", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub is_superuser: SuperuserFlag,
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

impl SessionUser {
    /// Whether the profile grants the administrative console.
    ///
    /// True for the `ADMIN` role, the `Administrador` label, or a superuser.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_superuser.is_set()
            || self
                .role
                .as_deref()
                .is_some_and(|r| roles_match(r, ADMIN_ROLE) || roles_match(r, ADMIN_ROLE_LABEL))
    }

    /// A string field from the untyped part of the profile.
    #[must_use]
    pub fn profile_str(&self, key: &str) -> Option<&str> {
        self.profile.get(key).and_then(serde_json::Value::as_str)
    }
}

/// The token and user currently held by the browser profile.
#[derive(Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

impl Session {
    /// A session with neither token nor user.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            token: None,
            user: None,
        }
    }

    /// Whether a non-empty token is present.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_session_user_keeps_unknown_fields() {
        let raw = json!({
            "id": 5,
            "rol": "CLIENTE",
            "is_superuser": 0,
            "nombre": "Ana",
            "correo": "ana@tienda.bo"
        });
        let user: SessionUser = serde_json::from_value(raw).unwrap();
        assert_eq!(user.profile_str("nombre"), Some("Ana"));
        assert!(!user.is_admin());

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["correo"], "ana@tienda.bo");
        assert_eq!(back["is_superuser"], false);
    }

    #[test]
    fn test_is_admin_variants() {
        let user = |role: &str, su: bool| SessionUser {
            id: UserId::new(1),
            role: Some(role.to_owned()),
            is_superuser: SuperuserFlag::new(su),
            profile: serde_json::Map::new(),
        };
        assert!(user("ADMIN", false).is_admin());
        assert!(user("Administrador", false).is_admin());
        assert!(user("CLIENTE", true).is_admin());
        assert!(!user("VENDEDOR", false).is_admin());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session {
            token: Some("secret-token".into()),
            user: None,
        };
        assert!(!format!("{session:?}").contains("secret-token"));
    }
}
