//! Gateway error type.

use reqwest::StatusCode;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by [`crate::ApiClient`] and the services built on it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not match the expected schema.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The backend rejected the token. The stored session has been cleared.
    #[error("Unauthorized")]
    Unauthorized {
        /// Whether the caller should send the user to the login route.
        redirect_to_login: bool,
    },

    /// Any other non-success status.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    /// Login succeeded at the HTTP level but returned no access token.
    #[error("No access token in login response")]
    MissingAccessToken,

    /// Login returned a token but no user profile.
    #[error("No user profile in login response")]
    MissingUser,

    /// The operation needs a logged-in session.
    #[error("Not logged in")]
    NotLoggedIn,

    /// The request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Persisting session state failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Whether the error came from a 401.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status, when the backend answered.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }
}

/// Human-readable message for a failed response.
///
/// Tries `detail`, then `error`, then per-field validation arrays
/// (`field: msg1 msg2; other: msg`), falling back to `HTTP <status>`.
#[must_use]
pub fn error_message(status: StatusCode, body: &[u8]) -> String {
    let fallback = || format!("HTTP {}", status.as_u16());

    let Ok(serde_json::Value::Object(map)) = serde_json::from_slice::<serde_json::Value>(body)
    else {
        return fallback();
    };

    for key in ["detail", "error"] {
        if let Some(message) = map.get(key).and_then(serde_json::Value::as_str)
            && !message.trim().is_empty()
        {
            return message.to_string();
        }
    }

    let fields: Vec<String> = map
        .iter()
        .filter_map(|(field, value)| {
            let messages: Vec<&str> = match value {
                serde_json::Value::Array(items) => {
                    items.iter().filter_map(serde_json::Value::as_str).collect()
                }
                serde_json::Value::String(s) => vec![s.as_str()],
                _ => Vec::new(),
            };
            (!messages.is_empty()).then(|| format!("{field}: {}", messages.join(" ")))
        })
        .collect();

    if fields.is_empty() {
        fallback()
    } else {
        fields.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_wins() {
        let body = br#"{"detail": "Credenciales invalidas", "error": "x"}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "Credenciales invalidas"
        );
    }

    #[test]
    fn test_error_key() {
        let body = br#"{"error": "Stock insuficiente"}"#;
        assert_eq!(
            error_message(StatusCode::CONFLICT, body),
            "Stock insuficiente"
        );
    }

    #[test]
    fn test_field_errors_joined() {
        let body = br#"{"correo": ["Ya existe.", "Invalido."], "nombre": ["Requerido."]}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "correo: Ya existe. Invalido.; nombre: Requerido."
        );
    }

    #[test]
    fn test_fallback_to_status() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>"),
            "HTTP 500"
        );
        assert_eq!(error_message(StatusCode::NOT_FOUND, b""), "HTTP 404");
        assert_eq!(error_message(StatusCode::BAD_REQUEST, b"{}"), "HTTP 400");
    }
}
