//! Auth session store: the bearer token and the logged-in user profile.

use std::sync::Arc;

use appliance_store_core::{Session, SessionUser};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key of the JSON-encoded user profile.
pub const USER_KEY: &str = "user";

/// Reads and writes the session entries of a [`KeyValueStore`].
///
/// Cheap to clone; clones share the same storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("logged_in", &self.is_logged_in())
            .finish()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Store the bearer token.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the token cannot be persisted.
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_item(TOKEN_KEY, token)
    }

    /// The stored token, if any. Unreadable storage counts as no token.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session token");
                None
            }
        }
    }

    /// Store the user profile as JSON.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be persisted.
    pub fn set_user(&self, user: &SessionUser) -> Result<(), StorageError> {
        let json = serde_json::to_string(user)?;
        self.storage.set_item(USER_KEY, &json)
    }

    /// The stored user. Missing, unreadable or malformed entries yield `None`.
    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        let raw = self.storage.get_item(USER_KEY).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed stored user");
                None
            }
        }
    }

    /// Remove both the token and the user.
    ///
    /// # Errors
    ///
    /// Returns the first `StorageError`; both removals are always attempted.
    pub fn clear_auth(&self) -> Result<(), StorageError> {
        let token = self.storage.remove_item(TOKEN_KEY);
        let user = self.storage.remove_item(USER_KEY);
        token.and(user)
    }

    /// Current session as seen by the route guard.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        Session {
            token: self.token(),
            user: self.user(),
        }
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }
}
