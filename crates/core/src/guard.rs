//! Route guard: who may open which section of the console.
//!
//! The guard is a pure decision over the current [`Session`] and the roles a
//! section requires. Performing the redirect is the caller's job.

use crate::session::Session;
use crate::types::roles_match;

/// Route of the login screen.
pub const LOGIN_ROUTE: &str = "/login";

/// Landing route for authenticated users who lack the required role.
pub const DEFAULT_ROUTE: &str = "/";

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardDecision {
    /// The section may be rendered.
    Allow,
    /// Not authenticated: go to the login screen.
    RedirectToLogin,
    /// Authenticated but not authorized: go to the landing route.
    RedirectToDefault,
}

impl GuardDecision {
    /// Where to navigate, or `None` when access is allowed.
    #[must_use]
    pub const fn redirect_target(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin => Some(LOGIN_ROUTE),
            Self::RedirectToDefault => Some(DEFAULT_ROUTE),
        }
    }

    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decide whether `session` may open a section requiring `required_roles`.
///
/// 1. No token, or a token without a readable user: login.
/// 2. No roles required: allowed.
/// 3. Superuser: allowed.
/// 4. Role listed (case-insensitive): allowed, otherwise the landing route.
#[must_use]
pub fn guard<R: AsRef<str>>(session: &Session, required_roles: &[R]) -> GuardDecision {
    if !session.has_token() {
        return GuardDecision::RedirectToLogin;
    }
    let Some(user) = session.user.as_ref() else {
        return GuardDecision::RedirectToLogin;
    };

    if required_roles.is_empty() || user.is_superuser.is_set() {
        return GuardDecision::Allow;
    }

    let allowed = user.role.as_deref().is_some_and(|role| {
        required_roles
            .iter()
            .any(|wanted| roles_match(role, wanted.as_ref()))
    });

    if allowed {
        GuardDecision::Allow
    } else {
        GuardDecision::RedirectToDefault
    }
}
