//! Pre-navigation guards.

use super::route::{Location, LOGIN_PATH};
use crate::session::Session;

/// A navigation being evaluated, before it is committed.
#[derive(Debug, Clone, Copy)]
pub struct NavigationIntent<'a> {
    /// Location the router is currently at.
    pub from: Option<&'a Location>,
    /// Requested location.
    pub to: &'a Location,
}

/// Result of running a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Proceed to the requested location.
    Allow,
    /// Discard the requested location and go elsewhere.
    Redirect(String),
}

/// Synchronous check run before a navigation is committed.
pub trait NavigationGuard: Send + Sync {
    /// Decide whether `intent` may proceed.
    fn check(&self, intent: &NavigationIntent<'_>) -> GuardOutcome;
}

impl<F> NavigationGuard for F
where
    F: Fn(&NavigationIntent<'_>) -> GuardOutcome + Send + Sync,
{
    fn check(&self, intent: &NavigationIntent<'_>) -> GuardOutcome {
        self(intent)
    }
}

/// Sends visitors without a credential to the login page.
#[derive(Debug, Clone)]
pub struct AuthGuard {
    session: Session,
    login_path: String,
}

impl AuthGuard {
    /// Create a guard that redirects to `/login`.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            login_path: LOGIN_PATH.to_owned(),
        }
    }

    /// Redirect somewhere other than `/login`.
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }
}

impl NavigationGuard for AuthGuard {
    fn check(&self, intent: &NavigationIntent<'_>) -> GuardOutcome {
        if intent.to.requires_auth() && !self.session.is_authenticated() {
            GuardOutcome::Redirect(self.login_path.clone())
        } else {
            GuardOutcome::Allow
        }
    }
}
