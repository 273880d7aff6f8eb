//! Request and response hooks for credential handling.

use reqwest::{header, Request, StatusCode};
use std::sync::Arc;

use crate::error::Result;
use crate::router::{Navigator, LOGIN_PATH};
use crate::session::Session;

/// Attaches the bearer token and reacts to authorization failures.
#[derive(Clone)]
pub struct AuthInterceptor {
    session: Session,
    navigator: Option<Arc<dyn Navigator>>,
    login_path: String,
}

impl AuthInterceptor {
    /// Create an interceptor over a session.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            navigator: None,
            login_path: LOGIN_PATH.to_owned(),
        }
    }

    /// Navigator told to show the login page after a 401.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Session this interceptor reads and clears.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Attach `Authorization: Bearer <token>` when a token is stored.
    ///
    /// Never fails: a token that cannot form a header value leaves the
    /// request untouched.
    pub fn prepare_request(&self, mut request: Request) -> Request {
        let Some(token) = self.session.get() else {
            return request;
        };

        match header::HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(header::AUTHORIZATION, value);
            }
            Err(e) => {
                log::warn!("stored token is not a valid header value, sending without it: {}", e);
            }
        }
        request
    }

    /// Observe the outcome of a request and hand it back unchanged.
    ///
    /// A 401 clears the session and navigates to the login page first.
    pub fn handle_response<T>(&self, outcome: Result<T>) -> Result<T> {
        if let Err(e) = &outcome {
            if e.status() == Some(StatusCode::UNAUTHORIZED) {
                self.on_unauthorized();
            }
        }
        outcome
    }

    fn on_unauthorized(&self) {
        log::info!("server rejected credential, clearing session");
        if let Err(e) = self.session.clear() {
            log::warn!("failed to clear session: {}", e);
        }
        if let Some(navigator) = &self.navigator {
            navigator.navigate(&self.login_path);
        }
    }
}

impl std::fmt::Debug for AuthInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthInterceptor")
            .field("authenticated", &self.session.is_authenticated())
            .field("navigator", &self.navigator.is_some())
            .finish()
    }
}
