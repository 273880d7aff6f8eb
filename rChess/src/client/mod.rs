//! HTTP client and configuration.

mod http;
mod interceptor;

pub use http::{HttpConfig, DEFAULT_BASE_URL, USER_AGENT};
pub use interceptor::AuthInterceptor;

use crate::api::{AuthApi, GameApi};
use crate::error::Result;
use crate::router::Navigator;
use crate::session::Session;
use http::{build_client, HttpExecutor};
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating ChessClient.
pub struct ChessClientBuilder {
    http_config: HttpConfig,
    session: Option<Session>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl std::fmt::Debug for ChessClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChessClientBuilder")
            .field("http_config", &self.http_config)
            .field("session", &self.session)
            .field("navigator", &self.navigator.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Default for ChessClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            http_config: HttpConfig::default(),
            session: None,
            navigator: None,
        }
    }

    /// Share a session with other components.
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Start with a token in a private in-memory session.
    pub fn token(mut self, token: impl AsRef<str>) -> Result<Self> {
        let session = Session::in_memory();
        session.set(token)?;
        self.session = Some(session);
        Ok(self)
    }

    /// Navigator told to show the login page after a 401.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Set base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.http_config.base_url = url.into();
        self
    }

    /// Set custom user agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.http_config.custom_user_agent = Some(ua.into());
        self
    }

    /// Set connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.connect_timeout = timeout;
        self
    }

    /// Set read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.read_timeout = timeout;
        self
    }

    /// Build ChessClient.
    pub fn build(self) -> Result<ChessClient> {
        self.http_config.resolve_url("")?;
        let http_client = build_client(&self.http_config)?;

        let mut interceptor = AuthInterceptor::new(self.session.unwrap_or_default());
        if let Some(navigator) = self.navigator {
            interceptor = interceptor.with_navigator(navigator);
        }

        Ok(ChessClient {
            inner: Arc::new(ChessClientInner {
                http: http_client,
                config: self.http_config,
                interceptor,
            }),
        })
    }
}

/// Internal client state.
pub(crate) struct ChessClientInner {
    pub http: reqwest::Client,
    pub config: HttpConfig,
    pub interceptor: AuthInterceptor,
}

impl ChessClientInner {
    /// Create HTTP executor.
    pub fn executor(&self) -> HttpExecutor<'_> {
        HttpExecutor::new(&self.http, &self.config, &self.interceptor)
    }

    /// Session shared with the interceptor.
    pub fn session(&self) -> &Session {
        self.interceptor.session()
    }
}

/// Client for the chess backend.
#[derive(Clone)]
pub struct ChessClient {
    pub(crate) inner: Arc<ChessClientInner>,
}

impl ChessClient {
    /// Create a new client builder.
    pub fn builder() -> ChessClientBuilder {
        ChessClientBuilder::new()
    }

    /// Get the account API.
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.inner.clone())
    }

    /// Get the game API.
    pub fn games(&self) -> GameApi {
        GameApi::new(self.inner.clone())
    }

    /// Session holding the credential.
    pub fn session(&self) -> &Session {
        self.inner.session()
    }

    /// Interceptor applied to every request.
    pub fn interceptor(&self) -> &AuthInterceptor {
        &self.inner.interceptor
    }

    /// Check if a credential is stored.
    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }
}

impl std::fmt::Debug for ChessClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChessClient")
            .field("authenticated", &self.is_authenticated())
            .field("base_url", &self.inner.config.base_url)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{header, serve};
    use super::*;
    use crate::router::{Router, ViewId};
    use crate::Error;

    #[test]
    fn test_client_builder() {
        let client = ChessClient::builder().build();
        assert!(client.is_ok());

        let client = client.unwrap();
        assert!(!client.is_authenticated());
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_with_token() {
        let client = ChessClient::builder().token("abc").unwrap().build().unwrap();
        assert!(client.is_authenticated());
        assert_eq!(client.session().get().as_deref(), Some("abc"));
    }

    #[test]
    fn test_bad_base_url() {
        let err = ChessClient::builder().base_url("not a url").build().unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    #[tokio::test]
    async fn test_request_carries_bearer() {
        let (base_url, mut requests) =
            serve(vec![(200, r#"{"valid": true, "username": "magnus"}"#)]).await;
        let client = ChessClient::builder()
            .base_url(base_url)
            .token("abc")
            .unwrap()
            .build()
            .unwrap();

        let status = client.auth().verify().await.unwrap();
        assert_eq!(status.username, "magnus");

        let request = requests.recv().await.unwrap();
        assert!(request.starts_with("GET /verify_token "));
        assert_eq!(header(&request, "authorization"), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_unauthorized_round_trip() {
        let (base_url, mut requests) = serve(vec![
            (401, r#"{"message": "Token is invalid!", "error": "Signature has expired"}"#),
            (401, r#"{"message": "Token is missing!"}"#),
        ])
        .await;

        let session = Session::in_memory();
        session.set("abc").unwrap();
        let router = Arc::new(Router::new(session.clone()));
        router.push("/game-history").unwrap();

        let client = ChessClient::builder()
            .base_url(base_url)
            .session(session.clone())
            .navigator(router.clone())
            .build()
            .unwrap();

        let err = client.games().history().await.unwrap_err();
        assert!(err.is_auth_error());
        assert!(err.to_string().contains("Signature has expired"));
        assert!(!session.is_authenticated());
        assert_eq!(router.current().unwrap().view(), ViewId::Login);

        let first = requests.recv().await.unwrap();
        assert_eq!(header(&first, "authorization"), Some("Bearer abc"));

        let err = client.games().history().await.unwrap_err();
        assert!(err.is_auth_error());
        let second = requests.recv().await.unwrap();
        assert_eq!(header(&second, "authorization"), None);
        assert_eq!(router.history(), vec!["/game-history", "/login", "/login"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_unauthorized() {
        let (base_url, _requests) = serve(vec![
            (401, r#"{"message": "Token is invalid!"}"#),
            (401, r#"{"message": "Token is invalid!"}"#),
            (401, r#"{"message": "Token is invalid!"}"#),
        ])
        .await;

        let session = Session::in_memory();
        session.set("abc").unwrap();
        let router = Arc::new(Router::new(session.clone()));
        router.push("/game-history").unwrap();

        let client = ChessClient::builder()
            .base_url(base_url)
            .session(session.clone())
            .navigator(router.clone())
            .build()
            .unwrap();

        let games = client.games();
        let (a, b, c) = tokio::join!(games.history(), games.history(), games.history());
        for outcome in [a, b, c] {
            assert!(outcome.unwrap_err().is_auth_error());
        }

        assert_eq!(session.get(), None);
        let history = router.history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0], "/game-history");
        assert!(history[1..].iter().all(|path| path == "/login"));
        assert_eq!(router.current().unwrap().view(), ViewId::Login);
    }

    #[tokio::test]
    async fn test_other_errors_leave_session() {
        let (base_url, _requests) = serve(vec![(404, r#"{"message": "游戏不存在或无权限访问"}"#)]).await;

        let session = Session::in_memory();
        session.set("abc").unwrap();
        let router = Arc::new(Router::new(session.clone()));
        router.push("/ai-chess").unwrap();

        let client = ChessClient::builder()
            .base_url(base_url)
            .session(session.clone())
            .navigator(router.clone())
            .build()
            .unwrap();

        let err = client.games().get("665f1c").await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
        assert_eq!(session.get().as_deref(), Some("abc"));
        assert_eq!(router.history(), vec!["/ai-chess"]);
    }
}
