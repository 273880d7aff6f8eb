//! HTTP client configuration and request execution.

use crate::error::{Error, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use url::Url;

use super::interceptor::AuthInterceptor;

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("rchess/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL for API requests.
    pub base_url: String,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Read timeout.
    pub read_timeout: Duration,
    /// Custom user agent.
    pub custom_user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(20),
            custom_user_agent: None,
        }
    }
}

impl HttpConfig {
    /// User agent to send.
    pub fn user_agent(&self) -> &str {
        self.custom_user_agent.as_deref().unwrap_or(USER_AGENT)
    }

    /// Resolve a relative API path to a full URL.
    pub fn resolve_url(&self, api: &str) -> Result<Url> {
        if api.starts_with("http://") || api.starts_with("https://") {
            return Url::parse(api).map_err(Error::Url);
        }

        let base = if self.base_url.ends_with('/') {
            Url::parse(&self.base_url)
        } else {
            Url::parse(&format!("{}/", self.base_url))
        };

        base.and_then(|b| b.join(api.trim_start_matches('/')))
            .map_err(Error::Url)
    }
}

/// Build a reqwest client with the given configuration.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .https_only(false)
        .connect_timeout(config.connect_timeout)
        .read_timeout(config.read_timeout)
        .user_agent(config.user_agent())
        .gzip(true)
        .build()
        .map_err(Error::Network)
}

/// Error body returned by the backend.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// HTTP request executor.
pub struct HttpExecutor<'a> {
    client: &'a Client,
    config: &'a HttpConfig,
    interceptor: &'a AuthInterceptor,
}

impl<'a> HttpExecutor<'a> {
    /// Create a new executor.
    pub fn new(
        client: &'a Client,
        config: &'a HttpConfig,
        interceptor: &'a AuthInterceptor,
    ) -> Self {
        Self {
            client,
            config,
            interceptor,
        }
    }

    fn build_request(&self, method: Method, api: &str) -> Result<RequestBuilder> {
        let url = self.config.resolve_url(api)?;
        Ok(self.client.request(method, url))
    }

    /// Execute a GET request and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, api: &str) -> Result<T> {
        let request = self.build_request(Method::GET, api)?;
        self.execute(request).await
    }

    /// Execute a POST request with a JSON body and decode the JSON reply.
    pub async fn post_json<B, T>(&self, api: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(Method::POST, api)?.json(body);
        self.execute(request).await
    }

    /// Execute a POST request without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, api: &str) -> Result<T> {
        let request = self
            .build_request(Method::POST, api)?
            .json(&serde_json::Map::new());
        self.execute(request).await
    }

    /// Run a request through both interceptor hooks.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let outcome = self.send(request).await;
        self.interceptor.handle_response(outcome)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = request.build().map_err(Error::Network)?;
        let request = self.interceptor.prepare_request(request);

        log::debug!("{} {}", request.method(), request.url());

        let response = self.client.execute(request).await.map_err(Error::Network)?;
        let text = self.handle_response(response).await?;

        serde_json::from_str(&text).map_err(|e| Error::parse(format!("{}: {}", e, text)))
    }

    /// Read the body, turning non-success statuses into errors.
    async fn handle_response(&self, response: Response) -> Result<String> {
        let status = response.status();
        let text = response.text().await.map_err(Error::Network)?;

        if !status.is_success() {
            return Err(Error::status_error(status, error_message(status, &text)));
        }

        Ok(text)
    }
}

/// Extract a readable message from an error body.
fn error_message(status: reqwest::StatusCode, text: &str) -> String {
    let fallback = || status.canonical_reason().unwrap_or("Unknown error").to_owned();

    match serde_json::from_str::<ErrorBody>(text) {
        Ok(ErrorBody {
            message: Some(message),
            error: Some(detail),
        }) => format!("{} ({})", message, detail),
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_resolve_url() {
        let config = HttpConfig::default();

        let url = config.resolve_url("game_history").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/game_history");

        let url = config.resolve_url("/game/665f1c").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/game/665f1c");
    }

    #[test]
    fn test_resolve_absolute_url() {
        let config = HttpConfig::default();
        let url = config.resolve_url("https://example.com/verify_token").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_resolve_url_with_base_path() {
        let config = HttpConfig {
            base_url: "http://chess.local/api".into(),
            ..HttpConfig::default()
        };
        let url = config.resolve_url("start_game").unwrap();
        assert_eq!(url.as_str(), "http://chess.local/api/start_game");
    }

    #[test]
    fn test_user_agent() {
        let mut config = HttpConfig::default();
        assert!(config.user_agent().starts_with("rchess/"));

        config.custom_user_agent = Some("bot".into());
        assert_eq!(config.user_agent(), "bot");
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, r#"{"message": "Token is missing!"}"#),
            "Token is missing!"
        );
        assert_eq!(
            error_message(
                StatusCode::UNAUTHORIZED,
                r#"{"message": "Token is invalid!", "error": "Signature has expired"}"#
            ),
            "Token is invalid! (Signature has expired)"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "<html>"), "Bad Gateway");
    }
}
