//! Account API.

use std::sync::Arc;

use crate::{
    client::ChessClientInner,
    error::{Error, Result},
    models::{Credentials, LoginReply, MessageReply, TokenStatus},
};

/// API for registration, login and session checks.
pub struct AuthApi {
    client: Arc<ChessClientInner>,
}

impl AuthApi {
    pub(crate) fn new(client: Arc<ChessClientInner>) -> Self {
        Self { client }
    }

    /// Create an account.
    pub async fn register(&self, username: &str, password: &str) -> Result<MessageReply> {
        let credentials = credentials(username, password)?;
        self.client
            .executor()
            .post_json("register", &credentials)
            .await
    }

    /// Log in and store the returned token in the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginReply> {
        let credentials = credentials(username, password)?;
        let reply: LoginReply = self
            .client
            .executor()
            .post_json("login", &credentials)
            .await?;

        if reply.token.is_empty() {
            return Err(Error::missing("token"));
        }
        self.client.session().set(&reply.token)?;
        log::info!("logged in as {}", username);

        Ok(reply)
    }

    /// Ask the backend whether the stored token is still valid.
    pub async fn verify(&self) -> Result<TokenStatus> {
        self.require_session()?;
        self.client.executor().get_json("verify_token").await
    }

    /// Forget the stored token.
    pub fn logout(&self) -> Result<()> {
        self.client.session().clear()
    }

    fn require_session(&self) -> Result<()> {
        if self.client.session().is_authenticated() {
            Ok(())
        } else {
            Err(Error::AuthRequired)
        }
    }
}

fn credentials(username: &str, password: &str) -> Result<Credentials> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(Error::invalid("username and password must not be empty"));
    }
    Ok(Credentials {
        username: username.trim().to_owned(),
        password: password.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::serve;
    use crate::ChessClient;

    #[test]
    fn test_credentials_validation() {
        assert!(credentials("", "pw").is_err());
        assert!(credentials("  ", "pw").is_err());
        assert!(credentials("magnus", "").is_err());
        assert_eq!(credentials(" magnus ", "pw").unwrap().username, "magnus");
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let (base_url, mut requests) =
            serve(vec![(200, r#"{"message": "登录成功", "token": "eyJhbGciOi"}"#)]).await;
        let client = ChessClient::builder().base_url(base_url).build().unwrap();

        client.auth().login("magnus", "secret").await.unwrap();
        assert_eq!(client.session().get().as_deref(), Some("eyJhbGciOi"));

        let request = requests.recv().await.unwrap();
        assert!(request.starts_with("POST /login "));
        assert!(request.ends_with(r#"{"username":"magnus","password":"secret"}"#));

        client.auth().logout().unwrap();
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_session_empty() {
        let (base_url, _requests) = serve(vec![(400, r#"{"message": "密码错误"}"#)]).await;
        let client = ChessClient::builder().base_url(base_url).build().unwrap();

        let err = client.auth().login("magnus", "wrong").await.unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_REQUEST));
        assert_eq!(err.to_string(), "HTTP 400 Bad Request: 密码错误");
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_verify_needs_token() {
        let client = ChessClient::builder().build().unwrap();
        let err = client.auth().verify().await.unwrap_err();
        assert!(matches!(err, Error::AuthRequired));
    }
}
