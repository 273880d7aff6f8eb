//! Account handlers.

use anyhow::Result;
use colored::Colorize;
use rchess::ChessClient;
use rust_i18n::t;
use serde::Serialize;

use crate::output::PlainPrint;

/// Session status as reported by the backend.
#[derive(Debug, Clone, Serialize)]
pub struct AccountStatus {
    pub logged_in: bool,
    pub username: Option<String>,
}

impl PlainPrint for AccountStatus {
    fn plain_print(&self) {
        match &self.username {
            Some(name) if self.logged_in => {
                println!("{}", t!("logged_in_as", name = name.bold()))
            }
            _ => println!("{}", t!("not_logged_in")),
        }
    }
}

/// Create an account.
pub async fn register(client: &ChessClient, username: &str, password: &str) -> Result<String> {
    let reply = client.auth().register(username, password).await?;
    Ok(reply.message)
}

/// Log in and keep the token.
pub async fn login(client: &ChessClient, username: &str, password: &str) -> Result<AccountStatus> {
    client.auth().login(username, password).await?;
    Ok(AccountStatus {
        logged_in: true,
        username: Some(username.trim().to_string()),
    })
}

/// Check the stored token with the backend.
///
/// A rejected token has already been cleared by the client when this
/// returns the error.
pub async fn status(client: &ChessClient) -> Result<AccountStatus> {
    if !client.is_authenticated() {
        return Ok(AccountStatus {
            logged_in: false,
            username: None,
        });
    }

    let status = client.auth().verify().await?;
    Ok(AccountStatus {
        logged_in: status.valid,
        username: Some(status.username),
    })
}
