//! Account commands.

use anyhow::Result;
use clap::Subcommand;
use rust_i18n::t;

use crate::config::build_app;
use crate::handlers::account as handlers;
use crate::output::{print_item, OutputFormat};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create an account
    Register {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long, env = "RCHESS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in and remember the token
    Login {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long, env = "RCHESS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored token
    Logout,
    /// Check the stored token with the server
    Status,
}

pub async fn handle(action: AuthAction, format: OutputFormat) -> Result<()> {
    match action {
        AuthAction::Register { username, password } => register(&username, &password).await,
        AuthAction::Login { username, password } => login(&username, &password, format).await,
        AuthAction::Logout => logout(),
        AuthAction::Status => status(format).await,
    }
}

async fn register(username: &str, password: &str) -> Result<()> {
    let app = build_app(OutputFormat::Plain)?;
    let message = handlers::register(app.client(), username, password).await?;

    println!("{}", t!("registered", name = username));
    if !message.is_empty() {
        println!("{}", message);
    }
    Ok(())
}

async fn login(username: &str, password: &str, format: OutputFormat) -> Result<()> {
    let app = build_app(format)?;
    let status = handlers::login(app.client(), username, password).await?;

    print_item(&status, format);
    Ok(())
}

fn logout() -> Result<()> {
    let app = build_app(OutputFormat::Plain)?;
    app.client().auth().logout()?;

    println!("{}", t!("logged_out"));
    Ok(())
}

async fn status(format: OutputFormat) -> Result<()> {
    let app = build_app(format)?;
    let status = handlers::status(app.client()).await?;

    print_item(&status, format);
    Ok(())
}
