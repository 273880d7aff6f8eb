//! Home, login and registration pages.

use async_trait::async_trait;
use colored::Colorize;
use rchess::{View, ViewContext};
use rust_i18n::t;

use crate::handlers::account::AccountStatus;
use crate::output::{print_hint, print_item, OutputFormat};

/// Landing page: who is logged in and where to go next.
pub struct HomeView {
    pub format: OutputFormat,
}

#[async_trait]
impl View for HomeView {
    async fn render(&self, ctx: &ViewContext<'_>) -> rchess::Result<()> {
        let status = ctx.client().auth().verify().await?;
        print_item(
            &AccountStatus {
                logged_in: status.valid,
                username: Some(status.username),
            },
            self.format,
        );

        println!();
        for (path, label) in [
            ("/ai-chess", t!("menu_play")),
            ("/game-history", t!("menu_history")),
        ] {
            println!("  {}  {}", format!("rchess open {}", path).cyan(), label);
        }
        Ok(())
    }
}

/// Login page. Credentials are taken by `rchess auth login`.
pub struct LoginView;

#[async_trait]
impl View for LoginView {
    async fn render(&self, ctx: &ViewContext<'_>) -> rchess::Result<()> {
        if ctx.session().is_authenticated() {
            println!("{}", t!("already_logged_in"));
            print_hint(t!("logout_hint"));
            return Ok(());
        }

        println!("{}", t!("login_required").yellow());
        print_hint(t!("login_hint"));
        print_hint(t!("register_hint"));
        Ok(())
    }
}

/// Registration page.
pub struct RegisterView;

#[async_trait]
impl View for RegisterView {
    async fn render(&self, _ctx: &ViewContext<'_>) -> rchess::Result<()> {
        println!("{}", t!("register_title").bold());
        print_hint(t!("register_hint"));
        Ok(())
    }
}
