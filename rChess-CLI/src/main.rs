//! rChess CLI.

mod commands;
mod config;
mod handlers;
mod output;
mod views;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{auth, game};
use rchess::BoardStyle;
use rust_i18n::t;

rust_i18n::i18n!("src/locales", fallback = "en");

/// Play chess against the engine from the terminal
#[derive(Parser)]
#[command(name = "rchess")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "plain")]
    format: output::OutputFormat,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Language for output (en, zh-CN)
    #[arg(short, long, global = true, default_value = "en")]
    lang: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage your account
    #[command(alias = "a")]
    Auth {
        #[command(subcommand)]
        action: auth::AuthAction,
    },

    /// Play and review games
    #[command(alias = "g")]
    Game {
        #[command(subcommand)]
        action: game::GameAction,
    },

    /// Open a page by path, e.g. /ai-chess or /game/<id>
    #[command(alias = "o")]
    Open {
        /// Page path
        #[arg(default_value = "/")]
        path: String,
    },

    /// List pages and whether they need a login
    Routes,

    /// Show or change configuration
    Config {
        /// Backend base URL
        #[arg(long)]
        base_url: Option<String>,
        /// Piece style for boards
        #[arg(long, value_parser = ["unicode", "ascii"])]
        board_style: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    rust_i18n::set_locale(&cli.lang);
    init_logging(cli.verbose);

    let command = cli
        .command
        .ok_or_else(|| anyhow::anyhow!("{}", t!("no_command")))?;

    let outcome = match command {
        Commands::Auth { action } => auth::handle(action, cli.format).await,
        Commands::Game { action } => game::handle(action, cli.format).await,
        Commands::Open { path } => open(&path, cli.format).await,
        Commands::Routes => show_routes(cli.format),
        Commands::Config {
            base_url,
            board_style,
        } => handle_config(base_url, board_style),
    };

    if let Err(e) = &outcome {
        let auth_failed = e
            .downcast_ref::<rchess::Error>()
            .is_some_and(rchess::Error::is_auth_error);
        if auth_failed {
            eprintln!("{}", t!("session_expired").yellow());
        }
    }
    outcome
}

async fn open(path: &str, format: output::OutputFormat) -> Result<()> {
    let app = config::build_app(format)?;
    let navigation = app.open(path).await?;

    tracing::debug!(
        requested = %navigation.requested,
        location = %navigation.location.path,
        redirected = navigation.redirected,
        "page opened"
    );
    Ok(())
}

fn show_routes(format: output::OutputFormat) -> Result<()> {
    let app = config::build_app(format)?;
    let rows: Vec<output::RouteRow> = app
        .router()
        .routes()
        .iter()
        .map(output::RouteRow::from)
        .collect();

    output::print_table(rows, format);
    Ok(())
}

fn handle_config(base_url: Option<String>, board_style: Option<String>) -> Result<()> {
    let mut cfg = config::load_config()?;

    if base_url.is_some() || board_style.is_some() {
        if let Some(url) = base_url {
            cfg.base_url = Some(url);
        }
        if let Some(style) = board_style {
            cfg.board_style = match style.as_str() {
                "ascii" => BoardStyle::Ascii,
                _ => BoardStyle::Unicode,
            };
        }
        config::save_config(&cfg)?;
    }

    let app = config::build_app(output::OutputFormat::Plain)?;
    println!(
        "{}",
        t!("config_file", path = config::config_path()?.display())
    );
    println!(
        "{}",
        t!("storage_file", path = config::storage_path()?.display())
    );
    println!("{}", t!("base_url", url = cfg.base_url()));
    println!("{}", t!("board_style", style = format!("{:?}", cfg.board_style)));
    println!(
        "{}",
        t!("authenticated", status = app.session().is_authenticated())
    );
    Ok(())
}
