//! Configuration management for rChess CLI.

use anyhow::{Context, Result};
use rchess::{App, BoardStyle, FileStore, TextBoard};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::output::OutputFormat;
use crate::views;

/// CLI configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL; the library default when unset.
    pub base_url: Option<String>,
    /// Piece style for boards.
    #[serde(default)]
    pub board_style: BoardStyle,
}

impl Config {
    /// Base URL requests go to.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(rchess::client::DEFAULT_BASE_URL)
    }
}

fn exe_dir() -> Result<PathBuf> {
    let exe_path = env::current_exe().context("Could not determine executable path")?;
    let exe_dir = exe_path
        .parent()
        .context("Could not determine executable directory")?;

    Ok(exe_dir.to_path_buf())
}

/// Get the configuration file path.
pub fn config_path() -> Result<PathBuf> {
    Ok(exe_dir()?.join("rchess.toml"))
}

/// Get the path of the file holding the session token.
pub fn storage_path() -> Result<PathBuf> {
    Ok(exe_dir()?.join("rchess-storage.json"))
}

/// Load configuration from file.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path).context("Failed to read config file")?;

    toml::from_str(&content).context("Failed to parse config file")
}

/// Save configuration to file.
pub fn save_config(config: &Config) -> Result<()> {
    let path = config_path()?;
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(&path, content).context("Failed to write config file")?;

    Ok(())
}

/// Build the application from the current configuration.
pub fn build_app(format: OutputFormat) -> Result<App> {
    let config = load_config()?;
    let board = Arc::new(TextBoard::new(config.board_style));
    build_app_with(&config, board, format)
}

/// Build the application around an already loaded config and board.
pub fn build_app_with(
    config: &Config,
    board: Arc<TextBoard>,
    format: OutputFormat,
) -> Result<App> {
    let store = FileStore::open(storage_path()?).context("Failed to open session storage")?;

    let builder = App::builder()
        .store(Arc::new(store))
        .base_url(config.base_url());

    views::register(builder, board, format)
        .build()
        .context("Failed to start rChess")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let cfg: Config = toml::from_str(
            r#"
            base_url = "http://chess.local:5000/"
            board_style = "ascii"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.base_url(), "http://chess.local:5000/");
        assert_eq!(cfg.board_style, BoardStyle::Ascii);
    }

    #[test]
    fn test_default_config() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.base_url(), "http://localhost:5000/");
        assert_eq!(cfg.board_style, BoardStyle::Unicode);
    }

    #[test]
    fn test_build_app_with_loaded_config() {
        let cfg = Config {
            base_url: Some("http://chess.local:5000/".into()),
            board_style: BoardStyle::Ascii,
        };
        let board = Arc::new(TextBoard::new(cfg.board_style));

        let app = build_app_with(&cfg, board.clone(), OutputFormat::Plain).unwrap();
        assert_eq!(app.client().base_url(), "http://chess.local:5000/");
        assert_eq!(Arc::strong_count(&board), 3);
    }

    #[test]
    fn test_config_round_trip_keeps_style() {
        let cfg = Config {
            base_url: None,
            board_style: BoardStyle::Ascii,
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(text.contains("board_style = \"ascii\""));
    }
}
