//! Output formatting.

use chrono::{DateTime, Local, Utc};
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use rchess::RouteRecord;
use rust_i18n::t;
use serde::Serialize;

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table format
    Table,
    /// JSON format
    Json,
    /// Plain text format
    #[default]
    Plain,
}

/// Trait for plain text output.
pub trait PlainPrint {
    /// Print as plain text with formatting.
    fn plain_print(&self);
}

/// Trait for table row generation.
pub trait TableRow {
    /// Get table headers.
    fn headers() -> Vec<&'static str>;
    /// Get row data as strings.
    fn row(&self) -> Vec<String>;
}

/// Print items in plain text format.
pub fn print_plain<T: PlainPrint>(items: &[T]) {
    if items.is_empty() {
        println!("{}", t!("no_results"));
        return;
    }
    for item in items {
        item.plain_print();
    }
}

/// Format a timestamp in local time.
pub fn format_time(dt: Option<&DateTime<Utc>>) -> String {
    match dt {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Format the span between two timestamps.
pub fn format_duration(start: &DateTime<Utc>, end: Option<&DateTime<Utc>>) -> String {
    let Some(end) = end else {
        return "-".to_string();
    };

    let secs = (*end - *start).num_seconds().max(0);
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Print a table of items with proper formatting for each output mode.
pub fn print_table<T: TableRow + Serialize + PlainPrint>(items: Vec<T>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&items).unwrap_or_default());
        }
        OutputFormat::Table => {
            if items.is_empty() {
                println!("{}", t!("no_results"));
                return;
            }
            let mut table = Table::new();
            table.load_preset(UTF8_FULL_CONDENSED);
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(T::headers());
            for item in &items {
                table.add_row(item.row());
            }
            println!("{table}");
        }
        OutputFormat::Plain => {
            print_plain(&items);
        }
    }
}

/// Print a single item.
pub fn print_item<T: Serialize + PlainPrint>(item: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
        }
        OutputFormat::Table | OutputFormat::Plain => item.plain_print(),
    }
}

/// Print a rendered board, dimming the coordinates.
pub fn print_board(board: &str) {
    for line in board.lines() {
        let (label, squares) = line.split_at(line.find(' ').unwrap_or(0));
        println!("  {}{}", label.dimmed(), squares);
    }
}

/// Print a hint line.
pub fn print_hint(hint: impl std::fmt::Display) {
    println!("{}", hint.to_string().dimmed());
}

/// Row for the route table.
#[derive(Serialize)]
pub struct RouteRow {
    pub path: String,
    pub view: String,
    pub requires_auth: bool,
}

impl From<&RouteRecord> for RouteRow {
    fn from(r: &RouteRecord) -> Self {
        Self {
            path: r.pattern.to_string(),
            view: r.view.to_string(),
            requires_auth: r.requires_auth,
        }
    }
}

impl TableRow for RouteRow {
    fn headers() -> Vec<&'static str> {
        vec!["Path", "Page", "Login"]
    }
    fn row(&self) -> Vec<String> {
        vec![
            self.path.clone(),
            self.view.clone(),
            if self.requires_auth { "yes" } else { "no" }.to_string(),
        ]
    }
}

impl PlainPrint for RouteRow {
    fn plain_print(&self) {
        let lock = if self.requires_auth {
            t!("login_needed").to_string().yellow()
        } else {
            t!("public").to_string().green()
        };
        println!("{:<16} {:<14} {}", self.path.cyan(), self.view, lock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_duration() {
        let start = Utc.with_ymd_and_hms(2024, 10, 15, 12, 0, 0).unwrap();
        assert_eq!(format_duration(&start, None), "-");

        let end = Utc.with_ymd_and_hms(2024, 10, 15, 12, 0, 42).unwrap();
        assert_eq!(format_duration(&start, Some(&end)), "42s");

        let end = Utc.with_ymd_and_hms(2024, 10, 15, 12, 15, 10).unwrap();
        assert_eq!(format_duration(&start, Some(&end)), "15m 10s");

        let end = Utc.with_ymd_and_hms(2024, 10, 15, 14, 5, 0).unwrap();
        assert_eq!(format_duration(&start, Some(&end)), "2h 5m");
    }

    #[test]
    fn test_format_time_missing() {
        assert_eq!(format_time(None), "-");
    }
}
