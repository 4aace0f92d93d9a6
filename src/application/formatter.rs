//! Output formatting for quotes and sync reports.
//!
//! Supports plain, JSON and table output plus the transient notifications
//! emitted after a reconcile cycle.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{AppError, Quote, SyncReport};

use super::selector::Selected;

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable plain text.
    #[default]
    Plain,
    /// JSON format for programmatic use.
    Json,
    /// Compact table listing.
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            _ => Err(format!("Unknown format: {s}. Use: plain, json, table")),
        }
    }
}

/// Formats a selected quote for display.
pub fn format_selected(selected: &Selected) -> String {
    format!(
        "{}\n  {} {}",
        format!("“{}”", selected.quote.text).bold(),
        "—".dimmed(),
        selected.quote.category.cyan()
    )
}

/// Formats multiple quotes as JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_quotes_json(quotes: &[Quote]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(quotes)
}

/// Formats a table listing of quotes.
pub fn format_quotes_table(quotes: &[Quote]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Category", "Quote"]);

    for (i, q) in quotes.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            q.category.clone(),
            truncate(&q.text, 60),
        ]);
    }

    table.to_string()
}

/// Formats a plain listing of quotes.
pub fn format_quotes_plain(quotes: &[Quote]) -> String {
    quotes
        .iter()
        .map(|q| format!("[{}] {}", q.category, q.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the user-visible outcome of a reconcile cycle.
pub fn notify_report(report: &SyncReport) {
    if report.skipped {
        println!("{} Sync already in progress, skipped.", "·".dimmed());
        return;
    }

    if report.dirty {
        println!(
            "{} Quotes updated from server. ({} added, {} replaced)",
            "↻".green().bold(),
            report.added,
            report.replaced
        );
    } else {
        println!("{} Already up to date with server.", "✓".green());
    }

    if let Some(err) = &report.push_error {
        eprintln!("{} Push to server failed: {err}", "!".yellow().bold());
    }
}

/// Print the user-visible notification for a failed pull.
pub fn notify_sync_failure(err: &AppError) {
    eprintln!("{} Sync failed, local quotes unchanged: {err}", "✗".red().bold());
}

/// Truncates a string to max length with ellipsis.
fn truncate(s: &str, max_len: usize) -> String {
    let s = s.lines().next().unwrap_or(s);
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world!", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // char-based, never slices through a multibyte boundary
        assert_eq!(truncate("dont’t waste it", 7), "dont...");
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!(
            "plain".parse::<OutputFormat>(),
            Ok(OutputFormat::Plain)
        ));
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!(matches!(
            "table".parse::<OutputFormat>(),
            Ok(OutputFormat::Table)
        ));
        assert!("invalid".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_quotes_plain() {
        let quotes = vec![Quote {
            text: "hi".into(),
            category: "A".into(),
        }];
        assert_eq!(format_quotes_plain(&quotes), "[A] hi");
    }
}
