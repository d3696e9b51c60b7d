use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    /// Bare values, one per line.
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub const SCHEMA_BASE: &str = "https://schemas.3leaps.dev/prodvk/cli/v1";

pub fn print_json<T: Serialize>(out: &T) {
    println!(
        "{}",
        serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
    );
}

/// Print `rows` under `header` as a UTF-8 table.
pub fn print_table(header: &[&str], rows: Vec<Vec<String>>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    for row in rows {
        table.add_row(row);
    }
    println!("{table}");
}

/// Print aligned `key: value` lines under a title.
pub fn print_pretty(title: &str, fields: &[(&str, String)]) {
    println!("{title}:");
    let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0) + 1;
    for (key, value) in fields {
        println!("  {:<width$} {value}", format!("{key}:"), width = width);
    }
}

/// Show `value` or a dash for missing descriptor strings.
pub fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
