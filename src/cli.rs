//! Command-line argument parsing and terminal rendering for Querypad.

use clap::Parser;
use std::path::PathBuf;

use crate::query::QueryResponse;

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text table.
    #[default]
    Table,
    /// The full response as JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: table or json")),
        }
    }
}

/// An embedded SQL workspace.
#[derive(Parser, Debug)]
#[command(name = "querypad")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Database file for the embedded engine (in-memory when omitted)
    #[arg(value_name = "DATABASE")]
    pub database: Option<PathBuf>,

    /// Execute a single statement and exit
    #[arg(short = 'e', long, value_name = "SQL")]
    pub execute: Option<String>,

    /// SQL script to run before anything else
    #[arg(long, value_name = "PATH")]
    pub seed: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    pub output: String,

    /// Do not record executed statements in history
    #[arg(long)]
    pub no_history: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }

    /// Parses the output format from the --output argument.
    pub fn parse_output_format(&self) -> std::result::Result<OutputFormat, String> {
        self.output.parse()
    }
}

/// Renders a normalized response for the terminal.
pub fn render_response(response: &QueryResponse, format: OutputFormat, show_time: bool) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(response)
            .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}")),
        OutputFormat::Table => render_table(response, show_time),
    }
}

fn render_table(response: &QueryResponse, show_time: bool) -> String {
    let mut out = String::new();

    if let Some(error) = &response.error {
        out.push_str(&format!("Error: {error}"));
    } else if let Some(data) = &response.data {
        for result in data {
            if let Some(row_count) = result.row_count {
                out.push_str(&result.columns.join("\t"));
                out.push('\n');
                for row in &result.values {
                    let cells: Vec<String> = row.iter().map(|v| v.to_display_string()).collect();
                    out.push_str(&cells.join("\t"));
                    out.push('\n');
                }
                out.push_str(&format!("({row_count} rows)"));
            } else if let Some(affected) = result.affected_rows {
                out.push_str(&format!("{affected} rows affected"));
            } else {
                out.push_str("OK");
            }
        }
    }

    if show_time {
        out.push_str(&format!(" [{} ms]", response.time_ms));
    }
    out
}
