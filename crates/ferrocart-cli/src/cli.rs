//! CLI argument definitions for Ferrocart.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `commands` | List every command path |
//! | `run` | Execute a command against a provider |
//! | `providers` | List registered providers |
//! | `api` | Serve the HTTP API |
//!
//! # Examples
//!
//! ```bash
//! ferrocart commands
//! ferrocart run /orders/summary
//! ferrocart run /inventory/levels/current -o csv --param warehouse=US-East
//! ferrocart run /products/sales/historical -p demo -o json --pretty --param days=7
//! ferrocart api --port 8080
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;

/// Ferrocart - ecommerce and retail analytics from the command line
#[derive(Debug, Parser)]
#[command(
    name = "ferrocart",
    author,
    version,
    about = "Ecommerce and retail analytics command runner",
    long_about = "Ferrocart resolves hierarchical command paths such as /orders/summary to a \
data provider, fetches and validates the records, and prints them as a table, JSON or CSV.\n\
\n\
Use 'ferrocart <command> --help' for command-specific help."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all available command paths.
    Commands,

    /// Run a command and print its results.
    ///
    /// # Examples
    ///
    ///   ferrocart run /orders/summary
    ///   ferrocart run /pricing/competitor/current --param sku=EC-1001 -o json
    Run(RunArgs),

    /// List registered data providers.
    Providers,

    /// Start the HTTP API server.
    Api(ApiArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Command path, e.g. /products/sales/historical.
    pub path: String,

    /// Provider name (defaults to FERROCART_DEFAULT_PROVIDER, then "demo").
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,

    /// Command parameter as key=value; repeatable.
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, Value)>,
}

#[derive(Debug, Args)]
pub struct ApiArgs {
    /// Bind host (defaults to FERROCART_API_HOST, then 0.0.0.0).
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (defaults to FERROCART_API_PORT, then 6900).
    #[arg(long)]
    pub port: Option<u16>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table (first 20 rows).
    Table,
    /// Full envelope as JSON.
    Json,
    /// Results as CSV with a header row.
    Csv,
}

fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("parameter name is empty in '{raw}'"));
    }
    Ok((key.to_owned(), Value::String(value.to_owned())))
}
