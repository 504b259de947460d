//! FinSight CLI - Conversational analytics over a transaction ledger
//!
//! Usage:
//!   finsight --file ledger.csv report        Print the aggregate report
//!   finsight --file ledger.csv summary       Print the model context block
//!   finsight --file ledger.csv ask "..."     One-shot question
//!   finsight --file ledger.csv chat          Interactive session

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Report {
            json,
            top_merchants,
            months,
        } => commands::cmd_report(&cli.file, json, top_merchants, months),
        Commands::Summary => commands::cmd_summary(&cli.file),
        Commands::Categories => commands::cmd_categories(),
        Commands::Ask { question } => commands::cmd_ask(&cli.file, &question).await,
        Commands::Chat => commands::cmd_chat(&cli.file).await,
    }
}
