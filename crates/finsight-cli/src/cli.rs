//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FinSight - Conversational analytics over a transaction ledger
#[derive(Parser)]
#[command(name = "finsight")]
#[command(about = "Personal finance analytics agent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger CSV path
    #[arg(long, default_value = "transactions.csv", global = true)]
    pub file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the aggregate report
    Report {
        /// Emit the report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// How many merchants to include
        #[arg(long, default_value = "10")]
        top_merchants: usize,

        /// How many trailing months to include
        #[arg(long, default_value = "6")]
        months: usize,
    },

    /// Print the ground-truth context block sent to the model
    Summary,

    /// Print the category mapping and color key
    Categories,

    /// Ask a single question about the ledger
    Ask {
        /// The question to ask
        question: String,
    },

    /// Start an interactive chat session
    Chat,
}
