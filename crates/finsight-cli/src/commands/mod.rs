//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `report` - Report, summary, and category-table commands
//! - `chat` - One-shot ask and interactive chat commands

pub mod chat;
pub mod report;

// Re-export command functions for main.rs
pub use chat::*;
pub use report::*;

use std::path::Path;

use anyhow::{Context, Result};
use finsight_core::models::TransactionRecord;

/// Load the ledger and fail with a friendly message if it is unusable
pub fn load_records(path: &Path) -> Result<Vec<TransactionRecord>> {
    let records = finsight_core::ingest::load_csv(path)
        .with_context(|| format!("Failed to load ledger from '{}'", path.display()))?;
    if records.is_empty() {
        anyhow::bail!(
            "Ledger '{}' contains no usable transactions",
            path.display()
        );
    }
    Ok(records)
}
