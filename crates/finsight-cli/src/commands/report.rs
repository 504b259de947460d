//! Report command implementations

use std::path::Path;

use anyhow::{Context, Result};
use finsight_core::categories::{SpendingCategory, RAW_LABELS};
use finsight_core::models::{format_cents, AggregateReport, AnalyticsConfig};
use finsight_core::{summarize, Aggregator};

use super::load_records;

/// Derive the report for `path` with the given table sizes
pub fn build_report(
    path: &Path,
    top_merchants: usize,
    months: usize,
) -> Result<AggregateReport> {
    let records = load_records(path)?;
    let config = AnalyticsConfig {
        top_merchants,
        monthly_window: months,
    };
    Aggregator::new(config)
        .aggregate_records(&records)
        .context("Failed to aggregate ledger")
}

pub fn cmd_report(path: &Path, json: bool, top_merchants: usize, months: usize) -> Result<()> {
    let report = build_report(path, top_merchants, months)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let stats = &report.stats;
    println!();
    println!("📊 Ledger Report");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Period: {} to {}",
        stats.first_date.format("%Y-%m-%d"),
        stats.last_date.format("%Y-%m-%d")
    );
    println!("   Total: ${}", format_cents(stats.total_cents));
    println!("   Transactions: {}", stats.transaction_count);
    println!("   Average: ${:.2}", stats.mean_amount);
    println!("   Largest: ${}", format_cents(stats.max_cents));
    println!(
        "   Fraud: {} ({:.2}%)",
        stats.fraud_count,
        100.0 * stats.fraud_ratio
    );

    println!();
    println!("   {:22} │ {:>12} │ {:>6} │ {:>6}", "Category", "Amount", "%", "Count");
    println!("   ───────────────────────┼──────────────┼────────┼───────");
    for row in &report.categories {
        println!(
            "   {:22} │ {:>12} │ {:>5.1}% │ {:>6}",
            row.category.as_str(),
            format_cents(row.total_cents),
            row.share_of(stats.total_cents),
            row.transaction_count
        );
    }

    println!();
    println!("   Top merchants");
    for (i, row) in report.merchants.iter().enumerate() {
        println!(
            "   {:>2}. {:40} ${:>10}",
            i + 1,
            row.merchant,
            format_cents(row.total_cents)
        );
    }

    println!();
    println!("   Monthly trend (last {} months)", report.monthly.len());
    for row in &report.monthly {
        println!("   {:12} ${:>10}", row.label, format_cents(row.total_cents));
    }

    println!();
    println!(
        "   Peak spending: {:?} at {:02}:00",
        report.peak.day, report.peak.hour
    );

    Ok(())
}

pub fn cmd_summary(path: &Path) -> Result<()> {
    let report = build_report(path, 10, 6)?;
    let block = summarize(&report).context("Failed to render context block")?;
    println!("{}", block);
    Ok(())
}

pub fn cmd_categories() -> Result<()> {
    println!();
    println!("🏷️  Canonical categories");
    println!("   ─────────────────────────────────────────────────────────────");
    for category in SpendingCategory::ALL {
        let raws: Vec<&str> = RAW_LABELS
            .iter()
            .filter(|(_, c)| *c == category)
            .map(|(raw, _)| *raw)
            .collect();
        println!(
            "   {:22} {}  ← {}",
            category.as_str(),
            category.color(),
            raws.join(", ")
        );
    }
    println!();
    println!("   Unlisted raw labels map to Miscellaneous.");
    Ok(())
}
