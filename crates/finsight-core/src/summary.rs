//! Context block rendering
//!
//! Turns an [`AggregateReport`] into the fixed-structure plain-text digest
//! that gets embedded into every completion request. Section order is part
//! of the contract: overview scalars first, then category breakdown, top
//! merchants, recent monthly trend, behavioral peaks. Under token pressure
//! a truncated context loses the tail sections first, so the most load-
//! bearing numbers come earliest.
//!
//! Every figure is taken from the report as-is. Category shares are computed
//! against the report's own scalar total, so the sections can never drift
//! apart.

use chrono::Weekday;

use crate::error::{Error, Result};
use crate::models::{format_cents, AggregateReport};

/// Render the ground-truth context block for `report`
///
/// Fails with [`Error::MalformedReport`] if the report violates its
/// structural invariants. A hard failure beats a silently incomplete block:
/// the conversational layer must never present missing numbers as computed.
pub fn summarize(report: &AggregateReport) -> Result<String> {
    validate(report)?;

    let stats = &report.stats;
    let fraud_pct = 100.0 * stats.fraud_ratio;

    let cat_lines: Vec<String> = report
        .categories
        .iter()
        .map(|row| {
            format!(
                "  \u{2022} {:<22} ${:>12}  ({:.1}%)  {:>6} transactions",
                row.category.as_str(),
                format_cents(row.total_cents),
                row.share_of(stats.total_cents),
                format_count(row.transaction_count),
            )
        })
        .collect();

    let merch_lines: Vec<String> = report
        .merchants
        .iter()
        .enumerate()
        .map(|(i, row)| {
            format!(
                "  {:>2}. {:<40} ${:>10}",
                i + 1,
                row.merchant,
                format_cents(row.total_cents)
            )
        })
        .collect();

    let monthly_lines: Vec<String> = report
        .monthly
        .iter()
        .map(|row| format!("  \u{2022} {:<12}  ${:>10}", row.label, format_cents(row.total_cents)))
        .collect();

    let summary = format!(
        "=== FINSIGHT DATA SUMMARY ===\n\
         \n\
         OVERVIEW\n\
         \x20 Date range      : {date_min} \u{2192} {date_max}\n\
         \x20 Total spend     : ${total}\n\
         \x20 Total txns      : {txns}\n\
         \x20 Avg transaction : ${avg:.2}\n\
         \x20 Largest txn     : ${max}\n\
         \x20 Fraud txns      : {fraud} ({fraud_pct:.2}% of all transactions)\n\
         \n\
         SPENDING BY CATEGORY\n\
         {categories}\n\
         \n\
         TOP {merchant_count} MERCHANTS BY SPEND\n\
         {merchants}\n\
         \n\
         RECENT MONTHLY SPENDING (last {month_count} months)\n\
         {monthly}\n\
         \n\
         BEHAVIORAL PATTERNS\n\
         \x20 Peak spending day  : {peak_day}\n\
         \x20 Peak spending hour : {peak_hour:02}:00",
        date_min = stats.first_date.format("%B %d, %Y"),
        date_max = stats.last_date.format("%B %d, %Y"),
        total = format_cents(stats.total_cents),
        txns = format_count(stats.transaction_count),
        avg = stats.mean_amount,
        max = format_cents(stats.max_cents),
        fraud = format_count(stats.fraud_count),
        fraud_pct = fraud_pct,
        categories = cat_lines.join("\n"),
        merchant_count = report.merchants.len(),
        merchants = merch_lines.join("\n"),
        month_count = report.monthly.len(),
        monthly = monthly_lines.join("\n"),
        peak_day = weekday_name(report.peak.day),
        peak_hour = report.peak.hour,
    );

    Ok(summary)
}

fn validate(report: &AggregateReport) -> Result<()> {
    if report.stats.transaction_count == 0 {
        return Err(Error::MalformedReport("zero transaction count".into()));
    }
    if report.categories.is_empty() {
        return Err(Error::MalformedReport("empty category breakdown".into()));
    }
    if report.merchants.is_empty() {
        return Err(Error::MalformedReport("empty merchant table".into()));
    }
    if report.monthly.is_empty() {
        return Err(Error::MalformedReport("empty monthly trend".into()));
    }
    let category_sum: i64 = report.categories.iter().map(|c| c.total_cents).sum();
    if category_sum != report.stats.total_cents {
        return Err(Error::MalformedReport(format!(
            "category totals ({}) disagree with scalar total ({})",
            category_sum, report.stats.total_cents
        )));
    }
    Ok(())
}

/// Integer count with thousands separators, e.g. `12345` -> `"12,345"`
fn format_count(count: usize) -> String {
    let mut out = String::new();
    for (i, c) in count.to_string().chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.chars().rev().collect()
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
