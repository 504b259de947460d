//! Domain models for FinSight

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::categories::SpendingCategory;

/// Format integer cents as a dollar string with thousands separators,
/// e.g. `1234567` -> `"12,345.67"`.
pub fn format_cents(cents: i64) -> String {
    let dollars = cents / 100;
    let rem = (cents % 100).abs();
    let mut whole = String::new();
    for (i, c) in dollars.abs().to_string().chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            whole.push(',');
        }
        whole.push(c);
    }
    let whole: String = whole.chars().rev().collect();
    if dollars < 0 || cents < 0 {
        format!("-{}.{:02}", whole, rem)
    } else {
        format!("{}.{:02}", whole, rem)
    }
}

/// A single cleaned ledger entry
///
/// Amounts are integer cents so that grouped sums are exact and independent
/// of accumulation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub timestamp: NaiveDateTime,
    pub merchant: String,
    /// Raw category label as it appears in the ledger (e.g. "grocery_pos")
    pub raw_category: String,
    /// Non-negative amount in cents
    pub amount_cents: i64,
    pub is_fraud: bool,
}

impl TransactionRecord {
    pub fn amount(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// The canonical spending category for this record
    pub fn category(&self) -> SpendingCategory {
        SpendingCategory::from_raw(&self.raw_category)
    }
}

/// Tunables for report derivation
///
/// Constructed explicitly and passed to the aggregator so there is no
/// process-wide mutable configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// How many merchants the top-merchant table keeps
    pub top_merchants: usize,
    /// How many trailing calendar months the monthly trend keeps
    pub monthly_window: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_merchants: 10,
            monthly_window: 6,
        }
    }
}

/// Spend and count for one canonical category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub category: SpendingCategory,
    pub total_cents: i64,
    pub transaction_count: usize,
}

impl CategoryAggregate {
    /// Share of the overall spend, in percent
    pub fn share_of(&self, total_cents: i64) -> f64 {
        if total_cents == 0 {
            0.0
        } else {
            100.0 * self.total_cents as f64 / total_cents as f64
        }
    }
}

/// Spend for one merchant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantAggregate {
    pub merchant: String,
    pub total_cents: i64,
}

/// Spend for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// Display label, e.g. "Jan 2019"
    pub label: String,
    pub total_cents: i64,
}

/// The day-of-week and hour-of-day where spend concentrates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehavioralPeak {
    pub day: Weekday,
    /// 0-23
    pub hour: u32,
}

/// Whole-dataset scalar statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarStats {
    pub total_cents: i64,
    pub transaction_count: usize,
    pub mean_amount: f64,
    pub max_cents: i64,
    pub fraud_count: usize,
    /// fraud_count / transaction_count, 0.0 when no fraud
    pub fraud_ratio: f64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

/// Derived statistics over one record-set snapshot
///
/// Recomputed on demand, never mutated in place. Row orderings are
/// deterministic for identical input multisets regardless of input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub stats: ScalarStats,
    /// One row per category present, by total spend descending
    pub categories: Vec<CategoryAggregate>,
    /// Top-K merchants by total spend descending
    pub merchants: Vec<MerchantAggregate>,
    /// Trailing months, chronological
    pub monthly: Vec<MonthlyAggregate>,
    pub peak: BehavioralPeak,
}
