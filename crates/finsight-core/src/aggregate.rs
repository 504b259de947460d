//! Grouped statistics over the transaction ledger
//!
//! Pure derivation: a report is a function of the record multiset and the
//! analytics config, nothing else. All orderings carry explicit tie-breaks
//! so that permuting the input never changes the output:
//! - category and merchant rows: total spend descending, then name ascending
//! - monthly buckets: chronological, truncated to the trailing window
//! - behavioral peaks: earliest Monday-first day / lowest hour wins a tie
//!
//! Amounts accumulate as integer cents, so sums are exact and independent of
//! accumulation order.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, Timelike, Weekday};
use tracing::debug;

use crate::categories::SpendingCategory;
use crate::error::{Error, Result};
use crate::models::{
    AggregateReport, AnalyticsConfig, BehavioralPeak, CategoryAggregate, MerchantAggregate,
    MonthlyAggregate, ScalarStats, TransactionRecord,
};

/// Derives an [`AggregateReport`] from a record set
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AnalyticsConfig,
}

impl Aggregator {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Map categories and aggregate in one step
    pub fn aggregate_records(&self, records: &[TransactionRecord]) -> Result<AggregateReport> {
        let categories: Vec<SpendingCategory> = records.iter().map(|r| r.category()).collect();
        self.aggregate(records, &categories)
    }

    /// Compute the full report over `records`
    ///
    /// `categories` is the parallel sequence of canonical categories, one per
    /// record. Empty input is an error: mean, max, and ratios are undefined
    /// over zero records.
    pub fn aggregate(
        &self,
        records: &[TransactionRecord],
        categories: &[SpendingCategory],
    ) -> Result<AggregateReport> {
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if records.len() != categories.len() {
            return Err(Error::InvalidData(format!(
                "Category sequence length {} does not match record count {}",
                categories.len(),
                records.len()
            )));
        }

        let report = AggregateReport {
            stats: self.scalar_stats(records),
            categories: self.by_category(records, categories),
            merchants: self.top_merchants(records),
            monthly: self.monthly_trend(records),
            peak: self.behavioral_peak(records),
        };
        debug!(
            transactions = report.stats.transaction_count,
            total_cents = report.stats.total_cents,
            "Aggregated ledger"
        );
        Ok(report)
    }

    fn scalar_stats(&self, records: &[TransactionRecord]) -> ScalarStats {
        let total_cents: i64 = records.iter().map(|r| r.amount_cents).sum();
        let transaction_count = records.len();
        let max_cents = records.iter().map(|r| r.amount_cents).max().unwrap_or(0);
        let fraud_count = records.iter().filter(|r| r.is_fraud).count();
        let first_date = records.iter().map(|r| r.timestamp.date()).min().unwrap();
        let last_date = records.iter().map(|r| r.timestamp.date()).max().unwrap();

        ScalarStats {
            total_cents,
            transaction_count,
            mean_amount: total_cents as f64 / 100.0 / transaction_count as f64,
            max_cents,
            fraud_count,
            fraud_ratio: fraud_count as f64 / transaction_count as f64,
            first_date,
            last_date,
        }
    }

    fn by_category(
        &self,
        records: &[TransactionRecord],
        categories: &[SpendingCategory],
    ) -> Vec<CategoryAggregate> {
        let mut groups: BTreeMap<SpendingCategory, (i64, usize)> = BTreeMap::new();
        for (record, &category) in records.iter().zip(categories) {
            let entry = groups.entry(category).or_default();
            entry.0 += record.amount_cents;
            entry.1 += 1;
        }

        let mut rows: Vec<CategoryAggregate> = groups
            .into_iter()
            .map(|(category, (total_cents, transaction_count))| CategoryAggregate {
                category,
                total_cents,
                transaction_count,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.total_cents
                .cmp(&a.total_cents)
                .then_with(|| a.category.as_str().cmp(b.category.as_str()))
        });
        rows
    }

    fn top_merchants(&self, records: &[TransactionRecord]) -> Vec<MerchantAggregate> {
        let mut totals: HashMap<&str, i64> = HashMap::new();
        for record in records {
            *totals.entry(record.merchant.as_str()).or_default() += record.amount_cents;
        }

        let mut rows: Vec<MerchantAggregate> = totals
            .into_iter()
            .map(|(merchant, total_cents)| MerchantAggregate {
                merchant: merchant.to_string(),
                total_cents,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.total_cents
                .cmp(&a.total_cents)
                .then_with(|| a.merchant.cmp(&b.merchant))
        });
        rows.truncate(self.config.top_merchants);
        rows
    }

    fn monthly_trend(&self, records: &[TransactionRecord]) -> Vec<MonthlyAggregate> {
        let mut buckets: BTreeMap<(i32, u32), i64> = BTreeMap::new();
        for record in records {
            let key = (record.timestamp.year(), record.timestamp.month());
            *buckets.entry(key).or_default() += record.amount_cents;
        }

        // BTreeMap keys are already chronological; keep only the trailing window.
        let drop = buckets.len().saturating_sub(self.config.monthly_window);
        buckets
            .into_iter()
            .skip(drop)
            .map(|((year, month), total_cents)| MonthlyAggregate {
                year,
                month,
                label: month_label(year, month),
                total_cents,
            })
            .collect()
    }

    fn behavioral_peak(&self, records: &[TransactionRecord]) -> BehavioralPeak {
        let mut by_day = [0i64; 7];
        let mut by_hour = [0i64; 24];
        for record in records {
            by_day[record.timestamp.weekday().num_days_from_monday() as usize] +=
                record.amount_cents;
            by_hour[record.timestamp.hour() as usize] += record.amount_cents;
        }

        // Strict comparison while scanning Monday-first / hour-ascending keeps
        // the earliest day and lowest hour on a tie.
        let mut peak_day = 0usize;
        for (day, &total) in by_day.iter().enumerate() {
            if total > by_day[peak_day] {
                peak_day = day;
            }
        }
        let mut peak_hour = 0usize;
        for (hour, &total) in by_hour.iter().enumerate() {
            if total > by_hour[peak_hour] {
                peak_hour = hour;
            }
        }

        BehavioralPeak {
            day: weekday_from_monday_index(peak_day),
            hour: peak_hour as u32,
        }
    }
}

/// Display label for a calendar month, e.g. "Jan 2019"
fn month_label(year: i32, month: u32) -> String {
    // Month index is always 1-12 here since it came from a parsed timestamp.
    let date = NaiveDate::from_ymd_opt(year, month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, 1, 1).expect("valid date"));
    date.format("%b %Y").to_string()
}

fn weekday_from_monday_index(index: usize) -> Weekday {
    match index {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}
