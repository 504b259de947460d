//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::commands::{self, load_records};

fn write_ledger(rows: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "trans_date_trans_time,merchant,category,amt,is_fraud").unwrap();
    write!(file, "{}", rows).unwrap();
    file
}

fn sample_ledger() -> NamedTempFile {
    write_ledger(
        "2019-01-08 14:10:00,fraud_Kirlin and Sons,grocery_pos,250.00,0\n\
         2019-02-11 09:05:00,Sporer-Keebler,shopping_net,300.00,0\n\
         2019-03-20 19:45:00,Stracke-Lemke,entertainment,120.00,1\n",
    )
}

// ========== Ledger Loading Tests ==========

#[test]
fn test_load_records() {
    let ledger = sample_ledger();
    let records = load_records(ledger.path()).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].merchant, "Kirlin and Sons");
}

#[test]
fn test_load_records_missing_file() {
    let result = load_records(std::path::Path::new("/no/such/ledger.csv"));
    assert!(result.is_err());
}

#[test]
fn test_load_records_rejects_empty_ledger() {
    let ledger = write_ledger("");
    let result = load_records(ledger.path());
    assert!(result.is_err());
}

// ========== Report Command Tests ==========

#[test]
fn test_build_report() {
    let ledger = sample_ledger();
    let report = commands::build_report(ledger.path(), 10, 6).unwrap();
    assert_eq!(report.stats.transaction_count, 3);
    assert_eq!(report.stats.total_cents, 67_000);
    assert_eq!(report.monthly.len(), 3);
}

#[test]
fn test_build_report_honors_table_sizes() {
    let ledger = sample_ledger();
    let report = commands::build_report(ledger.path(), 1, 2).unwrap();
    assert_eq!(report.merchants.len(), 1);
    assert_eq!(report.monthly.len(), 2);
    assert_eq!(report.monthly[0].label, "Feb 2019");
}

#[test]
fn test_cmd_report_table_output() {
    let ledger = sample_ledger();
    assert!(commands::cmd_report(ledger.path(), false, 10, 6).is_ok());
}

#[test]
fn test_cmd_report_json_output() {
    let ledger = sample_ledger();
    assert!(commands::cmd_report(ledger.path(), true, 10, 6).is_ok());
}

#[test]
fn test_cmd_summary() {
    let ledger = sample_ledger();
    assert!(commands::cmd_summary(ledger.path()).is_ok());
}

#[test]
fn test_cmd_categories() {
    assert!(commands::cmd_categories().is_ok());
}
