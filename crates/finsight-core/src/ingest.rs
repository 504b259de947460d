//! CSV ingestion for the transaction ledger
//!
//! Loads the raw credit-card export and turns it into the tidy record set
//! the rest of the pipeline works against. Cleaning steps:
//! - parse the `trans_date_trans_time` timestamp
//! - strip the `fraud_` labelling artifact from merchant names
//! - parse decimal amounts into integer cents
//! - skip rows with missing or unusable fields (logged, never surfaced)
//!
//! Rows that survive ingestion satisfy the core's input contract: non-empty
//! merchant, non-negative amount, parsed timestamp.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::TransactionRecord;

/// Timestamp format used by the ledger export, e.g. "2019-01-01 00:00:18"
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Columns the ledger must provide. Extra columns are ignored.
const REQUIRED_COLUMNS: [&str; 5] = [
    "trans_date_trans_time",
    "merchant",
    "category",
    "amt",
    "is_fraud",
];

/// Load and clean the ledger CSV at `path`
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<TransactionRecord>> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading ledger");
    let file = File::open(path)?;
    parse_csv(file)
}

/// Parse and clean ledger CSV data from any reader
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<TransactionRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let mut indices = [0usize; 5];
    for (i, name) in REQUIRED_COLUMNS.iter().enumerate() {
        indices[i] = column(name).ok_or_else(|| {
            Error::InvalidData(format!("Ledger CSV is missing the '{}' column", name))
        })?;
    }
    let [ts_idx, merchant_idx, category_idx, amount_idx, fraud_idx] = indices;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        match parse_row(
            &record, row, ts_idx, merchant_idx, category_idx, amount_idx, fraud_idx,
        ) {
            Some(tx) => records.push(tx),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, kept = records.len(), "Skipped unusable ledger rows");
    }
    debug!(count = records.len(), "Ledger loaded");

    Ok(records)
}

fn parse_row(
    record: &csv::StringRecord,
    row: usize,
    ts_idx: usize,
    merchant_idx: usize,
    category_idx: usize,
    amount_idx: usize,
    fraud_idx: usize,
) -> Option<TransactionRecord> {
    let raw_ts = record.get(ts_idx)?.trim();
    let timestamp = match NaiveDateTime::parse_from_str(raw_ts, TIMESTAMP_FORMAT) {
        Ok(ts) => ts,
        Err(e) => {
            warn!(row, value = raw_ts, error = %e, "Unparsable timestamp, skipping row");
            return None;
        }
    };

    // The raw dataset prefixes every merchant with "fraud_" as an artifact
    // of the fraud-detection labelling process. Strip it.
    let merchant = record
        .get(merchant_idx)?
        .trim()
        .trim_start_matches("fraud_")
        .trim()
        .to_string();
    if merchant.is_empty() {
        warn!(row, "Empty merchant, skipping row");
        return None;
    }

    let raw_category = record.get(category_idx)?.trim().to_string();

    let raw_amount = record.get(amount_idx)?.trim();
    let amount: f64 = match raw_amount.parse() {
        Ok(a) => a,
        Err(_) => {
            warn!(row, value = raw_amount, "Unparsable amount, skipping row");
            return None;
        }
    };
    if !amount.is_finite() || amount < 0.0 {
        warn!(row, value = raw_amount, "Negative or non-finite amount, skipping row");
        return None;
    }
    let amount_cents = (amount * 100.0).round() as i64;

    let is_fraud = match record.get(fraud_idx)?.trim() {
        "0" => false,
        "1" => true,
        other => {
            warn!(row, value = other, "Unexpected is_fraud flag, skipping row");
            return None;
        }
    };

    Some(TransactionRecord {
        timestamp,
        merchant,
        raw_category,
        amount_cents,
        is_fraud,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "trans_date_trans_time,merchant,category,amt,is_fraud";

    fn csv_data(rows: &[&str]) -> String {
        let mut data = String::from(HEADER);
        for row in rows {
            data.push('\n');
            data.push_str(row);
        }
        data
    }

    #[test]
    fn test_parse_basic_ledger() {
        let data = csv_data(&[
            "2019-01-01 00:00:18,fraud_Kirlin and Sons,grocery_pos,4.97,0",
            "2019-01-01 12:30:00,Sporer-Keebler,shopping_net,107.23,1",
        ]);
        let records = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].merchant, "Kirlin and Sons");
        assert_eq!(records[0].raw_category, "grocery_pos");
        assert_eq!(records[0].amount_cents, 497);
        assert!(!records[0].is_fraud);

        assert_eq!(records[1].merchant, "Sporer-Keebler");
        assert_eq!(records[1].amount_cents, 10_723);
        assert!(records[1].is_fraud);
    }

    #[test]
    fn test_fraud_prefix_stripped_only_as_prefix() {
        let data = csv_data(&["2019-03-05 09:15:00,Defraud_ers Anonymous,misc_pos,1.00,0"]);
        let records = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(records[0].merchant, "Defraud_ers Anonymous");
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let data = csv_data(&[
            "2019-01-01 00:00:18,Kirlin and Sons,grocery_pos,4.97,0",
            "not-a-date,Merchant,misc_pos,1.00,0",
            "2019-01-02 10:00:00,,misc_pos,1.00,0",
            "2019-01-03 10:00:00,Merchant,misc_pos,oops,0",
            "2019-01-04 10:00:00,Merchant,misc_pos,-5.00,0",
            "2019-01-05 10:00:00,Merchant,misc_pos,5.00,maybe",
        ]);
        let records = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let data = "trans_date_trans_time,merchant,category,amt\n2019-01-01 00:00:18,M,misc_pos,1.00";
        let err = parse_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let data = "city,trans_date_trans_time,merchant,category,amt,is_fraud,state\n\
                    Houston,2019-06-21 14:05:00,Stracke-Lemke,entertainment,88.10,0,TX";
        let records = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].merchant, "Stracke-Lemke");
        assert_eq!(records[0].amount_cents, 8810);
    }

    #[test]
    fn test_load_csv_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}\n2020-02-29 23:59:59,Leap Day Diner,food_dining,12.34,0",
            HEADER
        )
        .unwrap();
        let records = load_csv(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].merchant, "Leap Day Diner");
    }
}
