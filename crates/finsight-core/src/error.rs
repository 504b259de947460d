//! Error types for FinSight

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dataset is empty: aggregation requires at least one transaction")]
    EmptyDataset,

    #[error("Malformed report: {0}")]
    MalformedReport(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Completion service error: {0}")]
    Completion(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
