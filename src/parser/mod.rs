//! Corpus parsing module
//!
//! This module handles turning raw email corpora into analyzable text:
//! - Kaggle `emails.csv` and maildir ingestion
//! - Header and body extraction from raw messages
//! - Word and sentence tokenization

pub mod corpus;
pub mod message;
pub mod tokenize;

use thiserror::Error;

pub use corpus::{is_csv_source, load_emails_from_csv, load_emails_from_maildir, LoadOptions};
pub use message::{extract_body, extract_date, extract_sender, extract_subject, parse_message};

/// Where the Enron corpus can be downloaded
pub const DATASET_URL: &str = "https://www.kaggle.com/datasets/wcukierski/enron-email-dataset";

/// Parser errors
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Corpus not found at {0}; download the Enron dataset from {DATASET_URL}")]
    NotFound(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// Result type for parser operations
pub type ParserResult<T> = Result<T, ParserError>;
