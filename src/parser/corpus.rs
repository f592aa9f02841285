//! Corpus loaders
//!
//! Reads the Enron corpus either from the Kaggle CSV export (`file`,
//! `message` columns) or from the original maildir tree.

use std::fs;
use std::path::{Path, PathBuf};

use super::message::parse_message;
use super::{ParserError, ParserResult};
use crate::models::email::{Corpus, Email};

/// Default minimum body length (in characters) for an email to be kept
pub const DEFAULT_MIN_BODY_CHARS: usize = 100;

/// Options shared by all corpus loaders
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Read at most this many rows/files (applied before filtering)
    pub limit: Option<usize>,
    /// Bodies must be strictly longer than this to be kept
    pub min_body_chars: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            limit: None,
            min_body_chars: DEFAULT_MIN_BODY_CHARS,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    file: String,
    message: String,
}

/// True when the path names a CSV file rather than a maildir directory
pub fn is_csv_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Resolve a data path to the CSV file inside it when given a directory
/// that contains `emails.csv`
pub fn resolve_source(path: &Path) -> PathBuf {
    if path.is_dir() {
        let csv = path.join("emails.csv");
        if csv.is_file() {
            return csv;
        }
    }
    path.to_path_buf()
}

/// Load emails from the Kaggle CSV export
pub fn load_emails_from_csv(path: &Path, options: &LoadOptions) -> ParserResult<Corpus> {
    if !path.is_file() {
        return Err(ParserError::NotFound(path.display().to_string()));
    }

    tracing::info!("Loading emails from {}", path.display());

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    if !headers.iter().any(|h| h == "message") {
        return Err(ParserError::MissingField("message".to_string()));
    }

    let mut rows_read = 0usize;
    let mut emails = Vec::new();

    for record in reader.deserialize::<CsvRow>() {
        if let Some(limit) = options.limit {
            if rows_read >= limit {
                break;
            }
        }
        rows_read += 1;

        let row = match record {
            Ok(row) => row,
            Err(e) => {
                tracing::warn!("Skipping malformed CSV row {}: {}", rows_read, e);
                continue;
            }
        };

        let email = parse_message(&row.file, &row.message);
        if keep(&email, options) {
            emails.push(email);
        }
    }

    if let Some(limit) = options.limit {
        tracing::info!("Read the first {} rows for quick analysis", limit);
    }
    tracing::info!("{} emails ready for analysis", emails.len());

    Ok(Corpus::new(path.display().to_string(), emails, rows_read))
}

/// Load emails from a maildir tree (one raw message per file)
pub fn load_emails_from_maildir(root: &Path, options: &LoadOptions) -> ParserResult<Corpus> {
    if !root.is_dir() {
        return Err(ParserError::NotFound(root.display().to_string()));
    }

    tracing::info!("Scanning maildir {}", root.display());

    let pattern = root.join("**").join("*");
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    if let Some(limit) = options.limit {
        files.truncate(limit);
    }

    let rows_read = files.len();
    let mut emails = Vec::new();

    for path in files {
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Skipping unreadable message {}: {}", path.display(), e);
                continue;
            }
        };
        let raw = String::from_utf8_lossy(&bytes);

        let file = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .to_string();

        let email = parse_message(&file, &raw);
        if keep(&email, options) {
            emails.push(email);
        }
    }

    tracing::info!("{} emails ready for analysis", emails.len());

    Ok(Corpus::new(root.display().to_string(), emails, rows_read))
}

fn keep(email: &Email, options: &LoadOptions) -> bool {
    email.body.chars().count() > options.min_body_chars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_csv_source() {
        assert!(is_csv_source(Path::new("data/raw/emails.csv")));
        assert!(is_csv_source(Path::new("EMAILS.CSV")));
        assert!(!is_csv_source(Path::new("data/maildir")));
    }

    #[test]
    fn test_missing_csv() {
        let err = load_emails_from_csv(Path::new("/nonexistent/emails.csv"), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, ParserError::NotFound(_)));
        assert!(err.to_string().contains("kaggle"));
    }

    #[test]
    fn test_missing_maildir() {
        let err = load_emails_from_maildir(Path::new("/nonexistent/maildir"), &LoadOptions::default())
            .unwrap_err();
        assert!(matches!(err, ParserError::NotFound(_)));
    }

    #[test]
    fn test_default_options() {
        let options = LoadOptions::default();
        assert!(options.limit.is_none());
        assert_eq!(options.min_body_chars, 100);
    }
}
