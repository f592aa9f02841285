//! CSV export functionality
//!
//! Provides CSV serialization for comfort words, profile summaries
//! and author comparisons.

use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;

use super::{ExportableProfile, ExportableTerm};
use crate::models::metrics::ComparisonRow;
use crate::CommandError;

/// Header row for comfort word exports
pub const TERM_HEADERS: &[&str] = &["rank", "term", "count"];

/// Header row for profile summary exports
pub const PROFILE_HEADERS: &[&str] = &[
    "person",
    "total_emails",
    "total_words",
    "unique_words",
    "lexical_diversity",
    "vocabulary_richness",
    "reading_ease",
    "avg_sentence_length",
    "exclamation_usage",
    "question_usage",
    "avg_email_length",
    "top_words",
    "analyzed_at",
];

/// Header row for comparison exports
pub const COMPARISON_HEADERS: &[&str] = &[
    "person",
    "lexical_diversity_pct",
    "reading_ease",
    "avg_sentence_length",
    "total_emails",
];

/// Serialize records to a CSV file.
///
/// The header row is written explicitly so an empty export still has one.
fn write_records<T: Serialize>(headers: &[&str], records: &[T], path: &Path) -> Result<(), CommandError> {
    let file = std::fs::File::create(path)
        .map_err(|e| CommandError::Internal(format!("Failed to create CSV file: {}", e)))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    writer
        .write_record(headers)
        .map_err(|e| CommandError::Internal(format!("Failed to write CSV header: {}", e)))?;

    for record in records {
        writer
            .serialize(record)
            .map_err(|e| CommandError::Internal(format!("Failed to write CSV record: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| CommandError::Internal(format!("Failed to flush CSV: {}", e)))?;

    tracing::info!("Wrote {} CSV records to {}", records.len(), path.display());
    Ok(())
}

/// Write ranked comfort words (or phrases) to CSV format
pub fn write_terms_csv(terms: &[ExportableTerm], path: &Path) -> Result<(), CommandError> {
    write_records(TERM_HEADERS, terms, path)
}

/// Write profile summaries to CSV format
pub fn write_profiles_csv(profiles: &[ExportableProfile], path: &Path) -> Result<(), CommandError> {
    write_records(PROFILE_HEADERS, profiles, path)
}

/// Write comparison rows to CSV format
pub fn write_comparison_csv(rows: &[ComparisonRow], path: &Path) -> Result<(), CommandError> {
    write_records(COMPARISON_HEADERS, rows, path)
}
