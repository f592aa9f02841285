//! Export module for CSV, JSON and text report output
//!
//! Provides flattened export records for profiles and comparisons,
//! plus helpers for choosing where exported files land.

pub mod csv_export;
pub mod json_export;
pub mod text_report;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::metrics::{AuthorProfile, TermCount};
use crate::CommandError;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Text,
}

impl std::str::FromStr for ExportFormat {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(CommandError::Export(format!(
                "Invalid export format: {}. Use 'csv', 'json' or 'text'",
                s
            ))),
        }
    }
}

impl ExportFormat {
    /// Get file extension for format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }
}

/// Exportable profile summary record for CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportableProfile {
    pub person: String,
    pub total_emails: usize,
    pub total_words: usize,
    pub unique_words: usize,
    pub lexical_diversity: f64,
    pub vocabulary_richness: f64,
    pub reading_ease: f64,
    pub avg_sentence_length: f64,
    pub exclamation_usage: f64,
    pub question_usage: f64,
    pub avg_email_length: f64,
    pub top_words: String, // Comma-separated
    pub analyzed_at: String,
}

/// Comfort words listed in the summary record
const SUMMARY_TOP_WORDS: usize = 5;

impl From<&AuthorProfile> for ExportableProfile {
    fn from(profile: &AuthorProfile) -> Self {
        Self {
            person: profile.person.clone(),
            total_emails: profile.total_emails,
            total_words: profile.vocabulary_diversity.total_words,
            unique_words: profile.vocabulary_diversity.unique_words,
            lexical_diversity: profile.vocabulary_diversity.lexical_diversity,
            vocabulary_richness: profile.vocabulary_diversity.vocabulary_richness,
            reading_ease: profile.writing_style.reading_ease,
            avg_sentence_length: profile.writing_style.avg_sentence_length,
            exclamation_usage: profile.writing_style.exclamation_usage,
            question_usage: profile.writing_style.question_usage,
            avg_email_length: profile.email_patterns.avg_email_length,
            top_words: profile
                .comfort_words
                .iter()
                .take(SUMMARY_TOP_WORDS)
                .map(|w| w.term.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            analyzed_at: profile.analyzed_at.clone(),
        }
    }
}

/// Exportable ranked term (comfort word or phrase)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportableTerm {
    pub rank: usize,
    pub term: String,
    pub count: usize,
}

/// Number ranked terms starting at 1
pub fn ranked_terms(terms: &[TermCount]) -> Vec<ExportableTerm> {
    terms
        .iter()
        .enumerate()
        .map(|(i, t)| ExportableTerm {
            rank: i + 1,
            term: t.term.clone(),
            count: t.count,
        })
        .collect()
}

/// Get the default export directory (Downloads folder or temp dir)
pub fn get_export_directory() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::document_dir)
        .unwrap_or_else(std::env::temp_dir)
}

/// Generate a timestamped filename for exports
pub fn generate_export_filename(prefix: &str, extension: &str) -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    format!("{}_{}.{}", prefix, timestamp, extension)
}

/// Make a person label safe to use in a filename
pub fn filename_prefix(label: &str) -> String {
    let cleaned: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();

    if cleaned.trim_matches('_').is_empty() {
        "profile".to_string()
    } else {
        cleaned
    }
}

// Re-export writers
pub use csv_export::*;
pub use json_export::*;
pub use text_report::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("Text".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);

        let err = "xml".parse::<ExportFormat>().unwrap_err();
        assert!(err.to_string().contains("'csv', 'json' or 'text'"));
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::Text.extension(), "txt");
    }

    #[test]
    fn test_generate_export_filename_format() {
        let filename = generate_export_filename("comfort_words", "csv");

        // Should follow pattern: comfort_words_YYYYMMDD_HHMMSS.csv
        assert!(filename.starts_with("comfort_words_"));
        assert!(filename.ends_with(".csv"));
        assert_eq!(filename.len(), "comfort_words_".len() + 15 + ".csv".len());
    }

    #[test]
    fn test_get_export_directory() {
        let dir = get_export_directory();
        // Should return some path (either Downloads, Documents, or temp)
        assert!(dir.to_str().is_some());
    }

    #[test]
    fn test_export_format_serialization() {
        let json = serde_json::to_string(&ExportFormat::Text).unwrap();
        assert_eq!(json, "\"text\"");

        let csv: ExportFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(csv, ExportFormat::Csv);
    }

    #[test]
    fn test_ranked_terms() {
        let terms = vec![TermCount::new("forecast", 9), TermCount::new("power", 4)];
        let ranked = ranked_terms(&terms);

        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[1].term, "power");
    }

    #[test]
    fn test_filename_prefix() {
        assert_eq!(filename_prefix("phillip.allen"), "phillip_allen");
        assert_eq!(filename_prefix("Custom Text"), "Custom_Text");
        assert_eq!(filename_prefix("@@"), "profile");
    }
}
