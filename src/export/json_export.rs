//! JSON export functionality
//!
//! Provides JSON serialization for full profiles and comparisons
//! with full structure preservation.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::models::metrics::{AuthorComparison, AuthorProfile};
use crate::recommendations::RecommendationSummary;
use crate::CommandError;

const EXPORT_VERSION: &str = "1.0.0";

/// Full profile export structure
#[derive(Debug, Clone, Serialize)]
pub struct ProfileExportJson<'a> {
    pub export_date: String,
    pub export_version: &'static str,
    pub profile: &'a AuthorProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<&'a RecommendationSummary>,
}

/// Comparison export structure
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonExportJson<'a> {
    pub export_date: String,
    pub export_version: &'static str,
    pub total_people: usize,
    pub comparison: &'a AuthorComparison,
}

fn write_pretty<T: Serialize>(value: &T, path: &Path) -> Result<(), CommandError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CommandError::Internal(format!("Failed to serialize JSON: {}", e)))?;

    let mut file = std::fs::File::create(path)
        .map_err(|e| CommandError::Internal(format!("Failed to create JSON file: {}", e)))?;

    file.write_all(json.as_bytes())
        .map_err(|e| CommandError::Internal(format!("Failed to write JSON file: {}", e)))?;

    tracing::info!("Wrote JSON export to {}", path.display());
    Ok(())
}

/// Write a full profile (and optional recommendations) to JSON format
pub fn write_profile_json(
    profile: &AuthorProfile,
    recommendations: Option<&RecommendationSummary>,
    path: &Path,
) -> Result<(), CommandError> {
    let export = ProfileExportJson {
        export_date: chrono::Utc::now().to_rfc3339(),
        export_version: EXPORT_VERSION,
        profile,
        recommendations,
    };

    write_pretty(&export, path)
}

/// Write an author comparison to JSON format
pub fn write_comparison_json(comparison: &AuthorComparison, path: &Path) -> Result<(), CommandError> {
    let export = ComparisonExportJson {
        export_date: chrono::Utc::now().to_rfc3339(),
        export_version: EXPORT_VERSION,
        total_people: comparison.rows.len(),
        comparison,
    };

    write_pretty(&export, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{analyze_text, AnalyzerSettings};
    use crate::models::metrics::ComparisonRow;
    use crate::recommendations::recommend_for_profile;

    fn sample_profile() -> AuthorProfile {
        analyze_text(
            "Hi Mark, the forecast is ready. Please review the forecast today.\n\nThanks,\nJeff",
            &AnalyzerSettings::default(),
        )
    }

    #[test]
    fn test_write_profile_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        let profile = sample_profile();
        let recs = recommend_for_profile(&profile);

        write_profile_json(&profile, Some(&recs), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(value["export_version"], "1.0.0");
        assert!(value["export_date"].is_string());
        assert_eq!(value["profile"]["person"], "Custom Text");
        assert_eq!(value["profile"]["comfort_words"][0]["term"], "forecast");
        assert!(value["recommendations"].is_object());
    }

    #[test]
    fn test_write_profile_json_without_recommendations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");

        write_profile_json(&sample_profile(), None, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value.get("recommendations").is_none());
    }

    #[test]
    fn test_write_comparison_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comparison.json");

        let comparison = AuthorComparison::from_rows(vec![
            ComparisonRow {
                person: "a".to_string(),
                lexical_diversity_pct: 20.0,
                reading_ease: 70.0,
                avg_sentence_length: 12.0,
                total_emails: 30,
            },
            ComparisonRow {
                person: "b".to_string(),
                lexical_diversity_pct: 25.0,
                reading_ease: 50.0,
                avg_sentence_length: 18.0,
                total_emails: 40,
            },
        ]);

        write_comparison_json(&comparison, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["total_people"], 2);
        assert_eq!(value["comparison"]["max_diversity"], 1);
        assert_eq!(value["comparison"]["max_reading_ease"], 0);
    }
}
