//! Plain-text analysis report

use std::fmt::Write as _;
use std::path::Path;

use crate::metrics::readability::reading_ease_rating;
use crate::models::metrics::{AuthorComparison, AuthorProfile};
use crate::recommendations::RecommendationSummary;
use crate::CommandError;

/// Comfort words listed in the report
const REPORT_TOP_WORDS: usize = 10;

/// Render the linguistic analysis report for one profile
pub fn render_report(profile: &AuthorProfile, recommendations: Option<&RecommendationSummary>) -> String {
    let vocab = &profile.vocabulary_diversity;
    let style = &profile.writing_style;
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "LINGUISTIC ANALYSIS REPORT");
    let _ = writeln!(out, "==========================");
    let _ = writeln!(out);
    let _ = writeln!(out, "Person: {}", profile.person);
    let _ = writeln!(out, "Emails analyzed: {}", profile.total_emails);
    let _ = writeln!(out, "Generated: {}", profile.analyzed_at);
    let _ = writeln!(out);
    let _ = writeln!(out, "Unique words: {}", vocab.unique_words);
    let _ = writeln!(out, "Lexical diversity: {:.2}%", vocab.lexical_diversity * 100.0);
    let _ = writeln!(
        out,
        "Reading ease: {:.1}/100 ({})",
        style.reading_ease,
        reading_ease_rating(style.reading_ease)
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "TOP {} COMFORT WORDS:", REPORT_TOP_WORDS);
    if profile.comfort_words.is_empty() {
        let _ = writeln!(out, "- (none)");
    }
    for word in profile.comfort_words.iter().take(REPORT_TOP_WORDS) {
        let _ = writeln!(out, "- {}: {} times", word.term, word.count);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "WRITING STYLE:");
    let _ = writeln!(out, "- Average sentence length: {:.1} words", style.avg_sentence_length);
    let _ = writeln!(out, "- Exclamation usage: {:.2}%", style.exclamation_usage * 100.0);
    let _ = writeln!(out, "- Question usage: {:.2}%", style.question_usage * 100.0);

    if let Some(summary) = recommendations {
        let _ = writeln!(out);
        let _ = writeln!(out, "RECOMMENDATIONS:");
        for rec in &summary.recommendations {
            let _ = writeln!(out, "- [{}] {}", rec.rec_type.label(), rec.title);
            for item in &rec.action_items {
                let _ = writeln!(out, "    * {}", item);
            }
        }
    }

    out
}

/// Write the text report to a file
pub fn write_report(
    profile: &AuthorProfile,
    recommendations: Option<&RecommendationSummary>,
    path: &Path,
) -> Result<(), CommandError> {
    std::fs::write(path, render_report(profile, recommendations))
        .map_err(|e| CommandError::Internal(format!("Failed to write report: {}", e)))?;

    tracing::info!("Wrote text report to {}", path.display());
    Ok(())
}

/// Render an author comparison as an aligned plain-text table
pub fn render_comparison(comparison: &AuthorComparison) -> String {
    let width = comparison
        .rows
        .iter()
        .map(|r| r.person.len())
        .max()
        .unwrap_or(0)
        .max("Person".len());
    let mut out = String::new();

    let _ = writeln!(out, "AUTHOR COMPARISON");
    let _ = writeln!(out, "=================");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<width$}  {:>10}  {:>12}  {:>15}  {:>6}",
        "Person", "Diversity", "Reading Ease", "Sentence Length", "Emails",
        width = width
    );

    for (i, row) in comparison.rows.iter().enumerate() {
        let mut marks = Vec::new();
        if comparison.max_diversity == Some(i) {
            marks.push("most diverse");
        }
        if comparison.max_reading_ease == Some(i) {
            marks.push("most readable");
        }
        let _ = write!(
            out,
            "{:<width$}  {:>9.1}%  {:>12.1}  {:>15.1}  {:>6}",
            row.person,
            row.lexical_diversity_pct,
            row.reading_ease,
            row.avg_sentence_length,
            row.total_emails,
            width = width
        );
        if !marks.is_empty() {
            let _ = write!(out, "  ({})", marks.join(", "));
        }
        let _ = writeln!(out);
    }

    out
}

/// Write the comparison table to a file
pub fn write_comparison_report(comparison: &AuthorComparison, path: &Path) -> Result<(), CommandError> {
    std::fs::write(path, render_comparison(comparison))
        .map_err(|e| CommandError::Internal(format!("Failed to write report: {}", e)))?;

    tracing::info!("Wrote comparison report to {}", path.display());
    Ok(())
}
