//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::commands::{AnalysisResult, AuthorSummary};
use crate::db::queries::ProfileRecord;
use crate::metrics::readability::reading_ease_rating;
use crate::models::metrics::{AuthorComparison, TermCount};
use crate::recommendations::{Recommendation, RecommendationType};
use crate::CommandError;

/// Rows shown for ranked words and phrases
const TOP_ROWS: usize = 10;

/// Widest bar drawn next to a ranked term
const BAR_WIDTH: usize = 30;

/// Print any result as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CommandError::Internal(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Print eligible authors as a table.
pub fn print_authors_table(authors: &[AuthorSummary]) {
    if authors.is_empty() {
        println!("{}", "No authors with enough emails.".dimmed());
        return;
    }

    println!("{:<40} {:>7}  {:<10}  {:<10}", "Author", "Emails", "From", "To");
    println!("{}", "─".repeat(72));

    for author in authors {
        println!(
            "{:<40} {:>7}  {:<10}  {:<10}",
            truncate(&author.author, 40),
            author.email_count,
            day(author.first_date.as_deref()),
            day(author.last_date.as_deref())
        );
    }

    println!();
    println!("{} author(s) total", authors.len());
}

/// Print a full analysis.
pub fn print_analysis(result: &AnalysisResult) {
    let profile = &result.profile;
    let vocab = &profile.vocabulary_diversity;
    let style = &profile.writing_style;

    println!(
        "{} {}",
        profile.person.cyan().bold(),
        format!("({} emails)", profile.total_emails).dimmed()
    );
    println!();

    println!("{}", "Vocabulary".bold());
    println!("  Unique words:        {}", vocab.unique_words);
    println!("  Lexical diversity:   {:.1}%", vocab.lexical_diversity * 100.0);
    println!("  Vocabulary richness: {:.3}", vocab.vocabulary_richness);
    println!();

    println!("{}", "Comfort Words".bold());
    print_ranked(&profile.comfort_words);
    println!();

    if !profile.favorite_phrases.is_empty() {
        println!("{}", "Favorite Phrases".bold());
        print_ranked(&profile.favorite_phrases);
        println!();
    }

    println!("{}", "Writing Style".bold());
    println!(
        "  Reading ease:        {:.1} {}",
        style.reading_ease,
        format!("({})", reading_ease_rating(style.reading_ease)).dimmed()
    );
    println!("  Sentence length:     {:.1} words", style.avg_sentence_length);
    println!("  Exclamations:        {:.2} per sentence", style.exclamation_usage);
    println!("  Questions:           {:.2} per sentence", style.question_usage);
    println!("  Uppercase ratio:     {:.1}%", style.uppercase_ratio * 100.0);
    println!(
        "  Per 1000 chars:      ... {:.2}  - {:.2}  ( {:.2}  ; {:.2}",
        style.punctuation_style.ellipsis_usage,
        style.punctuation_style.dash_usage,
        style.punctuation_style.parenthesis_usage,
        style.punctuation_style.semicolon_usage
    );
    println!();

    println!("{}", "Style Radar".bold());
    for (axis, value) in result.radar.axes() {
        println!("  {:<18} {:>5.1} {}", axis, value, bar(value / 100.0).blue());
    }
    println!();

    let fingerprint = &profile.linguistic_fingerprint;
    println!("{}", "Fingerprint".bold());
    println!("  Openings:    {}", join_terms(&fingerprint.starter_phrases));
    println!("  Closings:    {}", join_terms(&fingerprint.closing_phrases));
    println!("  Transitions: {}", join_terms(&fingerprint.transition_words));
    let emphasis = &fingerprint.emphasis_patterns;
    println!(
        "  Emphasis:    CAPS {}, repeated words {}, very/really {}, absolutely/definitely {}",
        emphasis.all_caps, emphasis.repetition, emphasis.very_really, emphasis.absolutely_definitely
    );
    println!();

    let patterns = &profile.email_patterns;
    println!("{}", "Email Patterns".bold());
    println!("  Average length: {:.0} words", patterns.avg_email_length);
    println!("  Greetings:      {}", join_terms(&patterns.greeting_style));
    println!("  Sign-offs:      {}", join_terms(&patterns.signature_style));
    println!();

    print_recommendations(&result.recommendations.recommendations);
}

/// Print recommendations, most important first.
pub fn print_recommendations(recommendations: &[Recommendation]) {
    println!("{}", "Recommendations".bold());
    if recommendations.is_empty() {
        println!("  {}", "Not enough text for recommendations.".dimmed());
        return;
    }

    for rec in recommendations {
        println!(
            "  {} {} {}",
            type_marker(rec.rec_type),
            rec.title.bold(),
            format!("[{} confidence]", rec.confidence_level()).dimmed()
        );
        println!("    {}", rec.description);
        for item in &rec.action_items {
            println!("    - {}", item);
        }
        println!("    {}", rec.based_on.dimmed());
    }
}

/// Print an author comparison table, highlighting the best values.
pub fn print_comparison(comparison: &AuthorComparison) {
    if comparison.rows.is_empty() {
        println!("{}", "Nothing to compare.".dimmed());
        return;
    }

    println!(
        "{:<24} {:>10} {:>13} {:>16} {:>7}",
        "Person", "Diversity", "Reading Ease", "Sentence Length", "Emails"
    );
    println!("{}", "─".repeat(74));

    for (i, row) in comparison.rows.iter().enumerate() {
        let diversity = format!("{:>9.1}%", row.lexical_diversity_pct);
        let ease = format!("{:>13.1}", row.reading_ease);

        println!(
            "{:<24} {} {} {:>16.1} {:>7}",
            truncate(&row.person, 24),
            highlight(diversity, comparison.max_diversity == Some(i)),
            highlight(ease, comparison.max_reading_ease == Some(i)),
            row.avg_sentence_length,
            row.total_emails
        );
    }
}

/// Print stored profiles as a table.
pub fn print_history_table(records: &[ProfileRecord]) {
    if records.is_empty() {
        println!("{}", "No saved profiles.".dimmed());
        return;
    }

    println!(
        "{:<6} {:<32} {:>7} {:>10} {:>9}  {:<20}",
        "ID", "Person", "Emails", "Diversity", "Ease", "Analyzed"
    );
    println!("{}", "─".repeat(90));

    for record in records {
        println!(
            "{:<6} {:<32} {:>7} {:>9.1}% {:>9.1}  {:<20}",
            record.id,
            truncate(&record.person, 32),
            record.total_emails,
            record.lexical_diversity * 100.0,
            record.reading_ease,
            truncate(&record.analyzed_at, 19)
        );
    }

    println!();
    println!("{} profile(s)", records.len());
}

fn print_ranked(terms: &[TermCount]) {
    if terms.is_empty() {
        println!("  {}", "(none)".dimmed());
        return;
    }

    let max = terms.iter().map(|t| t.count).max().unwrap_or(1).max(1) as f64;
    for (i, term) in terms.iter().take(TOP_ROWS).enumerate() {
        println!(
            "  {:>2}. {:<28} {:>5} {}",
            i + 1,
            truncate(&term.term, 28),
            term.count,
            bar(term.count as f64 / max).green()
        );
    }
}

fn type_marker(rec_type: RecommendationType) -> ColoredString {
    if rec_type.is_actionable() {
        "!".yellow().bold()
    } else {
        "+".green().bold()
    }
}

fn highlight(value: String, best: bool) -> ColoredString {
    if best {
        value.green().bold()
    } else {
        value.normal()
    }
}

fn join_terms(terms: &[TermCount]) -> String {
    if terms.is_empty() {
        return "-".to_string();
    }
    terms
        .iter()
        .map(|t| format!("{} ({})", t.term, t.count))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Horizontal bar for a 0-1 fraction.
fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

/// Date part of an RFC 3339 timestamp.
fn day(timestamp: Option<&str>) -> String {
    timestamp
        .map(|t| t.chars().take(10).collect())
        .unwrap_or_else(|| "-".to_string())
}

/// Truncate a string to at most `max_len` characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
