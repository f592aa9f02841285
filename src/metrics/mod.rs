//! Linguistic metrics module
//!
//! Builds the per-author profile from raw email bodies:
//! - Comfort words and vocabulary diversity
//! - Favorite phrases (n-grams)
//! - Writing style and readability
//! - Fingerprint (openings, closings, transitions, emphasis)
//! - Email patterns (length, greetings, signatures)

pub mod email_patterns;
pub mod fingerprint;
pub mod phrases;
pub mod readability;
pub mod stopwords;
pub mod style;
pub mod vocabulary;

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::models::metrics::{AuthorProfile, TermCount};
use crate::parser::tokenize::lower_word_tokens;

/// Label used for profiles built from free text rather than a corpus author
pub const CUSTOM_TEXT_PERSON: &str = "Custom Text";

/// Tunables for a single analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerSettings {
    /// Number of comfort words to keep
    pub top_words: usize,
    /// Number of favorite phrases to keep
    pub top_phrases: usize,
    /// Phrase length in words
    pub phrase_ngram: usize,
    /// Entries kept for starters, closings and transitions
    pub top_fingerprint: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            top_words: 30,
            top_phrases: 20,
            phrase_ngram: 3,
            top_fingerprint: 5,
        }
    }
}

/// Full analysis of one author's emails
pub fn analyze_author(emails: &[String], person: &str, settings: &AnalyzerSettings) -> AuthorProfile {
    let start = Instant::now();

    let full_text = emails.join(" ");
    let tokens = lower_word_tokens(&full_text);

    let profile = AuthorProfile {
        person: person.to_string(),
        total_emails: emails.len(),
        comfort_words: vocabulary::comfort_words(&tokens, settings.top_words),
        favorite_phrases: phrases::favorite_phrases(
            emails,
            settings.phrase_ngram,
            settings.top_phrases,
        ),
        writing_style: style::analyze_writing_style(&full_text),
        vocabulary_diversity: vocabulary::calculate_diversity(&tokens),
        linguistic_fingerprint: fingerprint::create_fingerprint(emails, settings.top_fingerprint),
        email_patterns: email_patterns::analyze_email_patterns(emails),
        analyzed_at: chrono::Utc::now().to_rfc3339(),
    };

    tracing::debug!(
        "Analyzed {} ({} emails, {} tokens) in {:?}",
        person,
        emails.len(),
        tokens.len(),
        start.elapsed()
    );

    profile
}

/// Analyze a single free-form text as if it were one email
pub fn analyze_text(text: &str, settings: &AnalyzerSettings) -> AuthorProfile {
    analyze_author(&[text.to_string()], CUSTOM_TEXT_PERSON, settings)
}

/// Count items and return the `n` most frequent.
///
/// Ties keep the order in which items were first seen.
pub(crate) fn top_counts<'a, I>(items: I, n: usize) -> Vec<TermCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&'a str, (usize, usize)> = HashMap::new();

    for (index, item) in items.into_iter().enumerate() {
        counts.entry(item).or_insert((0, index)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(term, (count, first_seen))| (term, count, first_seen))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(n)
        .map(|(term, count, _)| TermCount::new(term, count))
        .collect()
}
