//! Metrics data types
//!
//! Types for the per-author linguistic profile and its sections

use serde::{Deserialize, Serialize};

/// A ranked term (word, phrase, starter, closing) with its frequency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

impl TermCount {
    pub fn new(term: impl Into<String>, count: usize) -> Self {
        Self {
            term: term.into(),
            count,
        }
    }
}

/// Punctuation habits, each expressed per 1000 characters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PunctuationStyle {
    pub ellipsis_usage: f64,
    pub dash_usage: f64,
    pub parenthesis_usage: f64,
    pub semicolon_usage: f64,
}

/// Structural writing style
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WritingStyle {
    /// Words per sentence
    pub avg_sentence_length: f64,
    /// Flesch reading ease (higher = easier)
    pub reading_ease: f64,
    /// Exclamation marks per sentence
    pub exclamation_usage: f64,
    /// Question marks per sentence
    pub question_usage: f64,
    /// Share of tokens written entirely in uppercase
    pub uppercase_ratio: f64,
    pub punctuation_style: PunctuationStyle,
}

/// Vocabulary diversity figures
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyDiversity {
    /// Meaningful (alphabetic, non-stopword) tokens
    pub total_words: usize,
    pub unique_words: usize,
    /// unique_words / total_words
    pub lexical_diversity: f64,
    /// Mean type-token ratio over 1000-word chunks
    pub vocabulary_richness: f64,
}

/// How an author emphasizes points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmphasisPatterns {
    pub all_caps: usize,
    pub repetition: usize,
    pub very_really: usize,
    pub absolutely_definitely: usize,
}

/// Stylistic fingerprint of an author
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinguisticFingerprint {
    pub starter_phrases: Vec<TermCount>,
    pub closing_phrases: Vec<TermCount>,
    /// Most used transition words, highest first
    pub transition_words: Vec<TermCount>,
    pub emphasis_patterns: EmphasisPatterns,
}

/// Email-specific habits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailPatterns {
    /// Mean whitespace-separated words per email
    pub avg_email_length: f64,
    pub greeting_style: Vec<TermCount>,
    pub signature_style: Vec<TermCount>,
}

/// Full linguistic profile for one author (or one custom text)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub person: String,
    pub total_emails: usize,
    pub comfort_words: Vec<TermCount>,
    pub favorite_phrases: Vec<TermCount>,
    pub writing_style: WritingStyle,
    pub vocabulary_diversity: VocabularyDiversity,
    pub linguistic_fingerprint: LinguisticFingerprint,
    pub email_patterns: EmailPatterns,
    pub analyzed_at: String,
}

impl AuthorProfile {
    /// Short display label: the part of the address before `@`
    pub fn short_name(&self) -> &str {
        short_person_name(&self.person)
    }
}

/// Strip the domain from an email address
pub fn short_person_name(person: &str) -> &str {
    person.split('@').next().unwrap_or(person)
}

/// One row of a multi-author comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub person: String,
    /// Lexical diversity as a percentage
    pub lexical_diversity_pct: f64,
    pub reading_ease: f64,
    pub avg_sentence_length: f64,
    pub total_emails: usize,
}

impl From<&AuthorProfile> for ComparisonRow {
    fn from(profile: &AuthorProfile) -> Self {
        Self {
            person: profile.short_name().to_string(),
            lexical_diversity_pct: profile.vocabulary_diversity.lexical_diversity * 100.0,
            reading_ease: profile.writing_style.reading_ease,
            avg_sentence_length: profile.writing_style.avg_sentence_length,
            total_emails: profile.total_emails,
        }
    }
}

/// Comparison across several authors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorComparison {
    pub rows: Vec<ComparisonRow>,
    /// Index of the row with the highest lexical diversity
    pub max_diversity: Option<usize>,
    /// Index of the row with the highest reading ease
    pub max_reading_ease: Option<usize>,
}

impl AuthorComparison {
    pub fn from_rows(rows: Vec<ComparisonRow>) -> Self {
        let max_diversity = argmax(&rows, |r| r.lexical_diversity_pct);
        let max_reading_ease = argmax(&rows, |r| r.reading_ease);
        Self {
            rows,
            max_diversity,
            max_reading_ease,
        }
    }
}

/// Index of the first maximum
fn argmax<F>(rows: &[ComparisonRow], key: F) -> Option<usize>
where
    F: Fn(&ComparisonRow) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, row) in rows.iter().enumerate() {
        let value = key(row);
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(person: &str, diversity: f64, ease: f64) -> ComparisonRow {
        ComparisonRow {
            person: person.to_string(),
            lexical_diversity_pct: diversity,
            reading_ease: ease,
            avg_sentence_length: 12.0,
            total_emails: 40,
        }
    }

    #[test]
    fn test_short_person_name() {
        assert_eq!(short_person_name("jeff.dasovich@enron.com"), "jeff.dasovich");
        assert_eq!(short_person_name("Custom Text"), "Custom Text");
    }

    #[test]
    fn test_comparison_maxima() {
        let comparison = AuthorComparison::from_rows(vec![
            row("a", 40.0, 60.0),
            row("b", 55.0, 30.0),
            row("c", 55.0, 70.0),
        ]);

        // First maximum wins on ties
        assert_eq!(comparison.max_diversity, Some(1));
        assert_eq!(comparison.max_reading_ease, Some(2));
    }

    #[test]
    fn test_comparison_empty() {
        let comparison = AuthorComparison::from_rows(Vec::new());
        assert!(comparison.max_diversity.is_none());
        assert!(comparison.max_reading_ease.is_none());
    }
}
