//! Readability calculations
//!
//! Implements the Flesch Reading Ease score:
//! FRE = 206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)
//!
//! Typical interpretation:
//! - 90-100: very easy
//! - 60-70: plain English
//! - 0-30: very difficult (academic, legal)

use lazy_static::lazy_static;
use regex::Regex;

use crate::parser::tokenize::{lexicon_count, sentences};

lazy_static! {
    /// Silent endings removed before counting vowel groups
    static ref SILENT_SUFFIX: Regex = Regex::new(r"(?:[^laeiouy]es|ed|[^laeiouy]e)$").unwrap();
    static ref LEADING_Y: Regex = Regex::new(r"^y").unwrap();
    static ref VOWEL_GROUP: Regex = Regex::new(r"[aeiouy]+").unwrap();
}

/// Estimate the syllables in a single word.
///
/// Any piece that counts as a lexicon word (it holds a letter or digit) has
/// at least one syllable, so numbers weigh the same on both sides of the
/// Flesch formula. Pure punctuation has none.
pub fn count_syllables(word: &str) -> usize {
    if !word.chars().any(char::is_alphanumeric) {
        return 0;
    }

    let word: String = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();

    if word.is_empty() {
        return 1;
    }
    if word.len() <= 3 {
        return 1;
    }

    let word = SILENT_SUFFIX.replace(&word, "");
    let word = LEADING_Y.replace(&word, "");

    VOWEL_GROUP.find_iter(&word).count().max(1)
}

/// Total syllables across the lexicon words of a text
pub fn syllable_count(text: &str) -> usize {
    text.split_whitespace().map(count_syllables).sum()
}

/// Number of sentences, at least 1 for non-empty text
pub fn sentence_count(text: &str) -> usize {
    let count = sentences(text).len();
    if count == 0 && lexicon_count(text) > 0 {
        1
    } else {
        count
    }
}

/// Average words per sentence
pub fn avg_sentence_length(text: &str) -> f64 {
    let sentences = sentence_count(text);
    if sentences == 0 {
        return 0.0;
    }
    lexicon_count(text) as f64 / sentences as f64
}

/// Average syllables per word
pub fn avg_syllables_per_word(text: &str) -> f64 {
    let words = lexicon_count(text);
    if words == 0 {
        return 0.0;
    }
    syllable_count(text) as f64 / words as f64
}

/// Flesch Reading Ease, rounded to two decimals. Empty text scores 0.
pub fn flesch_reading_ease(text: &str) -> f64 {
    if lexicon_count(text) == 0 {
        return 0.0;
    }

    let score = 206.835 - 1.015 * avg_sentence_length(text) - 84.6 * avg_syllables_per_word(text);
    (score * 100.0).round() / 100.0
}

/// Get a readability rating label
pub fn reading_ease_rating(score: f64) -> &'static str {
    if score >= 90.0 {
        "Very Easy"
    } else if score >= 70.0 {
        "Easy"
    } else if score >= 60.0 {
        "Plain English"
    } else if score >= 50.0 {
        "Fairly Difficult"
    } else if score >= 30.0 {
        "Difficult"
    } else {
        "Very Difficult"
    }
}
