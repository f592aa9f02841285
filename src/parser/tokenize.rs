//! Word and sentence tokenization
//!
//! Lightweight tokenizers tuned for English business email. Words follow a
//! Treebank-like split: alphabetic runs, apostrophe suffixes (`'t`, `'s`),
//! numbers, and single punctuation characters. Letters and digits are
//! matched by Unicode class, so accented words stay whole.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD_TOKEN: Regex =
        Regex::new(r"\p{Alphabetic}+|'\p{Alphabetic}+|\p{N}+(?:[.,]\p{N}+)*|[^\s\p{Alphabetic}\p{N}]")
            .unwrap();

    /// A sentence ends at a run of terminators, optionally followed by closing
    /// quotes or brackets, then whitespace or end of text
    static ref SENTENCE_END: Regex = Regex::new(r#"[.!?]+["'”’)\]]*(?:\s+|$)"#).unwrap();
}

/// Words that end with a period without ending the sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "e.g", "i.e", "etc", "vs", "inc", "jr", "sr", "st",
];

/// Split text into word tokens
pub fn word_tokens(text: &str) -> Vec<&str> {
    WORD_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

/// Lowercased word tokens
pub fn lower_word_tokens(text: &str) -> Vec<String> {
    word_tokens(text)
        .into_iter()
        .map(|t| t.to_lowercase())
        .collect()
}

/// Split text into trimmed, non-empty sentences
pub fn sentences(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(text) {
        let candidate = &text[start..m.end()];
        if ends_with_abbreviation(&text[start..m.start()]) && m.end() < text.len() {
            continue;
        }

        let trimmed = candidate.trim();
        if !trimmed.is_empty() {
            result.push(trimmed);
        }
        start = m.end();
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        result.push(tail);
    }

    result
}

/// True when the text before a period is a known abbreviation
fn ends_with_abbreviation(before: &str) -> bool {
    let last_word = before
        .rsplit(|c: char| c.is_whitespace())
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();

    ABBREVIATIONS.contains(&last_word.as_str())
}

/// Python `str.isalpha` semantics: non-empty and every char alphabetic
pub fn is_alpha(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

/// Python `str.isupper` semantics: at least one cased char, none lowercase
pub fn is_upper(token: &str) -> bool {
    let mut has_cased = false;
    for c in token.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Whitespace-separated pieces containing at least one letter or digit
pub fn lexicon_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .count()
}
