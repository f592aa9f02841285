//! Linguistic fingerprint
//!
//! How an author opens and closes emails, which transition words they
//! prefer, and how they emphasize points.

use lazy_static::lazy_static;
use regex::Regex;

use super::top_counts;
use crate::models::metrics::{EmphasisPatterns, LinguisticFingerprint, TermCount};
use crate::parser::tokenize::{is_alpha, lower_word_tokens, sentences};

/// Characters kept from the first / last sentence
pub const PHRASE_EDGE_CHARS: usize = 50;

pub const TRANSITION_WORDS: &[&str] = &[
    "however",
    "therefore",
    "moreover",
    "furthermore",
    "nevertheless",
    "consequently",
    "additionally",
    "meanwhile",
    "otherwise",
    "accordingly",
];

lazy_static! {
    static ref ALL_CAPS_WORD: Regex = Regex::new(r"\b[A-Z]{3,}\b").unwrap();
}

/// Build the fingerprint for a set of emails
pub fn create_fingerprint(emails: &[String], top_n: usize) -> LinguisticFingerprint {
    LinguisticFingerprint {
        starter_phrases: email_starters(emails, top_n),
        closing_phrases: email_closings(emails, top_n),
        transition_words: transition_preferences(emails, top_n),
        emphasis_patterns: emphasis_patterns(emails),
    }
}

/// Most common openings: the first 50 characters of each email's first sentence
pub fn email_starters(emails: &[String], top_n: usize) -> Vec<TermCount> {
    let starters: Vec<String> = emails
        .iter()
        .filter_map(|e| {
            sentences(e)
                .first()
                .map(|s| s.chars().take(PHRASE_EDGE_CHARS).collect::<String>())
        })
        .collect();

    top_counts(starters.iter().map(String::as_str), top_n)
}

/// Most common closings: the last 50 characters of each email's last sentence
pub fn email_closings(emails: &[String], top_n: usize) -> Vec<TermCount> {
    let closings: Vec<String> = emails
        .iter()
        .filter_map(|e| sentences(e).last().map(|s| last_chars(s, PHRASE_EDGE_CHARS)))
        .collect();

    top_counts(closings.iter().map(String::as_str), top_n)
}

fn last_chars(s: &str, n: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(n)).collect()
}

/// Transition word usage, highest first. Words are matched whole and
/// case-insensitively; unused words are still listed (with zero) so the
/// result always has `top_n` entries when `top_n` <= 10.
pub fn transition_preferences(emails: &[String], top_n: usize) -> Vec<TermCount> {
    let mut usage: Vec<TermCount> = TRANSITION_WORDS
        .iter()
        .map(|w| TermCount::new(*w, 0))
        .collect();

    for email in emails {
        for token in lower_word_tokens(email) {
            if let Some(entry) = usage.iter_mut().find(|u| u.term == token) {
                entry.count += 1;
            }
        }
    }

    usage.sort_by(|a, b| b.count.cmp(&a.count));
    usage.truncate(top_n);
    usage
}

/// Count emphasis habits across emails
pub fn emphasis_patterns(emails: &[String]) -> EmphasisPatterns {
    let mut patterns = EmphasisPatterns::default();

    for email in emails {
        patterns.all_caps += ALL_CAPS_WORD.find_iter(email).count();

        let tokens = lower_word_tokens(email);
        for token in &tokens {
            match token.as_str() {
                "very" | "really" => patterns.very_really += 1,
                "absolutely" | "definitely" => patterns.absolutely_definitely += 1,
                _ => {}
            }
        }

        patterns.repetition += tokens
            .windows(2)
            .filter(|pair| is_alpha(&pair[0]) && pair[0] == pair[1])
            .count();
    }

    patterns
}
