//! Favorite phrase detection
//!
//! Finds the n-grams an author reaches for most often.

use super::stopwords::is_stopword;
use super::top_counts;
use crate::models::metrics::TermCount;
use crate::parser::tokenize::{is_alpha, lower_word_tokens};

/// Stopwords that still carry emphasis inside a phrase
const PHRASE_KEEPERS: &[&str] = &["not", "very", "really"];

/// Most frequent n-grams across emails.
///
/// Grams never span two emails. A gram is kept only when every token is
/// alphabetic and is either a content word or one of the emphasis keepers.
pub fn favorite_phrases(emails: &[String], n_gram: usize, top_n: usize) -> Vec<TermCount> {
    if n_gram == 0 {
        return Vec::new();
    }

    let mut phrases: Vec<String> = Vec::new();

    for email in emails {
        let tokens = lower_word_tokens(email);
        for window in tokens.windows(n_gram) {
            if window.iter().all(|w| is_phrase_word(w)) {
                phrases.push(window.join(" "));
            }
        }
    }

    top_counts(phrases.iter().map(String::as_str), top_n)
}

fn is_phrase_word(word: &str) -> bool {
    is_alpha(word) && (!is_stopword(word) || PHRASE_KEEPERS.contains(&word))
}
