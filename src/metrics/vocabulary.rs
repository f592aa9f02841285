//! Vocabulary metrics
//!
//! Comfort words (most-used meaningful words), lexical diversity and
//! chunked type-token ratio.

use std::collections::HashSet;

use super::stopwords::is_stopword;
use super::top_counts;
use crate::models::metrics::{TermCount, VocabularyDiversity};
use crate::parser::tokenize::is_alpha;

/// Chunk size for the type-token ratio
pub const TTR_CHUNK_SIZE: usize = 1000;
/// Chunks must hold more than this many words to be counted
pub const TTR_MIN_CHUNK: usize = 100;

/// Most used words, excluding stopwords, non-alphabetic tokens and words of
/// three letters or fewer.
///
/// `tokens` must already be lowercased.
pub fn comfort_words(tokens: &[String], top_n: usize) -> Vec<TermCount> {
    let meaningful = tokens
        .iter()
        .filter(|w| is_alpha(w) && !is_stopword(w) && w.chars().count() > 3)
        .map(String::as_str);

    top_counts(meaningful, top_n)
}

/// Alphabetic, non-stopword tokens
pub fn meaningful_words(tokens: &[String]) -> Vec<&str> {
    tokens
        .iter()
        .filter(|w| is_alpha(w) && !is_stopword(w))
        .map(String::as_str)
        .collect()
}

/// Vocabulary diversity metrics over lowercased tokens
pub fn calculate_diversity(tokens: &[String]) -> VocabularyDiversity {
    let meaningful = meaningful_words(tokens);
    let unique: HashSet<&str> = meaningful.iter().copied().collect();

    let lexical_diversity = if meaningful.is_empty() {
        0.0
    } else {
        unique.len() as f64 / meaningful.len() as f64
    };

    VocabularyDiversity {
        total_words: meaningful.len(),
        unique_words: unique.len(),
        lexical_diversity,
        vocabulary_richness: calculate_ttr(&meaningful),
    }
}

/// Mean type-token ratio over fixed-size chunks.
///
/// Small chunks are unstable, so chunks of `TTR_MIN_CHUNK` words or fewer
/// are ignored. Returns 0 when no chunk qualifies.
pub fn calculate_ttr(words: &[&str]) -> f64 {
    let ttrs: Vec<f64> = words
        .chunks(TTR_CHUNK_SIZE)
        .filter(|chunk| chunk.len() > TTR_MIN_CHUNK)
        .map(|chunk| {
            let unique: HashSet<&&str> = chunk.iter().collect();
            unique.len() as f64 / chunk.len() as f64
        })
        .collect();

    if ttrs.is_empty() {
        0.0
    } else {
        ttrs.iter().sum::<f64>() / ttrs.len() as f64
    }
}

/// Relative weights for a word cloud: each count divided by the largest count
pub fn word_cloud_weights(words: &[TermCount], max_words: usize) -> Vec<(String, f64)> {
    let max = words.iter().map(|w| w.count).max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }

    words
        .iter()
        .take(max_words)
        .map(|w| (w.term.clone(), w.count as f64 / max as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize::lower_word_tokens;

    #[test]
    fn test_comfort_words_filters() {
        let tokens = lower_word_tokens(
            "The forecast looks good. Forecast numbers, forecast deals! The deal is big.",
        );
        let words = comfort_words(&tokens, 10);

        assert_eq!(words[0], TermCount::new("forecast", 3));
        // "the" is a stopword, "big" is too short, punctuation is dropped
        assert!(words.iter().all(|w| w.term != "the" && w.term != "big"));
        assert!(words.iter().all(|w| w.term.chars().all(char::is_alphabetic)));
    }

    #[test]
    fn test_comfort_words_tie_order() {
        let tokens = lower_word_tokens("alpha bravo charlie bravo alpha");
        let words = comfort_words(&tokens, 10);
        let terms: Vec<&str> = words.iter().map(|w| w.term.as_str()).collect();
        assert_eq!(terms, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_diversity() {
        let tokens = lower_word_tokens("market market price trade the of");
        let diversity = calculate_diversity(&tokens);
        assert_eq!(diversity.total_words, 4);
        assert_eq!(diversity.unique_words, 3);
        assert!((diversity.lexical_diversity - 0.75).abs() < 1e-9);
        // Too short for a TTR chunk
        assert_eq!(diversity.vocabulary_richness, 0.0);
    }

    #[test]
    fn test_diversity_accented_words() {
        let tokens = lower_word_tokens("Señor Müller sent the résumé to the café.");
        let diversity = calculate_diversity(&tokens);
        // señor, müller, résumé, café ("sent" is a corpus stopword)
        assert_eq!(diversity.total_words, 4);
        assert_eq!(diversity.unique_words, 4);
        assert!((diversity.lexical_diversity - 1.0).abs() < 1e-9);

        let words = comfort_words(&tokens, 10);
        let terms: Vec<&str> = words.iter().map(|w| w.term.as_str()).collect();
        assert_eq!(terms, vec!["señor", "müller", "résumé", "café"]);
    }

    #[test]
    fn test_diversity_empty() {
        let diversity = calculate_diversity(&[]);
        assert_eq!(diversity.total_words, 0);
        assert_eq!(diversity.lexical_diversity, 0.0);
    }

    #[test]
    fn test_ttr_ignores_small_trailing_chunk() {
        // 1000 words alternating between two types, then 50 unique words
        let mut words: Vec<String> = (0..1000)
            .map(|i| if i % 2 == 0 { "gas".to_string() } else { "power".to_string() })
            .collect();
        words.extend((0..50).map(|i| format!("word{}", i)));
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();

        let ttr = calculate_ttr(&refs);
        assert!((ttr - 0.002).abs() < 1e-9);
    }

    #[test]
    fn test_ttr_averages_chunks() {
        let mut words: Vec<String> = vec!["gas".to_string(); 1000];
        words.extend((0..200).map(|i| format!("w{}", i)));
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();

        // (1/1000 + 200/200) / 2
        let ttr = calculate_ttr(&refs);
        assert!((ttr - 0.5005).abs() < 1e-9);
    }

    #[test]
    fn test_word_cloud_weights() {
        let words = vec![
            TermCount::new("forecast", 10),
            TermCount::new("market", 5),
            TermCount::new("power", 1),
        ];
        let weights = word_cloud_weights(&words, 2);
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0], ("forecast".to_string(), 1.0));
        assert_eq!(weights[1], ("market".to_string(), 0.5));
        assert!(word_cloud_weights(&[], 5).is_empty());
    }
}
