//! Writing style analysis
//!
//! Sentence structure, punctuation habits, and the normalized style radar.

use serde::{Deserialize, Serialize};

use super::readability::{avg_sentence_length, flesch_reading_ease, sentence_count};
use crate::models::metrics::{PunctuationStyle, VocabularyDiversity, WritingStyle};
use crate::parser::tokenize::{is_upper, word_tokens};

/// Sentence length treated as 100% on the radar
pub const RADAR_MAX_SENTENCE_LENGTH: f64 = 30.0;

/// Analyze the writing style of a text
pub fn analyze_writing_style(text: &str) -> WritingStyle {
    let sentences = sentence_count(text);
    let tokens = word_tokens(text);

    let per_sentence = |count: usize| {
        if sentences == 0 {
            0.0
        } else {
            count as f64 / sentences as f64
        }
    };

    let uppercase_ratio = if tokens.is_empty() {
        0.0
    } else {
        tokens.iter().filter(|t| is_upper(t)).count() as f64 / tokens.len() as f64
    };

    WritingStyle {
        avg_sentence_length: avg_sentence_length(text),
        reading_ease: flesch_reading_ease(text),
        exclamation_usage: per_sentence(text.matches('!').count()),
        question_usage: per_sentence(text.matches('?').count()),
        uppercase_ratio,
        punctuation_style: analyze_punctuation(text),
    }
}

/// Punctuation usage per 1000 characters
pub fn analyze_punctuation(text: &str) -> PunctuationStyle {
    let total_chars = text.chars().count();
    if total_chars == 0 {
        return PunctuationStyle::default();
    }

    let per_thousand = |count: usize| count as f64 / total_chars as f64 * 1000.0;

    PunctuationStyle {
        ellipsis_usage: per_thousand(text.matches("...").count()),
        dash_usage: per_thousand(text.matches('-').count() + text.matches('—').count()),
        parenthesis_usage: per_thousand(text.matches('(').count()),
        semicolon_usage: per_thousand(text.matches(';').count()),
    }
}

/// Five-axis style profile on a 0-100 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRadar {
    pub reading_ease: f64,
    pub exclamations: f64,
    pub questions: f64,
    pub lexical_diversity: f64,
    pub sentence_length: f64,
}

impl StyleRadar {
    /// Build the radar from style and diversity metrics
    pub fn new(style: &WritingStyle, diversity: &VocabularyDiversity) -> Self {
        Self {
            reading_ease: clamp_pct(style.reading_ease),
            exclamations: clamp_pct(style.exclamation_usage * 100.0),
            questions: clamp_pct(style.question_usage * 100.0),
            lexical_diversity: clamp_pct(diversity.lexical_diversity * 100.0),
            sentence_length: clamp_pct(
                style.avg_sentence_length / RADAR_MAX_SENTENCE_LENGTH * 100.0,
            ),
        }
    }

    /// Axis labels and values in display order
    pub fn axes(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Reading Ease", self.reading_ease),
            ("Exclamations", self.exclamations),
            ("Questions", self.questions),
            ("Lexical Diversity", self.lexical_diversity),
            ("Sentence Length", self.sentence_length),
        ]
    }
}

fn clamp_pct(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
