//! Recommendation types
//!
//! Data structures for representing writing-style recommendations.

use serde::{Deserialize, Serialize};

use crate::models::metrics::AuthorProfile;

/// Type of recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    /// Vocabulary is repetitive
    RepetitiveVocabulary,
    /// A single word dominates the vocabulary
    OverusedWord,
    /// Text is hard to read
    Readability,
    /// Sentences run long
    SentenceLength,
    /// Shouting: exclamations or all-caps words
    Tone,
    /// Transition words lack variety
    Transitions,
    /// Something the writer already does well
    Strength,
}

impl RecommendationType {
    /// Get display label for the recommendation type
    pub fn label(&self) -> &'static str {
        match self {
            Self::RepetitiveVocabulary => "Repetitive Vocabulary",
            Self::OverusedWord => "Overused Word",
            Self::Readability => "Readability",
            Self::SentenceLength => "Sentence Length",
            Self::Tone => "Tone",
            Self::Transitions => "Transitions",
            Self::Strength => "Strength",
        }
    }

    /// Get priority weight (higher = more important)
    pub fn priority_weight(&self) -> f64 {
        match self {
            Self::RepetitiveVocabulary => 1.0,
            Self::Readability => 0.95,
            Self::SentenceLength => 0.85,
            Self::OverusedWord => 0.8,
            Self::Tone => 0.7,
            Self::Transitions => 0.6,
            Self::Strength => 0.3,
        }
    }

    /// Whether this recommendation asks the writer to change something
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Self::Strength)
    }
}

/// A single recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Type of recommendation
    pub rec_type: RecommendationType,
    /// Short title for the recommendation
    pub title: String,
    /// Detailed description explaining the recommendation
    pub description: String,
    /// Confidence level (0.0 - 1.0)
    pub confidence: f64,
    /// Specific action items to implement this recommendation
    pub action_items: Vec<String>,
    /// What metrics this recommendation is based on
    pub based_on: String,
    /// Priority score for sorting (type weight * confidence)
    pub priority_score: f64,
}

impl Recommendation {
    /// Create a new recommendation with computed priority
    pub fn new(
        rec_type: RecommendationType,
        title: String,
        description: String,
        confidence: f64,
        action_items: Vec<String>,
        based_on: String,
    ) -> Self {
        let confidence = confidence.clamp(0.0, 1.0);
        let priority_score = rec_type.priority_weight() * confidence;

        Self {
            rec_type,
            title,
            description,
            confidence,
            action_items,
            based_on,
            priority_score,
        }
    }

    /// Get confidence level as a descriptive string
    pub fn confidence_level(&self) -> &'static str {
        if self.confidence >= 0.8 {
            "High"
        } else if self.confidence >= 0.5 {
            "Medium"
        } else {
            "Low"
        }
    }
}

/// Summary of all recommendations for one profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSummary {
    /// All recommendations sorted by priority
    pub recommendations: Vec<Recommendation>,
    /// Top priority recommendation (if any)
    pub top_priority: Option<Recommendation>,
    /// Number of high confidence recommendations
    pub high_confidence_count: u32,
    /// Average confidence across all recommendations
    pub avg_confidence: f64,
    /// Person the profile belongs to
    pub person: String,
    /// Number of emails behind the profile
    pub emails_analyzed: usize,
}

impl RecommendationSummary {
    /// Create a new summary from a list of recommendations
    pub fn from_recommendations(
        mut recommendations: Vec<Recommendation>,
        person: String,
        emails_analyzed: usize,
    ) -> Self {
        // Sort by priority score (highest first)
        recommendations.sort_by(|a, b| {
            b.priority_score
                .partial_cmp(&a.priority_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let high_confidence_count = recommendations
            .iter()
            .filter(|r| r.confidence >= 0.8)
            .count() as u32;

        let avg_confidence = if recommendations.is_empty() {
            0.0
        } else {
            recommendations.iter().map(|r| r.confidence).sum::<f64>()
                / recommendations.len() as f64
        };

        let top_priority = recommendations.first().cloned();

        Self {
            recommendations,
            top_priority,
            high_confidence_count,
            avg_confidence,
            person,
            emails_analyzed,
        }
    }

    /// Filter recommendations by minimum confidence
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.recommendations
            .retain(|r| r.confidence >= min_confidence);
        Self::from_recommendations(self.recommendations, self.person, self.emails_analyzed)
    }

    /// Limit to top N recommendations
    pub fn limit(mut self, n: usize) -> Self {
        self.recommendations.truncate(n);
        Self::from_recommendations(self.recommendations, self.person, self.emails_analyzed)
    }

    /// True when nothing asks the writer to change
    pub fn all_clear(&self) -> bool {
        self.recommendations.iter().all(|r| !r.rec_type.is_actionable())
    }
}

/// Input data for generating recommendations
#[derive(Debug, Clone)]
pub struct RecommendationInput {
    pub person: String,
    pub total_emails: usize,
    /// Meaningful (non-stopword) words
    pub total_words: usize,
    pub lexical_diversity: f64,
    pub reading_ease: f64,
    pub avg_sentence_length: f64,
    pub exclamation_usage: f64,
    pub all_caps: usize,
    /// Most used comfort word and its count
    pub top_word: Option<(String, usize)>,
    /// Transition words with their counts
    pub transitions: Vec<(String, usize)>,
}

impl From<&AuthorProfile> for RecommendationInput {
    fn from(profile: &AuthorProfile) -> Self {
        Self {
            person: profile.person.clone(),
            total_emails: profile.total_emails,
            total_words: profile.vocabulary_diversity.total_words,
            lexical_diversity: profile.vocabulary_diversity.lexical_diversity,
            reading_ease: profile.writing_style.reading_ease,
            avg_sentence_length: profile.writing_style.avg_sentence_length,
            exclamation_usage: profile.writing_style.exclamation_usage,
            all_caps: profile.linguistic_fingerprint.emphasis_patterns.all_caps,
            top_word: profile
                .comfort_words
                .first()
                .map(|w| (w.term.clone(), w.count)),
            transitions: profile
                .linguistic_fingerprint
                .transition_words
                .iter()
                .map(|t| (t.term.clone(), t.count))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(rec_type: RecommendationType, confidence: f64) -> Recommendation {
        Recommendation::new(
            rec_type,
            "Test".to_string(),
            "Description".to_string(),
            confidence,
            vec!["Do something".to_string()],
            "metric".to_string(),
        )
    }

    #[test]
    fn test_recommendation_type_label() {
        assert_eq!(RecommendationType::Readability.label(), "Readability");
        assert_eq!(
            RecommendationType::RepetitiveVocabulary.label(),
            "Repetitive Vocabulary"
        );
    }

    #[test]
    fn test_recommendation_priority_computation() {
        let r = rec(RecommendationType::Readability, 0.8);
        assert!((r.priority_score - 0.76).abs() < 1e-9);
        assert_eq!(r.confidence_level(), "High");
    }

    #[test]
    fn test_confidence_is_clamped() {
        let r = rec(RecommendationType::Tone, 1.7);
        assert_eq!(r.confidence, 1.0);
    }

    #[test]
    fn test_summary_sorted_by_priority() {
        let summary = RecommendationSummary::from_recommendations(
            vec![
                rec(RecommendationType::Strength, 0.9),
                rec(RecommendationType::RepetitiveVocabulary, 0.9),
                rec(RecommendationType::Tone, 0.4),
            ],
            "someone".to_string(),
            10,
        );

        assert_eq!(
            summary.top_priority.as_ref().unwrap().rec_type,
            RecommendationType::RepetitiveVocabulary
        );
        assert_eq!(summary.high_confidence_count, 2);
        assert!((summary.avg_confidence - 2.2 / 3.0).abs() < 1e-9);
        assert!(!summary.all_clear());
    }

    #[test]
    fn test_summary_filters() {
        let summary = RecommendationSummary::from_recommendations(
            vec![
                rec(RecommendationType::Readability, 0.9),
                rec(RecommendationType::Tone, 0.4),
            ],
            "someone".to_string(),
            10,
        );

        let filtered = summary.clone().with_min_confidence(0.5);
        assert_eq!(filtered.recommendations.len(), 1);

        let limited = summary.limit(1);
        assert_eq!(limited.recommendations.len(), 1);
        assert_eq!(limited.recommendations[0].rec_type, RecommendationType::Readability);
    }

    #[test]
    fn test_empty_summary() {
        let summary = RecommendationSummary::from_recommendations(Vec::new(), "x".to_string(), 0);
        assert!(summary.top_priority.is_none());
        assert_eq!(summary.avg_confidence, 0.0);
        assert!(summary.all_clear());
    }
}
