//! Recommendation engine
//!
//! Core logic for turning a linguistic profile into actionable writing advice.

use super::types::{Recommendation, RecommendationInput, RecommendationSummary, RecommendationType};

/// Thresholds for recommendation triggers
pub mod thresholds {
    /// Lexical diversity below this is considered repetitive
    pub const LOW_DIVERSITY: f64 = 0.15;
    /// Diversity is only judged once the text has this many meaningful words
    pub const MIN_WORDS_FOR_DIVERSITY: usize = 50;
    /// Flesch reading ease below this is very difficult
    pub const LOW_READING_EASE: f64 = 30.0;
    /// Words per sentence above this are hard to follow
    pub const LONG_SENTENCES: f64 = 25.0;
    /// Exclamation marks per sentence above this read as shouting
    pub const HIGH_EXCLAMATION: f64 = 0.3;
    /// All-caps words per email above this read as shouting
    pub const HIGH_CAPS_PER_EMAIL: f64 = 2.0;
    /// Share of meaningful words taken by the single top word
    pub const OVERUSED_WORD_SHARE: f64 = 0.05;
    /// Transition uses needed before variety is judged
    pub const MIN_TRANSITIONS: usize = 5;
}

/// Generate recommendations from a profile's metrics
pub fn generate_recommendations(input: &RecommendationInput) -> RecommendationSummary {
    let mut recommendations = Vec::new();

    // Check vocabulary diversity
    if let Some(rec) = check_vocabulary_diversity(input) {
        recommendations.push(rec);
    }

    // Check overused comfort word
    if let Some(rec) = check_overused_word(input) {
        recommendations.push(rec);
    }

    // Check readability
    if let Some(rec) = check_readability(input) {
        recommendations.push(rec);
    }

    // Check sentence length
    if let Some(rec) = check_sentence_length(input) {
        recommendations.push(rec);
    }

    // Check tone
    if let Some(rec) = check_tone(input) {
        recommendations.push(rec);
    }

    // Check transition variety
    if let Some(rec) = check_transitions(input) {
        recommendations.push(rec);
    }

    tracing::debug!(
        "Generated {} recommendations for {}",
        recommendations.len(),
        input.person
    );

    RecommendationSummary::from_recommendations(
        recommendations,
        input.person.clone(),
        input.total_emails,
    )
}

/// Repetitive vocabulary warning, or a positive note when diversity is healthy
fn check_vocabulary_diversity(input: &RecommendationInput) -> Option<Recommendation> {
    if input.total_words < thresholds::MIN_WORDS_FOR_DIVERSITY {
        return None;
    }

    let based_on = format!(
        "Lexical diversity: {:.1}% (target: >{:.0}%), Meaningful words: {}",
        input.lexical_diversity * 100.0,
        thresholds::LOW_DIVERSITY * 100.0,
        input.total_words
    );

    if input.lexical_diversity < thresholds::LOW_DIVERSITY {
        let confidence = if input.lexical_diversity < 0.10 { 0.9 } else { 0.75 };

        return Some(Recommendation::new(
            RecommendationType::RepetitiveVocabulary,
            "Repetitive vocabulary detected".to_string(),
            format!(
                "Your lexical diversity of {:.1}% is below {:.0}%. \
                The same words keep coming back, which makes the writing feel monotonous.",
                input.lexical_diversity * 100.0,
                thresholds::LOW_DIVERSITY * 100.0
            ),
            confidence,
            vec![
                "Try using more synonyms".to_string(),
                "Avoid repeating the same transition words".to_string(),
                "Reread long emails and replace the most repeated words".to_string(),
            ],
            based_on,
        ));
    }

    Some(Recommendation::new(
        RecommendationType::Strength,
        "Good vocabulary diversity".to_string(),
        "Your writing shows a healthy variety of words.".to_string(),
        0.8,
        vec!["Keep exploring new words".to_string()],
        based_on,
    ))
}

/// A single comfort word taking an outsized share of the vocabulary
fn check_overused_word(input: &RecommendationInput) -> Option<Recommendation> {
    let (word, count) = input.top_word.as_ref()?;
    if input.total_words == 0 {
        return None;
    }

    let share = *count as f64 / input.total_words as f64;
    if share <= thresholds::OVERUSED_WORD_SHARE || input.total_words < thresholds::MIN_WORDS_FOR_DIVERSITY {
        return None;
    }

    Some(Recommendation::new(
        RecommendationType::OverusedWord,
        format!("Ease off \"{}\"", word),
        format!(
            "\"{}\" accounts for {:.1}% of your meaningful words ({} uses). \
            It has become a verbal tic.",
            word,
            share * 100.0,
            count
        ),
        if share > 0.1 { 0.9 } else { 0.7 },
        vec![
            format!("Look for synonyms of \"{}\"", word),
            "Cut the word where it adds nothing".to_string(),
        ],
        format!(
            "Top word share: {:.1}% (target: <{:.0}%)",
            share * 100.0,
            thresholds::OVERUSED_WORD_SHARE * 100.0
        ),
    ))
}

/// Very low Flesch reading ease
fn check_readability(input: &RecommendationInput) -> Option<Recommendation> {
    if input.total_words == 0 || input.reading_ease >= thresholds::LOW_READING_EASE {
        return None;
    }

    Some(Recommendation::new(
        RecommendationType::Readability,
        "Make your writing easier to read".to_string(),
        format!(
            "A Flesch reading ease of {:.1} puts your text in the 'very difficult' band. \
            Readers have to work hard to follow it.",
            input.reading_ease
        ),
        if input.reading_ease < 10.0 { 0.9 } else { 0.7 },
        vec![
            "Prefer short, common words over long ones".to_string(),
            "Split sentences that carry more than one idea".to_string(),
        ],
        format!(
            "Reading ease: {:.1} (target: >{:.0})",
            input.reading_ease,
            thresholds::LOW_READING_EASE
        ),
    ))
}

/// Long average sentences
fn check_sentence_length(input: &RecommendationInput) -> Option<Recommendation> {
    if input.avg_sentence_length <= thresholds::LONG_SENTENCES {
        return None;
    }

    Some(Recommendation::new(
        RecommendationType::SentenceLength,
        "Shorten your sentences".to_string(),
        format!(
            "Your sentences average {:.1} words. Beyond about {:.0} words, readers start \
            losing the thread.",
            input.avg_sentence_length,
            thresholds::LONG_SENTENCES
        ),
        if input.avg_sentence_length > 35.0 { 0.9 } else { 0.7 },
        vec![
            "Aim for one idea per sentence".to_string(),
            "Use bullet points for lists of items".to_string(),
        ],
        format!(
            "Average sentence length: {:.1} words (target: <{:.0})",
            input.avg_sentence_length,
            thresholds::LONG_SENTENCES
        ),
    ))
}

/// Heavy exclamation or all-caps usage
fn check_tone(input: &RecommendationInput) -> Option<Recommendation> {
    let caps_per_email = if input.total_emails == 0 {
        0.0
    } else {
        input.all_caps as f64 / input.total_emails as f64
    };

    let loud_exclamations = input.exclamation_usage > thresholds::HIGH_EXCLAMATION;
    let loud_caps = caps_per_email > thresholds::HIGH_CAPS_PER_EMAIL;

    if !loud_exclamations && !loud_caps {
        return None;
    }

    let mut action_items = Vec::new();
    if loud_exclamations {
        action_items.push("Reserve exclamation marks for real surprises".to_string());
    }
    if loud_caps {
        action_items.push("Use bold or word choice for emphasis instead of CAPS".to_string());
    }

    Some(Recommendation::new(
        RecommendationType::Tone,
        "Tone down the emphasis".to_string(),
        "Frequent exclamation marks or all-caps words can read as shouting.".to_string(),
        if loud_exclamations && loud_caps { 0.85 } else { 0.65 },
        action_items,
        format!(
            "Exclamations per sentence: {:.2} (target: <{:.1}), CAPS words per email: {:.1} (target: <{:.0})",
            input.exclamation_usage,
            thresholds::HIGH_EXCLAMATION,
            caps_per_email,
            thresholds::HIGH_CAPS_PER_EMAIL
        ),
    ))
}

/// All transition uses concentrated on a single word
fn check_transitions(input: &RecommendationInput) -> Option<Recommendation> {
    let total: usize = input.transitions.iter().map(|(_, c)| c).sum();
    if total <= thresholds::MIN_TRANSITIONS {
        return None;
    }

    let used: Vec<&(String, usize)> = input.transitions.iter().filter(|(_, c)| *c > 0).collect();
    if used.len() != 1 {
        return None;
    }
    let (word, count) = used[0];

    Some(Recommendation::new(
        RecommendationType::Transitions,
        "Vary your transition words".to_string(),
        format!(
            "Every one of your {} transitions is \"{}\".",
            count, word
        ),
        0.6,
        vec![
            "Alternate between however, therefore, meanwhile and similar words".to_string(),
        ],
        format!("Transition uses: {}, distinct transitions: 1", total),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_input() -> RecommendationInput {
        RecommendationInput {
            person: "kay.mann@enron.com".to_string(),
            total_emails: 40,
            total_words: 2_000,
            lexical_diversity: 0.35,
            reading_ease: 62.0,
            avg_sentence_length: 14.0,
            exclamation_usage: 0.05,
            all_caps: 10,
            top_word: Some(("contract".to_string(), 40)),
            transitions: vec![
                ("however".to_string(), 3),
                ("therefore".to_string(), 1),
                ("moreover".to_string(), 0),
            ],
        }
    }

    #[test]
    fn test_normal_metrics_only_strength() {
        let summary = generate_recommendations(&create_test_input());

        assert_eq!(summary.recommendations.len(), 1);
        assert_eq!(summary.recommendations[0].rec_type, RecommendationType::Strength);
        assert!(summary.all_clear());
    }

    #[test]
    fn test_low_diversity_recommendation() {
        let mut input = create_test_input();
        input.lexical_diversity = 0.08;

        let summary = generate_recommendations(&input);
        let top = summary.top_priority.unwrap();
        assert_eq!(top.rec_type, RecommendationType::RepetitiveVocabulary);
        assert_eq!(top.confidence, 0.9);
        assert!(!summary
            .recommendations
            .iter()
            .any(|r| r.rec_type == RecommendationType::Strength));
    }

    #[test]
    fn test_short_text_skips_diversity() {
        let mut input = create_test_input();
        input.total_words = 20;
        input.lexical_diversity = 0.05;

        let summary = generate_recommendations(&input);
        assert!(summary.recommendations.is_empty());
    }

    #[test]
    fn test_readability_and_sentence_length() {
        let mut input = create_test_input();
        input.reading_ease = 5.0;
        input.avg_sentence_length = 40.0;

        let summary = generate_recommendations(&input);
        let types: Vec<RecommendationType> =
            summary.recommendations.iter().map(|r| r.rec_type).collect();

        assert!(types.contains(&RecommendationType::Readability));
        assert!(types.contains(&RecommendationType::SentenceLength));
        // Readability outranks sentence length at equal confidence
        assert_eq!(types[0], RecommendationType::Readability);
    }

    #[test]
    fn test_overused_word() {
        let mut input = create_test_input();
        input.top_word = Some(("basically".to_string(), 300));

        let summary = generate_recommendations(&input);
        let rec = summary
            .recommendations
            .iter()
            .find(|r| r.rec_type == RecommendationType::OverusedWord)
            .unwrap();
        assert!(rec.title.contains("basically"));
        assert_eq!(rec.confidence, 0.9);
    }

    #[test]
    fn test_tone() {
        let mut input = create_test_input();
        input.exclamation_usage = 0.6;
        input.all_caps = 200;

        let summary = generate_recommendations(&input);
        let rec = summary
            .recommendations
            .iter()
            .find(|r| r.rec_type == RecommendationType::Tone)
            .unwrap();
        assert_eq!(rec.action_items.len(), 2);
        assert_eq!(rec.confidence, 0.85);
    }

    #[test]
    fn test_single_transition_word() {
        let mut input = create_test_input();
        input.transitions = vec![
            ("however".to_string(), 12),
            ("therefore".to_string(), 0),
        ];

        let summary = generate_recommendations(&input);
        assert!(summary
            .recommendations
            .iter()
            .any(|r| r.rec_type == RecommendationType::Transitions));
    }
}
