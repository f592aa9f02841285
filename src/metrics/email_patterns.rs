//! Email-specific patterns
//!
//! Average email length, greeting styles and signature styles.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use super::top_counts;
use crate::models::metrics::{EmailPatterns, TermCount};

/// Lines from the end of an email searched for a sign-off
const SIGNATURE_LINES: usize = 3;

lazy_static! {
    /// Checked in order; the first match wins
    static ref GREETING_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"^(hi|hello|hey)\s+\w+").unwrap(), "informal"),
        (Regex::new(r"^(dear|greetings)\s+\w+").unwrap(), "formal"),
        (Regex::new(r"^good\s+(morning|afternoon|evening)").unwrap(), "time_based"),
        (Regex::new(r"^\w+,").unwrap(), "name_only"),
    ];

    /// Every matching style is counted
    static ref SIGNATURE_PATTERNS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"\b(best|regards|sincerely)\b").unwrap(), "formal"),
        (Regex::new(r"\b(thanks|thx|ty)\b").unwrap(), "grateful"),
        (Regex::new(r"\b(cheers|talk soon)\b").unwrap(), "casual"),
        (Regex::new(r"^-\s*\w+").unwrap(), "minimal"),
    ];
}

/// Analyze email-level habits
pub fn analyze_email_patterns(emails: &[String]) -> EmailPatterns {
    EmailPatterns {
        avg_email_length: avg_email_length(emails),
        greeting_style: analyze_greetings(emails),
        signature_style: analyze_signatures(emails),
    }
}

/// Mean number of whitespace-separated words per email
pub fn avg_email_length(emails: &[String]) -> f64 {
    if emails.is_empty() {
        return 0.0;
    }

    let total: usize = emails.iter().map(|e| e.split_whitespace().count()).sum();
    total as f64 / emails.len() as f64
}

/// Classify each email's opening line by greeting style
pub fn analyze_greetings(emails: &[String]) -> Vec<TermCount> {
    let styles: Vec<&'static str> = emails
        .iter()
        .filter_map(|email| {
            let lower = email.trim().to_lowercase();
            GREETING_PATTERNS
                .iter()
                .find(|(pattern, _)| pattern.is_match(&lower))
                .map(|(_, style)| *style)
        })
        .collect();

    top_counts(styles, usize::MAX)
}

/// Classify each email's last lines by sign-off style
pub fn analyze_signatures(emails: &[String]) -> Vec<TermCount> {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();

    for email in emails {
        let lines: Vec<&str> = email.trim().split('\n').collect();
        let start = lines.len().saturating_sub(SIGNATURE_LINES);
        let last_lines = lines[start..].join(" ").to_lowercase();

        for (pattern, style) in SIGNATURE_PATTERNS.iter() {
            if pattern.is_match(&last_lines) {
                *counts.entry(*style).or_insert(0) += 1;
            }
        }
    }

    // Report in rule order, skipping styles never seen
    let mut styles: Vec<TermCount> = SIGNATURE_PATTERNS
        .iter()
        .filter_map(|(_, style)| counts.get(style).map(|c| TermCount::new(*style, *c)))
        .collect();
    styles.sort_by(|a, b| b.count.cmp(&a.count));
    styles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emails(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_avg_email_length() {
        let emails = emails(&["one two three", "four five"]);
        assert!((avg_email_length(&emails) - 2.5).abs() < 1e-9);
        assert_eq!(avg_email_length(&[]), 0.0);
    }

    #[test]
    fn test_greetings_first_match_wins() {
        let emails = emails(&[
            "Hi John, the numbers look good.",
            "Hello team here is the update",
            "Dear Sara, please find attached.",
            "Good morning all.",
            "Mark, call me.",
            "No greeting at all",
        ]);
        let greetings = analyze_greetings(&emails);

        // "Hi John," matches informal before name_only
        assert_eq!(greetings[0], TermCount::new("informal", 2));
        assert!(greetings.contains(&TermCount::new("formal", 1)));
        assert!(greetings.contains(&TermCount::new("time_based", 1)));
        assert!(greetings.contains(&TermCount::new("name_only", 1)));
        assert_eq!(greetings.iter().map(|g| g.count).sum::<usize>(), 5);
    }

    #[test]
    fn test_signatures_count_every_match() {
        let emails = emails(&[
            "See attached.\nThanks and best regards,\nJeff",
            "Call me.\nCheers",
            "Done.\nKate",
            "Ok.\nThis is pretty",
        ]);
        let signatures = analyze_signatures(&emails);

        assert!(signatures.contains(&TermCount::new("formal", 1)));
        assert!(signatures.contains(&TermCount::new("grateful", 1)));
        assert!(signatures.contains(&TermCount::new("casual", 1)));
        // "pretty" does not count as "ty"
        assert_eq!(signatures.iter().map(|s| s.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_minimal_signature() {
        let emails = emails(&["- Vince"]);
        let signatures = analyze_signatures(&emails);
        assert_eq!(signatures, vec![TermCount::new("minimal", 1)]);
    }
}
