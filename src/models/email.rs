//! Email data types
//!
//! Types representing parsed messages and the corpus they belong to

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single parsed email message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    /// Source identifier (CSV `file` column or maildir path)
    pub file: String,
    pub sender: String,
    pub subject: String,
    /// RFC 3339 timestamp when the `Date:` header could be parsed
    pub date: Option<String>,
    pub body: String,
}

/// All email bodies written by one author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorEmails {
    pub author: String,
    pub bodies: Vec<String>,
}

impl AuthorEmails {
    pub fn email_count(&self) -> usize {
        self.bodies.len()
    }
}

/// A loaded corpus of emails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corpus {
    /// Path the corpus was loaded from
    pub source: String,
    pub emails: Vec<Email>,
    /// Rows read before the body-length filter was applied
    pub rows_read: usize,
    pub loaded_at: String,
}

impl Corpus {
    /// Create a corpus from already-parsed emails
    pub fn new(source: String, emails: Vec<Email>, rows_read: usize) -> Self {
        Self {
            source,
            emails,
            rows_read,
            loaded_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Number of emails that survived filtering
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// Group email bodies by sender, keeping only senders with at least
    /// `min_emails` messages.
    ///
    /// Authors are ordered by message count (highest first); ties keep the
    /// order in which the sender first appears in the corpus.
    pub fn by_author(&self, min_emails: usize) -> Vec<AuthorEmails> {
        let mut order: Vec<String> = Vec::new();
        let mut grouped: HashMap<&str, Vec<String>> = HashMap::new();

        for email in &self.emails {
            let bodies = grouped.entry(email.sender.as_str()).or_insert_with(|| {
                order.push(email.sender.clone());
                Vec::new()
            });
            bodies.push(email.body.clone());
        }

        let mut authors: Vec<AuthorEmails> = order
            .into_iter()
            .filter_map(|author| {
                let bodies = grouped.remove(author.as_str())?;
                Some(AuthorEmails { author, bodies })
            })
            .filter(|a| a.email_count() >= min_emails)
            .collect();

        // Stable sort keeps first-appearance order among equal counts
        authors.sort_by(|a, b| b.email_count().cmp(&a.email_count()));

        tracing::info!(
            "Found {} authors with {}+ emails",
            authors.len(),
            min_emails
        );

        authors
    }

    /// Find a single author's emails by exact sender match
    pub fn author(&self, sender: &str) -> Option<AuthorEmails> {
        let bodies: Vec<String> = self
            .emails
            .iter()
            .filter(|e| e.sender == sender)
            .map(|e| e.body.clone())
            .collect();

        if bodies.is_empty() {
            None
        } else {
            Some(AuthorEmails {
                author: sender.to_string(),
                bodies,
            })
        }
    }

    /// Earliest and latest parsed dates for a sender
    pub fn date_range(&self, sender: &str) -> Option<(String, String)> {
        let mut dates: Vec<&String> = self
            .emails
            .iter()
            .filter(|e| e.sender == sender)
            .filter_map(|e| e.date.as_ref())
            .collect();

        dates.sort();
        let first = dates.first()?;
        let last = dates.last()?;
        Some(((*first).clone(), (*last).clone()))
    }
}
