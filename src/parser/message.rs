//! Raw message parser
//!
//! Pulls sender, subject, date and body out of a raw RFC 822 style message
//! as stored in the Enron corpus.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::email::Email;

lazy_static! {
    static ref FROM_HEADER: Regex = Regex::new(r"From:\s*([^\n]+)").unwrap();
    static ref SUBJECT_HEADER: Regex = Regex::new(r"Subject:[ \t]*([^\n]*)").unwrap();
    static ref DATE_HEADER: Regex = Regex::new(r"(?m)^Date:\s*([^\n]+)").unwrap();
    /// Quoted / forwarded material starts at a line of dashes or equals signs
    static ref QUOTE_MARKER: Regex = Regex::new(r"-{3,}|={3,}").unwrap();
    /// Trailing zone comment such as "(PDT)"
    static ref ZONE_COMMENT: Regex = Regex::new(r"\s*\([^)]*\)\s*$").unwrap();
}

/// Extract only the body of a raw email.
///
/// The body starts after the first blank line (headers end there). Anything
/// from the first `---` or `===` run onward is dropped.
pub fn extract_body(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').collect();

    let body_start = lines
        .iter()
        .position(|line| line.trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(0);

    let body = lines[body_start.min(lines.len())..].join("\n");

    let body = match QUOTE_MARKER.find(&body) {
        Some(m) => &body[..m.start()],
        None => body.as_str(),
    };

    body.trim().to_string()
}

/// Extract the sender from the first `From:` header
pub fn extract_sender(raw: &str) -> String {
    FROM_HEADER
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Extract the subject from the first `Subject:` header
pub fn extract_subject(raw: &str) -> String {
    SUBJECT_HEADER
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "No Subject".to_string())
}

/// Parse the `Date:` header into an RFC 3339 timestamp in UTC
pub fn extract_date(raw: &str) -> Option<String> {
    let value = DATE_HEADER.captures(raw)?.get(1)?.as_str().trim();
    let value = ZONE_COMMENT.replace(value, "");

    chrono::DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&chrono::Utc).to_rfc3339())
}

/// Parse a raw message into an [`Email`]
pub fn parse_message(file: &str, raw: &str) -> Email {
    Email {
        file: file.to_string(),
        sender: extract_sender(raw),
        subject: extract_subject(raw),
        date: extract_date(raw),
        body: extract_body(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "Message-ID: <18782981.1075855378110.JavaMail.evans@thyme>\n\
Date: Mon, 14 May 2001 16:39:00 -0700 (PDT)\n\
From: phillip.allen@enron.com\n\
To: tim.belden@enron.com\n\
Subject: Re: forecast\n\
\n\
Here is our forecast for the quarter.\n\
Let me know what you think.\n\
\n\
 -----Original Message-----\n\
From: tim.belden@enron.com\n\
Old text that should be dropped.";

    #[test]
    fn test_extract_body_skips_headers_and_quotes() {
        let body = extract_body(RAW);
        assert_eq!(
            body,
            "Here is our forecast for the quarter.\nLet me know what you think."
        );
    }

    #[test]
    fn test_extract_body_equals_marker() {
        let raw = "Subject: x\n\nKeep this.\n=====\nDrop this.";
        assert_eq!(extract_body(raw), "Keep this.");
    }

    #[test]
    fn test_extract_body_without_blank_line() {
        assert_eq!(extract_body("just one line"), "just one line");
    }

    #[test]
    fn test_extract_sender_and_subject() {
        assert_eq!(extract_sender(RAW), "phillip.allen@enron.com");
        assert_eq!(extract_subject(RAW), "Re: forecast");
    }

    #[test]
    fn test_header_fallbacks() {
        assert_eq!(extract_sender("no headers here"), "Unknown");
        assert_eq!(extract_subject("no headers here"), "No Subject");
        assert_eq!(extract_subject("Subject: \nFrom: a@b.com"), "No Subject");
    }

    #[test]
    fn test_extract_date() {
        let date = extract_date(RAW).unwrap();
        assert_eq!(date, "2001-05-14T23:39:00+00:00");
        assert!(extract_date("Date: not a date").is_none());
        assert!(extract_date("no date").is_none());
    }

    #[test]
    fn test_parse_message() {
        let email = parse_message("allen-p/_sent_mail/1.", RAW);
        assert_eq!(email.file, "allen-p/_sent_mail/1.");
        assert_eq!(email.sender, "phillip.allen@enron.com");
        assert!(email.body.starts_with("Here is our forecast"));
        assert!(email.date.is_some());
    }
}
