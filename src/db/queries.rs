//! Database query implementations
//!
//! Contains functions for storing and reading analyzed profiles

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

use super::DbError;
use crate::models::metrics::AuthorProfile;

/// Headline columns of a stored profile, without the full JSON
#[derive(Debug, Clone, Serialize)]
pub struct ProfileRecord {
    pub id: i64,
    pub person: String,
    pub source: String,
    pub total_emails: u32,
    pub unique_words: u32,
    pub lexical_diversity: f64,
    pub reading_ease: f64,
    pub avg_sentence_length: f64,
    pub analyzed_at: String,
}

impl ProfileRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            person: row.get(1)?,
            source: row.get(2)?,
            total_emails: row.get::<_, i64>(3)? as u32,
            unique_words: row.get::<_, i64>(4)? as u32,
            lexical_diversity: row.get(5)?,
            reading_ease: row.get(6)?,
            avg_sentence_length: row.get(7)?,
            analyzed_at: row.get(8)?,
        })
    }
}

/// Store an analyzed profile, returning its row id
pub fn insert_profile(conn: &Connection, profile: &AuthorProfile, source: &str) -> Result<i64, DbError> {
    let profile_json = serde_json::to_string(profile)?;

    conn.execute(
        r#"
        INSERT INTO profiles (
            person, source, total_emails, unique_words, lexical_diversity,
            reading_ease, avg_sentence_length, profile_json, analyzed_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        params![
            profile.person,
            source,
            profile.total_emails as i64,
            profile.vocabulary_diversity.unique_words as i64,
            profile.vocabulary_diversity.lexical_diversity,
            profile.writing_style.reading_ease,
            profile.writing_style.avg_sentence_length,
            profile_json,
            profile.analyzed_at,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Most recently analyzed full profile for a person
pub fn get_latest_profile(conn: &Connection, person: &str) -> Result<Option<AuthorProfile>, DbError> {
    let json: Option<String> = conn
        .query_row(
            r#"
            SELECT profile_json FROM profiles
            WHERE person = ?1
            ORDER BY analyzed_at DESC, id DESC
            LIMIT 1
            "#,
            params![person],
            |row| row.get(0),
        )
        .optional()?;

    match json {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Most recently analyzed profile whose person matches `name` case-insensitively,
/// either as the full address or as the part before `@`
pub fn find_latest_profile(conn: &Connection, name: &str) -> Result<Option<AuthorProfile>, DbError> {
    let json: Option<String> = conn
        .query_row(
            r#"
            SELECT profile_json FROM profiles
            WHERE lower(person) = lower(?1)
               OR (instr(person, '@') > 0
                   AND lower(substr(person, 1, instr(person, '@') - 1)) = lower(?1))
            ORDER BY analyzed_at DESC, id DESC
            LIMIT 1
            "#,
            params![name],
            |row| row.get(0),
        )
        .optional()?;

    match json {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Stored profiles, newest first, optionally for a single person
pub fn list_profiles(
    conn: &Connection,
    person: Option<&str>,
    limit: Option<u32>,
) -> Result<Vec<ProfileRecord>, DbError> {
    let limit = limit.unwrap_or(100);

    let mut stmt = conn.prepare(
        r#"
        SELECT
            id, person, source, total_emails, unique_words,
            lexical_diversity, reading_ease, avg_sentence_length, analyzed_at
        FROM profiles
        WHERE (?1 IS NULL OR person = ?1)
        ORDER BY analyzed_at DESC, id DESC
        LIMIT ?2
        "#,
    )?;

    let records = stmt
        .query_map(params![person, limit], ProfileRecord::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

/// Number of stored profiles
pub fn count_profiles(conn: &Connection) -> Result<u32, DbError> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))?;
    Ok(count as u32)
}

/// Remove every stored profile, returning how many were deleted
pub fn clear_profiles(conn: &Connection) -> Result<usize, DbError> {
    let deleted = conn.execute("DELETE FROM profiles", [])?;
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use crate::metrics::{analyze_author, AnalyzerSettings};

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        conn
    }

    fn profile(person: &str, analyzed_at: &str) -> AuthorProfile {
        let emails = vec![
            "Please review the forecast and send your comments by Friday.".to_string(),
            "The forecast changed again, so check the numbers before the call.".to_string(),
        ];
        let mut profile = analyze_author(&emails, person, &AnalyzerSettings::default());
        profile.analyzed_at = analyzed_at.to_string();
        profile
    }

    #[test]
    fn test_insert_and_get_latest() {
        let conn = setup();
        insert_profile(&conn, &profile("a@enron.com", "2026-01-01T00:00:00Z"), "emails.csv").unwrap();
        insert_profile(&conn, &profile("a@enron.com", "2026-02-01T00:00:00Z"), "emails.csv").unwrap();

        let latest = get_latest_profile(&conn, "a@enron.com").unwrap().unwrap();
        assert_eq!(latest.analyzed_at, "2026-02-01T00:00:00Z");
        assert_eq!(latest.total_emails, 2);
        assert_eq!(latest.comfort_words[0].term, "forecast");
    }

    #[test]
    fn test_get_latest_missing_person() {
        let conn = setup();
        assert!(get_latest_profile(&conn, "nobody").unwrap().is_none());
    }

    #[test]
    fn test_find_latest_profile_by_short_name() {
        let conn = setup();
        insert_profile(&conn, &profile("Kay.Mann@enron.com", "2026-01-01T00:00:00Z"), "x").unwrap();
        insert_profile(&conn, &profile("kay.mann@enron.com", "2026-02-01T00:00:00Z"), "x").unwrap();
        insert_profile(&conn, &profile("kay@enron.com", "2026-03-01T00:00:00Z"), "x").unwrap();

        let found = find_latest_profile(&conn, "KAY.MANN").unwrap().unwrap();
        assert_eq!(found.person, "kay.mann@enron.com");

        let full = find_latest_profile(&conn, "kay.mann@ENRON.com").unwrap().unwrap();
        assert_eq!(full.analyzed_at, "2026-02-01T00:00:00Z");

        // Only a prefix of the local part
        assert!(find_latest_profile(&conn, "kay.m").unwrap().is_none());
        assert!(find_latest_profile(&conn, "Custom Text").unwrap().is_none());
    }

    #[test]
    fn test_list_profiles_order_and_filter() {
        let conn = setup();
        insert_profile(&conn, &profile("a@enron.com", "2026-01-01T00:00:00Z"), "emails.csv").unwrap();
        insert_profile(&conn, &profile("b@enron.com", "2026-03-01T00:00:00Z"), "emails.csv").unwrap();
        insert_profile(&conn, &profile("a@enron.com", "2026-02-01T00:00:00Z"), "emails.csv").unwrap();

        let all = list_profiles(&conn, None, None).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].person, "b@enron.com");

        let only_a = list_profiles(&conn, Some("a@enron.com"), Some(1)).unwrap();
        assert_eq!(only_a.len(), 1);
        assert_eq!(only_a[0].analyzed_at, "2026-02-01T00:00:00Z");
        assert_eq!(only_a[0].source, "emails.csv");
    }

    #[test]
    fn test_count_and_clear() {
        let conn = setup();
        assert_eq!(count_profiles(&conn).unwrap(), 0);

        insert_profile(&conn, &profile("a@enron.com", "2026-01-01T00:00:00Z"), "x").unwrap();
        insert_profile(&conn, &profile("b@enron.com", "2026-01-01T00:00:00Z"), "x").unwrap();
        assert_eq!(count_profiles(&conn).unwrap(), 2);

        assert_eq!(clear_profiles(&conn).unwrap(), 2);
        assert_eq!(count_profiles(&conn).unwrap(), 0);
    }
}
