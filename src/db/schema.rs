//! Database schema definitions
//!
//! Contains SQL for creating all tables and indexes

use rusqlite::Connection;
use super::DbError;

/// SQL schema for all tables
const SCHEMA: &str = r#"
-- Analyzed profile history
CREATE TABLE IF NOT EXISTS profiles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    person TEXT NOT NULL,
    source TEXT NOT NULL,
    total_emails INTEGER NOT NULL DEFAULT 0,
    unique_words INTEGER NOT NULL DEFAULT 0,
    lexical_diversity REAL NOT NULL DEFAULT 0.0,
    reading_ease REAL NOT NULL DEFAULT 0.0,
    avg_sentence_length REAL NOT NULL DEFAULT 0.0,
    profile_json TEXT NOT NULL,
    analyzed_at TEXT NOT NULL,
    created_at TEXT DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_profiles_person ON profiles(person);
CREATE INDEX IF NOT EXISTS idx_profiles_analyzed ON profiles(analyzed_at DESC);
"#;

/// Create all database tables
pub fn create_tables(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
