//! Comfort Zone - linguistic style analysis for email corpora
//!
//! This library provides the engine behind the `comfort-zone` CLI.
//! It handles:
//! - Enron corpus ingestion (Kaggle CSV or maildir)
//! - Per-author linguistic profiles (comfort words, phrases, style, fingerprint)
//! - Writing recommendations
//! - CSV, JSON and text exports
//! - SQLite profile history

pub mod commands;
pub mod config;
pub mod db;
pub mod export;
pub mod metrics;
pub mod models;
pub mod output;
pub mod parser;
pub mod recommendations;

use std::sync::OnceLock;

use config::Config;
use db::Database;

/// Application state shared by all commands
pub struct AppState {
    pub config: Config,
    pub db: OnceLock<Database>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            db: OnceLock::new(),
        }
    }

    /// Open the profile database at the configured path and create the schema
    pub fn init_database(&self) -> Result<(), CommandError> {
        let db_path = self.config.database_path();
        tracing::info!("Database path: {:?}", db_path);

        let database = Database::new(db_path)?;
        database.initialize()?;
        self.attach_database(database);
        Ok(())
    }

    /// Use an already opened database (first one wins)
    pub fn attach_database(&self, database: Database) {
        if self.db.set(database).is_err() {
            tracing::warn!("Database already initialized, keeping the existing connection");
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Error type for commands
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),

    #[error("Database not initialized")]
    NotInitialized,

    #[error("Parser error: {0}")]
    Parser(#[from] parser::ParserError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Author not found: {0}")]
    AuthorNotFound(String),

    #[error("No saved profile for {0}")]
    NoSavedProfile(String),

    #[error("No author has at least {min_emails} emails")]
    NoEligibleAuthors { min_emails: usize },

    #[error("Text too short: {words} words, at least {required} needed")]
    TextTooShort { words: usize, required: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

// Serialize as the display string for JSON output
impl serde::Serialize for CommandError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
