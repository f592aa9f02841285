//! Database module for SQLite operations
//!
//! This module handles the analyzed-profile history:
//! - Schema creation
//! - Profile inserts and lookups

pub mod queries;
pub mod schema;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;
use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database directory error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Profile JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Lock poisoned")]
    LockPoisoned,
}

/// Database connection wrapper
pub struct Database {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl Database {
    /// Create a new database connection, creating parent directories as needed
    pub fn new(path: PathBuf) -> Result<Self, DbError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&path)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Open a throwaway in-memory database
    pub fn in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: PathBuf::from(":memory:"),
        })
    }

    /// Initialize the database schema
    pub fn initialize(&self) -> Result<(), DbError> {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        schema::create_tables(&conn)?;
        tracing::debug!("Database schema ready at {}", self.path.display());
        Ok(())
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Execute a query with the database connection
    pub fn with_connection<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Connection) -> Result<T, DbError>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn)
    }
}

/// Get the default database path
pub fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("comfort-zone").join("profiles.db")
}
