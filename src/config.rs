//! Configuration file handling
//!
//! Settings live in `<config_dir>/comfort-zone/config.toml`. Every field
//! has a default, so a missing file or a partial file is fine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics::AnalyzerSettings;
use crate::parser::LoadOptions;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Kaggle CSV file, directory holding `emails.csv`, or a maildir root
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Maximum number of raw messages read from the corpus
    #[serde(default = "default_email_limit")]
    pub email_limit: usize,

    /// Authors with fewer messages are left out
    #[serde(default = "default_min_emails")]
    pub min_emails_per_person: usize,

    /// Bodies with this many characters or fewer are dropped
    #[serde(default = "default_min_body_chars")]
    pub min_body_chars: usize,

    /// Free text needs at least this many words to be analyzed
    #[serde(default = "default_min_custom_words")]
    pub min_custom_words: usize,

    #[serde(default = "default_top_words")]
    pub top_words: usize,

    #[serde(default = "default_top_phrases")]
    pub top_phrases: usize,

    #[serde(default = "default_phrase_ngram")]
    pub phrase_ngram: usize,

    /// Authors shown by `compare`
    #[serde(default = "default_max_compare")]
    pub max_compare: usize,

    /// Profile history database, defaults to the local data directory
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

// Default value functions
fn default_data_path() -> PathBuf {
    PathBuf::from("data/raw/")
}

fn default_email_limit() -> usize {
    5000
}

fn default_min_emails() -> usize {
    30
}

fn default_min_body_chars() -> usize {
    crate::parser::corpus::DEFAULT_MIN_BODY_CHARS
}

fn default_min_custom_words() -> usize {
    100
}

fn default_top_words() -> usize {
    30
}

fn default_top_phrases() -> usize {
    20
}

fn default_phrase_ngram() -> usize {
    3
}

fn default_max_compare() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            email_limit: default_email_limit(),
            min_emails_per_person: default_min_emails(),
            min_body_chars: default_min_body_chars(),
            min_custom_words: default_min_custom_words(),
            top_words: default_top_words(),
            top_phrases: default_top_phrases(),
            phrase_ngram: default_phrase_ngram(),
            max_compare: default_max_compare(),
            db_path: None,
        }
    }
}

impl Config {
    /// Default config file path (<config_dir>/comfort-zone/config.toml)
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("comfort-zone")
            .join("config.toml")
    }

    /// Load configuration from file, falling back to defaults when it is missing
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("Config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Analyzer tunables taken from this config
    pub fn analyzer_settings(&self) -> AnalyzerSettings {
        AnalyzerSettings {
            top_words: self.top_words,
            top_phrases: self.top_phrases,
            phrase_ngram: self.phrase_ngram,
            ..AnalyzerSettings::default()
        }
    }

    /// Corpus loading options taken from this config
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            limit: Some(self.email_limit),
            min_body_chars: self.min_body_chars,
        }
    }

    /// Database path, configured or default
    pub fn database_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(crate::db::default_db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_path, PathBuf::from("data/raw/"));
        assert_eq!(config.email_limit, 5000);
        assert_eq!(config.min_emails_per_person, 30);
        assert_eq!(config.min_body_chars, 100);
        assert_eq!(config.min_custom_words, 100);
        assert_eq!(config.max_compare, 5);
        assert!(config.db_path.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("email_limit = 200\ntop_words = 10\n").unwrap();
        assert_eq!(config.email_limit, 200);
        assert_eq!(config.top_words, 10);
        assert_eq!(config.min_emails_per_person, 30);
        assert_eq!(config.phrase_ngram, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("config.toml");

        let config = Config {
            min_emails_per_person: 12,
            db_path: Some(PathBuf::from("/tmp/profiles.db")),
            ..Config::default()
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "email_limit = \"lots\"").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_derived_settings() {
        let config = Config {
            top_words: 7,
            email_limit: 50,
            ..Config::default()
        };

        assert_eq!(config.analyzer_settings().top_words, 7);
        assert_eq!(config.analyzer_settings().top_fingerprint, 5);
        assert_eq!(config.load_options().limit, Some(50));
    }
}
