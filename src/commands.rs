//! Command handlers
//!
//! Operations behind the CLI subcommands. These load the corpus through a
//! process-wide cache, run the analyzer and hand results to the output,
//! export and database layers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::{Instant, SystemTime};

use serde::Serialize;

use crate::db::{self, queries::ProfileRecord};
use crate::export::{
    csv_export, filename_prefix, generate_export_filename, get_export_directory, json_export,
    ranked_terms, text_report, ExportFormat, ExportableProfile,
};
use crate::metrics::style::StyleRadar;
use crate::metrics::vocabulary::word_cloud_weights;
use crate::metrics::{self as analyzer, AnalyzerSettings};
use crate::models::email::{AuthorEmails, Corpus};
use crate::models::metrics::{short_person_name, AuthorComparison, AuthorProfile, ComparisonRow};
use crate::parser::corpus::resolve_source;
use crate::parser::{self, LoadOptions, ParserError};
use crate::recommendations::{recommend_for_profile, RecommendationSummary};
use crate::AppState;
use crate::CommandError;

/// Concurrent analyses during a comparison
const COMPARE_CONCURRENCY: usize = 4;

/// Words kept for word-cloud weights
const WORD_CLOUD_WORDS: usize = 50;

// ============================================================================
// Response DTOs
// ============================================================================

/// One author eligible for analysis
#[derive(Debug, Clone, Serialize)]
pub struct AuthorSummary {
    pub author: String,
    pub short_name: String,
    pub email_count: usize,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

/// Everything produced by analyzing one author or text
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Corpus path, or "text" for free-form input
    pub source: String,
    pub profile: AuthorProfile,
    pub recommendations: RecommendationSummary,
    pub radar: StyleRadar,
    pub word_weights: Vec<(String, f64)>,
}

impl AnalysisResult {
    /// Derive recommendations, radar and word weights for a profile
    pub fn from_profile(profile: AuthorProfile, source: String) -> Self {
        let recommendations = recommend_for_profile(&profile);
        let radar = StyleRadar::new(&profile.writing_style, &profile.vocabulary_diversity);
        let word_weights = word_cloud_weights(&profile.comfort_words, WORD_CLOUD_WORDS);

        Self {
            source,
            profile,
            recommendations,
            radar,
            word_weights,
        }
    }
}

// ============================================================================
// Corpus Cache
// ============================================================================

/// Cache key: source path plus the options that change what gets loaded
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CorpusKey {
    path: PathBuf,
    limit: Option<usize>,
    min_body_chars: usize,
}

/// What the cache checks to decide whether a source changed.
///
/// For a CSV this is the file itself. For a maildir tree it covers every
/// file below the root, since editing a nested message leaves the root
/// directory's own metadata untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SourceFingerprint {
    last_modified: SystemTime,
    total_size: u64,
    file_count: usize,
}

/// Cached corpus data to avoid re-reading unchanged sources
struct CachedCorpus {
    fingerprint: SourceFingerprint,
    corpus: Arc<Corpus>,
}

// Global corpus cache using lazy_static
lazy_static::lazy_static! {
    static ref CORPUS_CACHE: RwLock<HashMap<CorpusKey, CachedCorpus>> = RwLock::new(HashMap::new());
}

/// Newest modification time, total size and file count of a source path
fn source_fingerprint(path: &Path) -> Option<SourceFingerprint> {
    let metadata = std::fs::metadata(path).ok()?;
    if !metadata.is_dir() {
        return Some(SourceFingerprint {
            last_modified: metadata.modified().ok()?,
            total_size: metadata.len(),
            file_count: 1,
        });
    }

    let pattern = path.join("**").join("*");
    let mut fingerprint = SourceFingerprint {
        last_modified: metadata.modified().ok()?,
        total_size: 0,
        file_count: 0,
    };

    for entry in glob::glob(&pattern.to_string_lossy()).ok()?.filter_map(Result::ok) {
        let Ok(file) = std::fs::metadata(&entry) else {
            continue;
        };
        if !file.is_file() {
            continue;
        }
        if let Ok(modified) = file.modified() {
            fingerprint.last_modified = fingerprint.last_modified.max(modified);
        }
        fingerprint.total_size += file.len();
        fingerprint.file_count += 1;
    }

    Some(fingerprint)
}

/// Check if a corpus is cached and its source unchanged
fn get_cached_corpus(key: &CorpusKey) -> Option<Arc<Corpus>> {
    let fingerprint = source_fingerprint(&key.path)?;
    let cache = CORPUS_CACHE.read().ok()?;
    let cached = cache.get(key)?;

    if cached.fingerprint == fingerprint {
        Some(cached.corpus.clone())
    } else {
        None
    }
}

/// Store a loaded corpus in the cache
fn cache_corpus(key: CorpusKey, corpus: Arc<Corpus>) {
    let Some(fingerprint) = source_fingerprint(&key.path) else {
        return;
    };

    if let Ok(mut cache) = CORPUS_CACHE.write() {
        cache.insert(key, CachedCorpus { fingerprint, corpus });
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Get the database reference, returning error if not initialized
fn get_database(state: &AppState) -> Result<&db::Database, CommandError> {
    state.db.get().ok_or(CommandError::NotInitialized)
}

/// Find an author by full address, or by the name before `@`
fn find_author(corpus: &Corpus, person: &str) -> Option<AuthorEmails> {
    if let Some(found) = corpus.author(person) {
        return Some(found);
    }

    let wanted = person.to_lowercase();
    let sender = corpus
        .emails
        .iter()
        .map(|e| e.sender.as_str())
        .find(|s| s.to_lowercase() == wanted || short_person_name(s).to_lowercase() == wanted)?
        .to_string();

    corpus.author(&sender)
}

/// Pick the author to analyze: the named one, or the most prolific eligible one
pub fn select_author(
    corpus: &Corpus,
    person: Option<&str>,
    min_emails: usize,
) -> Result<AuthorEmails, CommandError> {
    match person {
        Some(person) => {
            find_author(corpus, person).ok_or_else(|| CommandError::AuthorNotFound(person.to_string()))
        }
        None => corpus
            .by_author(min_emails)
            .into_iter()
            .next()
            .ok_or(CommandError::NoEligibleAuthors { min_emails }),
    }
}

/// Resolve where an export lands: a file, a directory, or the default export directory
fn resolve_output_path(output: Option<&Path>, prefix: &str, format: ExportFormat) -> PathBuf {
    let filename = generate_export_filename(prefix, format.extension());

    match output {
        Some(path) if path.is_dir() => path.join(filename),
        Some(path) => path.to_path_buf(),
        None => get_export_directory().join(filename),
    }
}

// ============================================================================
// Corpus Commands
// ============================================================================

/// Load the corpus from a Kaggle CSV (or a directory holding `emails.csv`) or a maildir tree
pub fn load_corpus(source: &Path, options: &LoadOptions) -> Result<Arc<Corpus>, CommandError> {
    let path = resolve_source(source);
    let key = CorpusKey {
        path: path.clone(),
        limit: options.limit,
        min_body_chars: options.min_body_chars,
    };

    if let Some(corpus) = get_cached_corpus(&key) {
        tracing::debug!("Corpus cache hit for {}", path.display());
        return Ok(corpus);
    }

    let start = Instant::now();
    let corpus = if parser::is_csv_source(&path) {
        parser::load_emails_from_csv(&path, options)?
    } else if path.is_dir() {
        parser::load_emails_from_maildir(&path, options)?
    } else {
        return Err(ParserError::NotFound(path.display().to_string()).into());
    };

    tracing::info!(
        "Loaded {} emails ({} read) from {} in {:?}",
        corpus.len(),
        corpus.rows_read,
        path.display(),
        start.elapsed()
    );

    let corpus = Arc::new(corpus);
    cache_corpus(key, corpus.clone());
    Ok(corpus)
}

/// Authors with enough emails, most prolific first
pub fn list_authors(state: &AppState) -> Result<Vec<AuthorSummary>, CommandError> {
    let config = &state.config;
    let corpus = load_corpus(&config.data_path, &config.load_options())?;

    let authors = corpus
        .by_author(config.min_emails_per_person)
        .into_iter()
        .map(|a| {
            let (first_date, last_date) = match corpus.date_range(&a.author) {
                Some((first, last)) => (Some(first), Some(last)),
                None => (None, None),
            };
            AuthorSummary {
                short_name: short_person_name(&a.author).to_string(),
                email_count: a.email_count(),
                author: a.author,
                first_date,
                last_date,
            }
        })
        .collect();

    Ok(authors)
}

// ============================================================================
// Analysis Commands
// ============================================================================

/// Analyze one corpus author (the most prolific one when `person` is None)
pub fn analyze_author(state: &AppState, person: Option<&str>) -> Result<AnalysisResult, CommandError> {
    let config = &state.config;
    let corpus = load_corpus(&config.data_path, &config.load_options())?;
    let author = select_author(&corpus, person, config.min_emails_per_person)?;

    tracing::info!("Analyzing {} ({} emails)", author.author, author.email_count());

    let profile = analyzer::analyze_author(&author.bodies, &author.author, &config.analyzer_settings());
    Ok(AnalysisResult::from_profile(profile, corpus.source.clone()))
}

/// Analyze free-form text as if it were a single email
pub fn analyze_text(state: &AppState, text: &str) -> Result<AnalysisResult, CommandError> {
    let words = text.split_whitespace().count();
    let required = state.config.min_custom_words;

    if words < required {
        return Err(CommandError::TextTooShort { words, required });
    }

    let profile = analyzer::analyze_text(text, &state.config.analyzer_settings());
    Ok(AnalysisResult::from_profile(profile, "text".to_string()))
}

/// Compare the top `max_people` authors on headline metrics.
///
/// Authors are analyzed concurrently on blocking threads; rows keep corpus order.
pub async fn compare_authors(
    state: &AppState,
    max_people: Option<usize>,
) -> Result<AuthorComparison, CommandError> {
    let config = &state.config;
    let max_people = max_people.unwrap_or(config.max_compare);
    if max_people == 0 {
        return Err(CommandError::InvalidArgument(
            "max_people must be at least 1".to_string(),
        ));
    }

    let corpus = load_corpus(&config.data_path, &config.load_options())?;

    let authors: Vec<AuthorEmails> = corpus
        .by_author(config.min_emails_per_person)
        .into_iter()
        .take(max_people)
        .collect();

    if authors.is_empty() {
        return Err(CommandError::NoEligibleAuthors {
            min_emails: config.min_emails_per_person,
        });
    }

    let start = Instant::now();
    let settings = Arc::new(config.analyzer_settings());
    let semaphore = Arc::new(tokio::sync::Semaphore::new(COMPARE_CONCURRENCY));
    let mut handles = Vec::new();

    for author in authors {
        let sem = semaphore.clone();
        let settings = settings.clone();
        let handle = tokio::spawn(async move {
            let _permit = sem
                .acquire_owned()
                .await
                .map_err(|e| CommandError::Internal(format!("Semaphore closed: {}", e)))?;
            tokio::task::spawn_blocking(move || profile_row(&author, &settings))
                .await
                .map_err(|e| CommandError::Internal(format!("Analysis task failed: {}", e)))
        });
        handles.push(handle);
    }

    let mut rows = Vec::with_capacity(handles.len());
    for result in futures::future::join_all(handles).await {
        let row = result.map_err(|e| CommandError::Internal(format!("Analysis task failed: {}", e)))??;
        rows.push(row);
    }

    tracing::info!("Compared {} authors in {:?}", rows.len(), start.elapsed());
    Ok(AuthorComparison::from_rows(rows))
}

fn profile_row(author: &AuthorEmails, settings: &AnalyzerSettings) -> ComparisonRow {
    let profile = analyzer::analyze_author(&author.bodies, &author.author, settings);
    ComparisonRow::from(&profile)
}

// ============================================================================
// History Commands
// ============================================================================

/// Store an analyzed profile in the history database
pub fn save_profile(state: &AppState, result: &AnalysisResult) -> Result<i64, CommandError> {
    let db = get_database(state)?;
    let id = db.with_connection(|conn| db::queries::insert_profile(conn, &result.profile, &result.source))?;

    tracing::info!("Saved profile for {} (id {})", result.profile.person, id);
    Ok(id)
}

/// Stored profiles, newest first
pub fn profile_history(
    state: &AppState,
    person: Option<&str>,
    limit: Option<u32>,
) -> Result<Vec<ProfileRecord>, CommandError> {
    let db = get_database(state)?;
    let records = db.with_connection(|conn| db::queries::list_profiles(conn, person, limit))?;
    Ok(records)
}

/// Most recent stored profile for a person
pub fn latest_profile(state: &AppState, person: &str) -> Result<Option<AuthorProfile>, CommandError> {
    let db = get_database(state)?;
    let profile = db.with_connection(|conn| db::queries::get_latest_profile(conn, person))?;
    Ok(profile)
}

/// Rebuild an analysis from the latest stored profile.
///
/// `person` resolves like it does for corpus analysis: the exact stored name
/// first, then the full address or the part before `@`, ignoring case.
pub fn analyze_saved(state: &AppState, person: &str) -> Result<AnalysisResult, CommandError> {
    let db = get_database(state)?;
    let profile = db.with_connection(|conn| match db::queries::get_latest_profile(conn, person)? {
        Some(profile) => Ok(Some(profile)),
        None => db::queries::find_latest_profile(conn, person),
    })?;

    let profile = profile.ok_or_else(|| CommandError::NoSavedProfile(person.to_string()))?;
    tracing::info!("Using saved profile for {} from {}", profile.person, profile.analyzed_at);
    Ok(AnalysisResult::from_profile(profile, "history".to_string()))
}

/// Delete the whole history, returning how many profiles were removed
pub fn clear_history(state: &AppState) -> Result<usize, CommandError> {
    let db = get_database(state)?;
    let deleted = db.with_connection(db::queries::clear_profiles)?;

    tracing::info!("Cleared {} stored profiles", deleted);
    Ok(deleted)
}

/// Number of stored profiles
pub fn history_count(state: &AppState) -> Result<u32, CommandError> {
    let db = get_database(state)?;
    let count = db.with_connection(db::queries::count_profiles)?;
    Ok(count)
}

// ============================================================================
// Export Commands
// ============================================================================

/// Export an analyzed profile. Returns the file path of the exported file.
pub fn export_profile(
    result: &AnalysisResult,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<PathBuf, CommandError> {
    let prefix = format!("{}_profile", filename_prefix(result.profile.short_name()));
    let path = resolve_output_path(output, &prefix, format);

    match format {
        ExportFormat::Csv => csv_export::write_terms_csv(&ranked_terms(&result.profile.comfort_words), &path)?,
        ExportFormat::Json => {
            json_export::write_profile_json(&result.profile, Some(&result.recommendations), &path)?
        }
        ExportFormat::Text => text_report::write_report(&result.profile, None, &path)?,
    }

    Ok(path)
}

/// Export the analysis report for a profile. Returns the file path of the exported file.
pub fn export_report(
    result: &AnalysisResult,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<PathBuf, CommandError> {
    let prefix = format!("{}_report", filename_prefix(result.profile.short_name()));
    let path = resolve_output_path(output, &prefix, format);

    match format {
        ExportFormat::Csv => {
            csv_export::write_profiles_csv(&[ExportableProfile::from(&result.profile)], &path)?
        }
        ExportFormat::Json => {
            json_export::write_profile_json(&result.profile, Some(&result.recommendations), &path)?
        }
        ExportFormat::Text => {
            text_report::write_report(&result.profile, Some(&result.recommendations), &path)?
        }
    }

    Ok(path)
}

/// Export an author comparison. Returns the file path of the exported file.
pub fn export_comparison(
    comparison: &AuthorComparison,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<PathBuf, CommandError> {
    let path = resolve_output_path(output, "comparison", format);

    match format {
        ExportFormat::Csv => csv_export::write_comparison_csv(&comparison.rows, &path)?,
        ExportFormat::Json => json_export::write_comparison_json(comparison, &path)?,
        ExportFormat::Text => text_report::write_comparison_report(comparison, &path)?,
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::email::Email;

    fn email(sender: &str, body: &str) -> Email {
        Email {
            file: "f".to_string(),
            sender: sender.to_string(),
            subject: "s".to_string(),
            date: None,
            body: body.to_string(),
        }
    }

    fn corpus() -> Corpus {
        Corpus::new(
            "test".to_string(),
            vec![
                email("kay.mann@enron.com", "one"),
                email("jeff.dasovich@enron.com", "two"),
                email("jeff.dasovich@enron.com", "three"),
            ],
            3,
        )
    }

    fn long_text() -> String {
        "The quarterly forecast looks strong and the desk expects steady volume. ".repeat(12)
    }

    #[test]
    fn test_select_author_default_is_most_prolific() {
        let author = select_author(&corpus(), None, 1).unwrap();
        assert_eq!(author.author, "jeff.dasovich@enron.com");
    }

    #[test]
    fn test_select_author_by_short_name() {
        let author = select_author(&corpus(), Some("Kay.Mann"), 1).unwrap();
        assert_eq!(author.author, "kay.mann@enron.com");
        assert_eq!(author.email_count(), 1);
    }

    #[test]
    fn test_select_author_errors() {
        assert!(matches!(
            select_author(&corpus(), Some("nobody"), 1),
            Err(CommandError::AuthorNotFound(_))
        ));
        assert!(matches!(
            select_author(&corpus(), None, 10),
            Err(CommandError::NoEligibleAuthors { min_emails: 10 })
        ));
    }

    #[test]
    fn test_analyze_text_too_short() {
        let state = AppState::default();
        let err = analyze_text(&state, "only a few words here").unwrap_err();
        assert!(matches!(err, CommandError::TextTooShort { words: 5, required: 100 }));
    }

    #[test]
    fn test_analyze_text() {
        let state = AppState::default();
        let result = analyze_text(&state, &long_text()).unwrap();

        assert_eq!(result.source, "text");
        assert_eq!(result.profile.person, analyzer::CUSTOM_TEXT_PERSON);
        assert!(!result.word_weights.is_empty());
        assert!(result.radar.reading_ease <= 100.0);
    }

    #[test]
    fn test_missing_corpus_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_corpus(&dir.path().join("nothing.csv"), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, CommandError::Parser(ParserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_compare_rejects_zero_people() {
        // Checked before the corpus is touched
        let state = AppState::default();
        let err = compare_authors(&state, Some(0)).await.unwrap_err();
        assert!(matches!(err, CommandError::InvalidArgument(_)));
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_history_requires_database() {
        let state = AppState::default();
        assert!(matches!(
            profile_history(&state, None, None),
            Err(CommandError::NotInitialized)
        ));
    }

    #[test]
    fn test_save_and_list_history() {
        let state = AppState::new(Config::default());
        let db = db::Database::in_memory().unwrap();
        db.initialize().unwrap();
        state.attach_database(db);

        let result = analyze_text(&state, &long_text()).unwrap();
        save_profile(&state, &result).unwrap();

        let history = profile_history(&state, Some(analyzer::CUSTOM_TEXT_PERSON), None).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].source, "text");
        assert_eq!(history_count(&state).unwrap(), 1);
        assert!(latest_profile(&state, analyzer::CUSTOM_TEXT_PERSON).unwrap().is_some());

        assert_eq!(clear_history(&state).unwrap(), 1);
        assert_eq!(history_count(&state).unwrap(), 0);
    }

    #[test]
    fn test_export_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::default();
        let result = analyze_text(&state, &long_text()).unwrap();

        let path = export_profile(&result, ExportFormat::Csv, Some(dir.path())).unwrap();
        assert!(path.starts_with(dir.path()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("Custom_Text_profile_"));
        assert!(name.ends_with(".csv"));

        let report = export_report(&result, ExportFormat::Text, Some(&dir.path().join("r.txt"))).unwrap();
        assert_eq!(report, dir.path().join("r.txt"));
        assert!(std::fs::read_to_string(report).unwrap().contains("RECOMMENDATIONS:"));
    }
}
