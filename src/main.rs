//! Comfort Zone CLI
//!
//! Maps the linguistic habits of email authors from the command line.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use comfort_zone_lib::commands::{self, AnalysisResult};
use comfort_zone_lib::config::Config;
use comfort_zone_lib::export::ExportFormat;
use comfort_zone_lib::{output, AppState};

/// Comfort Zone - linguistic style analysis for email authors
#[derive(Parser)]
#[command(name = "comfort-zone")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file (defaults to <config_dir>/comfort-zone/config.toml)
    #[arg(short, long, global = true, env = "COMFORT_ZONE_CONFIG")]
    config: Option<PathBuf>,

    /// Corpus path: emails.csv, a directory holding it, or a maildir root
    #[arg(short, long, global = true, env = "COMFORT_ZONE_DATA")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Corpus loading overrides shared by corpus commands
#[derive(Args, Clone, Default)]
struct CorpusArgs {
    /// Read at most this many raw messages
    #[arg(long)]
    limit: Option<usize>,

    /// Minimum emails for an author to be eligible
    #[arg(long)]
    min_emails: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// List authors with enough emails to analyze
    Authors {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Analyze one author (the most prolific one when PERSON is omitted)
    Analyze {
        /// Full address or the name before '@'
        person: Option<String>,

        #[command(flatten)]
        corpus: CorpusArgs,

        /// Store the profile in the history database
        #[arg(long)]
        save: bool,

        /// Print JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Analyze your own text (reads stdin when FILE is omitted)
    Text {
        file: Option<PathBuf>,

        /// Store the profile in the history database
        #[arg(long)]
        save: bool,

        /// Print JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Compare the most prolific authors side by side
    Compare {
        /// Number of authors to compare
        #[arg(long)]
        max_people: Option<usize>,

        #[command(flatten)]
        corpus: CorpusArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export a profile, comparison or report to a file
    Export {
        #[arg(value_enum)]
        target: ExportTarget,

        /// Author for profile and report exports
        person: Option<String>,

        /// Output format: csv, json or text
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file or directory (defaults to Downloads)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use the latest saved profile instead of re-analyzing
        #[arg(long)]
        saved: bool,

        #[command(flatten)]
        corpus: CorpusArgs,
    },

    /// Show saved profiles
    History {
        /// Only profiles for this person
        #[arg(long)]
        person: Option<String>,

        /// Maximum rows
        #[arg(long, default_value = "20")]
        limit: u32,

        /// Delete all saved profiles
        #[arg(long)]
        clear: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportTarget {
    /// Comfort words (csv), full profile (json) or report (text)
    Profile,
    /// Author comparison table
    Comparison,
    /// Summary row (csv), full profile (json) or report with recommendations (text)
    Report,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl CorpusArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(limit) = self.limit {
            config.email_limit = limit;
        }
        if let Some(min_emails) = self.min_emails {
            config.min_emails_per_person = min_emails;
        }
    }
}

impl Cli {
    fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    async fn execute(self) -> Result<()> {
        let config_path = self.config_path();
        let mut config = Config::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        if let Some(data) = &self.data {
            config.data_path = data.clone();
        }

        match self.command {
            Commands::Authors { corpus, json } => {
                corpus.apply(&mut config);
                let state = AppState::new(config);
                let authors = commands::list_authors(&state)?;

                if json {
                    output::print_json(&authors)?;
                } else {
                    output::print_authors_table(&authors);
                }
            }

            Commands::Analyze { person, corpus, save, json } => {
                corpus.apply(&mut config);
                let state = AppState::new(config);
                let result = commands::analyze_author(&state, person.as_deref())?;
                finish_analysis(&state, &result, save, json)?;
            }

            Commands::Text { file, save, json } => {
                let text = read_text(file.as_ref())?;
                let state = AppState::new(config);
                let result = commands::analyze_text(&state, &text)?;
                finish_analysis(&state, &result, save, json)?;
            }

            Commands::Compare { max_people, corpus, json } => {
                corpus.apply(&mut config);
                let state = AppState::new(config);
                let comparison = commands::compare_authors(&state, max_people).await?;

                if json {
                    output::print_json(&comparison)?;
                } else {
                    output::print_comparison(&comparison);
                }
            }

            Commands::Export {
                target,
                person,
                format,
                output,
                saved,
                corpus,
            } => {
                let format: ExportFormat = format.parse()?;
                corpus.apply(&mut config);
                let state = AppState::new(config);

                let path = match target {
                    ExportTarget::Comparison => {
                        let comparison = commands::compare_authors(&state, None).await?;
                        commands::export_comparison(&comparison, format, output.as_deref())?
                    }
                    ExportTarget::Profile | ExportTarget::Report => {
                        let result = if saved {
                            saved_analysis(&state, person.as_deref())?
                        } else {
                            commands::analyze_author(&state, person.as_deref())?
                        };

                        if matches!(target, ExportTarget::Profile) {
                            commands::export_profile(&result, format, output.as_deref())?
                        } else {
                            commands::export_report(&result, format, output.as_deref())?
                        }
                    }
                };

                println!("{} {}", "Exported".green().bold(), path.display());
            }

            Commands::History {
                person,
                limit,
                clear,
                json,
            } => {
                let state = AppState::new(config);
                state.init_database()?;

                if clear {
                    let deleted = commands::clear_history(&state)?;
                    println!("Deleted {} saved profile(s)", deleted);
                    return Ok(());
                }

                let records = commands::profile_history(&state, person.as_deref(), Some(limit))?;
                if json {
                    output::print_json(&records)?;
                } else {
                    output::print_history_table(&records);
                    let total = commands::history_count(&state)?;
                    if total as usize > records.len() {
                        println!("{}", format!("{} saved in total", total).dimmed());
                    }
                }
            }

            Commands::Config(action) => match action {
                ConfigCommands::Show => {
                    let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
                    print!("{}", rendered);
                }
                ConfigCommands::Path => println!("{}", config_path.display()),
                ConfigCommands::Init { force } => {
                    if config_path.exists() && !force {
                        bail!(
                            "{} already exists (use --force to overwrite)",
                            config_path.display()
                        );
                    }
                    Config::default().save(&config_path)?;
                    println!("{} {}", "Wrote".green().bold(), config_path.display());
                }
            },
        }

        Ok(())
    }
}

/// Print (and optionally save) an analysis
fn finish_analysis(state: &AppState, result: &AnalysisResult, save: bool, json: bool) -> Result<()> {
    if save {
        state.init_database()?;
        let id = commands::save_profile(state, result)?;
        tracing::info!("Profile stored with id {}", id);
    }

    if json {
        output::print_json(result)?;
    } else {
        output::print_analysis(result);
    }

    Ok(())
}

/// Rebuild an analysis from the latest saved profile
fn saved_analysis(state: &AppState, person: Option<&str>) -> Result<AnalysisResult> {
    let Some(person) = person else {
        bail!("--saved needs a PERSON");
    };

    state.init_database()?;
    Ok(commands::analyze_saved(state, person)?)
}

fn read_text(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read text from stdin")?;
            Ok(text)
        }
    }
}

/// Initialize tracing. Logs go to stderr so stdout stays clean for --json.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "comfort_zone=info,comfort_zone_lib=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    cli.execute().await
}
