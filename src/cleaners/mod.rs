// Cleaner module.
// Defines the per-source cleaning strategies and the orchestrator that
// runs them against the raw file store.

mod adzuna;
mod github;
mod google_trends;
mod indeed;
mod kaggle;
mod remoteok;
pub mod runner;
mod stackoverflow;

use std::path::Path;

use chrono::Utc;

use crate::error::PipelineError;
use crate::table::Table;

/// The seven fixed origin datasets. Variant names double as raw
/// subdirectory names and cleaned file prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Adzuna,
    Github,
    Kaggle,
    GoogleTrends,
    StackOverflow,
    RemoteOk,
    Indeed,
}

impl Source {
    pub const ALL: [Source; 7] = [
        Source::Adzuna,
        Source::Github,
        Source::Kaggle,
        Source::GoogleTrends,
        Source::StackOverflow,
        Source::RemoteOk,
        Source::Indeed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Adzuna => "adzuna",
            Source::Github => "github",
            Source::Kaggle => "kaggle",
            Source::GoogleTrends => "google_trends",
            Source::StackOverflow => "stackoverflow",
            Source::RemoteOk => "remoteok",
            Source::Indeed => "indeed",
        }
    }

    /// Cleaned store filename for this source.
    pub fn clean_file_name(&self) -> String {
        format!("{}_clean.csv", self.as_str())
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cleaning statistics for one source, scoped to a single run.
#[derive(Debug, Clone)]
pub struct CleaningStats {
    pub source: Source,
    pub files_processed: usize,
    pub rows_input: usize,
    pub rows_output: usize,
    pub rows_dropped: usize,
    pub issues: Vec<String>,
}

impl CleaningStats {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            files_processed: 0,
            rows_input: 0,
            rows_output: 0,
            rows_dropped: 0,
            issues: Vec::new(),
        }
    }

    /// Share of input rows dropped, as a percentage; 0.0 on empty input.
    pub fn drop_rate(&self) -> f64 {
        if self.rows_input == 0 {
            return 0.0;
        }
        self.rows_dropped as f64 / self.rows_input as f64 * 100.0
    }
}

/// Trait that all source cleaners implement. Each cleaner takes the
/// concatenated raw table for its source and returns the cleaned table
/// plus per-run statistics.
pub trait SourceCleaner: Send + Sync {
    fn source(&self) -> Source;

    fn clean(&self, raw: Table) -> Result<(Table, CleaningStats), PipelineError>;
}

/// Resolve the cleaning strategy for a source.
pub fn cleaner_for(source: Source) -> Box<dyn SourceCleaner> {
    match source {
        Source::Adzuna => Box::new(adzuna::AdzunaCleaner),
        Source::Github => Box::new(github::GithubCleaner),
        Source::Kaggle => Box::new(kaggle::KaggleCleaner),
        Source::GoogleTrends => Box::new(google_trends::GoogleTrendsCleaner),
        Source::StackOverflow => Box::new(stackoverflow::StackOverflowCleaner),
        Source::RemoteOk => Box::new(remoteok::RemoteOkCleaner),
        Source::Indeed => Box::new(indeed::IndeedCleaner),
    }
}

/// Load and concatenate every raw CSV file for a source. A missing
/// directory or an empty file set is an empty table, not an error;
/// individual unreadable files are skipped and reported through the stats.
pub fn load_raw_files(
    raw_dir: &Path,
    source: Source,
) -> Result<(Table, usize, Vec<String>), PipelineError> {
    let source_dir = raw_dir.join(source.as_str());
    let mut issues = Vec::new();
    if !source_dir.is_dir() {
        tracing::warn!("No raw directory for source '{source}': {}", source_dir.display());
        return Ok((Table::default(), 0, issues));
    }

    let mut paths: Vec<_> = std::fs::read_dir(&source_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut combined = Table::default();
    let mut files_processed = 0;
    for path in paths {
        match Table::read_csv(&path) {
            Ok(table) => {
                if !table.is_empty() {
                    combined.append(table);
                }
                files_processed += 1;
            }
            Err(e) => {
                tracing::error!("Failed to read {}: {e}", path.display());
                issues.push(format!("unreadable file {}: {e}", path.display()));
            }
        }
    }
    tracing::info!("Found {files_processed} readable files for '{source}'");
    Ok((combined, files_processed, issues))
}

/// Stamp every row with the pipeline processing time.
pub(crate) fn stamp_cleaned_at(table: &mut Table) {
    let now = Utc::now().to_rfc3339();
    table.fill_column("cleaned_at", &now);
}

/// Record which expected columns are missing (adding them empty so later
/// stages see a stable schema) and return the issue list.
pub(crate) fn check_expected_columns(table: &mut Table, expected: &[&str]) -> Vec<String> {
    let missing: Vec<&str> = expected
        .iter()
        .copied()
        .filter(|c| !table.has_column(c))
        .collect();
    let mut issues = Vec::new();
    if !missing.is_empty() {
        issues.push(format!("missing expected columns: {}", missing.join(", ")));
        for column in missing {
            table.ensure_column(column);
        }
    }
    issues
}
