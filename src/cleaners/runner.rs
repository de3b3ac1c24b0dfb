//! Cleaning orchestrator: runs every source cleaner in a fixed order,
//! persists cleaned tables, and aggregates per-source outcomes. A single
//! source failing never aborts the others.

use std::path::Path;

use crate::cleaners::{CleaningStats, Source, cleaner_for, load_raw_files};
use crate::config::Config;

/// What happened to one source during a cleaning run. Distinguishes a
/// genuinely empty source from one that failed part-way.
#[derive(Debug, Clone)]
pub enum SourceOutcome {
    Cleaned { rows: usize },
    Empty,
    Failed { reason: String },
}

impl SourceOutcome {
    pub fn rows(&self) -> usize {
        match self {
            SourceOutcome::Cleaned { rows } => *rows,
            _ => 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct CleaningRun {
    pub outcomes: Vec<(Source, SourceOutcome)>,
    pub stats: Vec<CleaningStats>,
}

impl CleaningRun {
    pub fn total_rows(&self) -> usize {
        self.outcomes.iter().map(|(_, o)| o.rows()).sum()
    }

    pub fn failed_sources(&self) -> Vec<Source> {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, SourceOutcome::Failed { .. }))
            .map(|(s, _)| *s)
            .collect()
    }
}

/// Clean all seven sources and write `<source>_clean.csv` for each
/// non-empty result.
pub fn clean_all_sources(config: &Config) -> CleaningRun {
    tracing::info!("Cleaning all sources from {}", config.raw_dir.display());
    let mut run = CleaningRun::default();

    for source in Source::ALL {
        let outcome = clean_one_source(config, source);
        match &outcome {
            (SourceOutcome::Cleaned { rows }, _) => {
                tracing::info!("{source}: {rows} rows cleaned");
            }
            (SourceOutcome::Empty, _) => {
                tracing::warn!("{source}: no data after cleaning");
            }
            (SourceOutcome::Failed { reason }, _) => {
                tracing::error!("{source}: cleaning failed: {reason}");
            }
        }
        let (outcome, stats) = outcome;
        run.outcomes.push((source, outcome));
        if let Some(stats) = stats {
            run.stats.push(stats);
        }
    }

    let total = run.total_rows();
    tracing::info!(
        "Cleaning finished: {total} rows across {} sources",
        run.outcomes.len()
    );
    run
}

fn clean_one_source(config: &Config, source: Source) -> (SourceOutcome, Option<CleaningStats>) {
    let (raw, files_processed, file_issues) = match load_raw_files(&config.raw_dir, source) {
        Ok(loaded) => loaded,
        Err(e) => {
            return (
                SourceOutcome::Failed { reason: e.to_string() },
                None,
            );
        }
    };

    if raw.is_empty() {
        let mut stats = CleaningStats::new(source);
        stats.files_processed = files_processed;
        stats.issues = file_issues;
        return (SourceOutcome::Empty, Some(stats));
    }

    let cleaner = cleaner_for(source);
    match cleaner.clean(raw) {
        Ok((cleaned, mut stats)) => {
            stats.files_processed = files_processed;
            stats.issues.extend(file_issues);
            if cleaned.is_empty() {
                return (SourceOutcome::Empty, Some(stats));
            }
            let path = clean_file_path(&config.clean_dir, source);
            if let Err(e) = cleaned.write_csv(&path) {
                return (
                    SourceOutcome::Failed {
                        reason: format!("writing {}: {e}", path.display()),
                    },
                    Some(stats),
                );
            }
            tracing::info!(
                "Saved {} ({} rows from {} files, drop rate {:.1}%)",
                path.display(),
                stats.rows_output,
                stats.files_processed,
                stats.drop_rate()
            );
            (SourceOutcome::Cleaned { rows: cleaned.len() }, Some(stats))
        }
        Err(e) => (
            SourceOutcome::Failed { reason: e.to_string() },
            None,
        ),
    }
}

pub fn clean_file_path(clean_dir: &Path, source: Source) -> std::path::PathBuf {
    clean_dir.join(source.clean_file_name())
}

/// Log the human-readable cleaning summary.
pub fn log_summary(run: &CleaningRun) {
    for (source, outcome) in &run.outcomes {
        match outcome {
            SourceOutcome::Cleaned { rows } => {
                tracing::info!("  {source}: {rows} rows");
            }
            SourceOutcome::Empty => tracing::info!("  {source}: empty"),
            SourceOutcome::Failed { reason } => {
                tracing::error!("  {source}: FAILED ({reason})");
            }
        }
    }
    for stats in &run.stats {
        for issue in &stats.issues {
            tracing::warn!("  {}: {issue}", stats.source);
        }
    }
    let failed = run.failed_sources();
    if !failed.is_empty() {
        tracing::warn!(
            "{} source(s) failed: {}",
            failed.len(),
            failed
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    tracing::info!("Total rows cleaned: {}", run.total_rows());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(raw: &Path, clean: &Path) -> Config {
        Config {
            database_url: "postgres://unused".into(),
            raw_dir: raw.to_path_buf(),
            clean_dir: clean.to_path_buf(),
            command: None,
        }
    }

    #[test]
    fn missing_raw_directories_yield_empty_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let run = clean_all_sources(&config(&dir.path().join("raw"), &dir.path().join("clean")));
        assert_eq!(run.total_rows(), 0);
        assert!(run.failed_sources().is_empty());
        assert!(
            run.outcomes
                .iter()
                .all(|(_, o)| matches!(o, SourceOutcome::Empty))
        );
    }

    #[test]
    fn one_populated_source_cleans_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let adzuna_dir = dir.path().join("raw").join("adzuna");
        std::fs::create_dir_all(&adzuna_dir).unwrap();
        std::fs::write(
            adzuna_dir.join("batch1.csv"),
            "title,company,location,description,country\n\
             Backend Dev,Acme,Paris,python services,France\n\
             Backend Dev,Acme,Paris,duplicate row,France\n",
        )
        .unwrap();

        let clean_dir = dir.path().join("clean");
        let run = clean_all_sources(&config(&dir.path().join("raw"), &clean_dir));
        assert_eq!(run.total_rows(), 1);

        let written = crate::table::Table::read_csv(&clean_dir.join("adzuna_clean.csv")).unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written.cell(0, "country"), Some("FR"));
    }
}
