use crate::cleaners::{CleaningStats, Source, SourceCleaner, stamp_cleaned_at};
use crate::error::PipelineError;
use crate::rules;
use crate::table::Table;

/// GitHub repository metadata: dedup on the repository id, counter
/// validation, and popularity bucketing.
pub struct GithubCleaner;

impl SourceCleaner for GithubCleaner {
    fn source(&self) -> Source {
        Source::Github
    }

    fn clean(&self, mut table: Table) -> Result<(Table, CleaningStats), PipelineError> {
        let mut stats = CleaningStats::new(self.source());
        stats.rows_input = table.len();

        table.dedup_by_key(&["id"]);

        for column in ["full_name", "name", "description", "language"] {
            table.map_column(column, |v| v.map(rules::clean_text_encoding));
        }

        // Star/fork counters: invalid values become 0, not row drops.
        for column in ["stargazers_count", "forks_count"] {
            table.map_column(column, |v| {
                let count = v
                    .and_then(|s| s.trim().parse::<f64>().ok())
                    .map(|n| n as i64)
                    .unwrap_or(0);
                Some(count.to_string())
            });
        }

        table.map_column("language", |v| {
            let lower = v.unwrap_or("").trim().to_lowercase();
            Some(if lower.is_empty() { "unknown".to_string() } else { lower })
        });

        table.derive_column("technologies", |t, i| {
            let text = format!(
                "{} {}",
                t.cell(i, "name").unwrap_or(""),
                t.cell(i, "description").unwrap_or("")
            );
            let techs = rules::extract_technologies(&text);
            Some(techs.into_iter().collect::<Vec<_>>().join(";"))
        });

        if table.has_column("stargazers_count") {
            table.derive_column("popularity_category", |t, i| {
                let stars = t
                    .cell(i, "stargazers_count")
                    .and_then(|s| s.parse::<i64>().ok())
                    .unwrap_or(0);
                Some(rules::popularity_category(stars).to_string())
            });
        }

        table.retain_rows(|t, i| t.cell(i, "name").is_some_and(|v| !v.is_empty()));

        stamp_cleaned_at(&mut table);
        stats.rows_output = table.len();
        stats.rows_dropped = stats.rows_input - stats.rows_output;
        Ok((table, stats))
    }
}
