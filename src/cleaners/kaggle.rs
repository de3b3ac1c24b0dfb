use crate::cleaners::{CleaningStats, Source, SourceCleaner, stamp_cleaned_at};
use crate::error::PipelineError;
use crate::rules;
use crate::table::Table;

/// Kaggle salary datasets: rows without a plausible salary are useless
/// here, so the salary filter is a row drop rather than a null.
pub struct KaggleCleaner;

impl SourceCleaner for KaggleCleaner {
    fn source(&self) -> Source {
        Source::Kaggle
    }

    fn clean(&self, mut table: Table) -> Result<(Table, CleaningStats), PipelineError> {
        let mut stats = CleaningStats::new(self.source());
        stats.rows_input = table.len();

        table.dedup_full_rows();

        for column in ["job_title", "country", "location", "technologies"] {
            table.map_column(column, |v| v.map(rules::clean_text_encoding));
        }
        table.map_column("country", |v| Some(rules::normalize_country(v.unwrap_or(""))));

        if table.has_column("salary") {
            table.derive_column("salary_clean", |t, i| {
                t.cell(i, "salary")
                    .and_then(rules::clean_salary)
                    .map(|s| s.to_string())
            });
            table.retain_rows(|t, i| t.cell(i, "salary_clean").is_some());
        }

        table.derive_column("job_title_standard", |t, i| {
            Some(rules::harmonize_job_title(t.cell(i, "job_title").unwrap_or("")))
        });
        if table.has_column("technologies") {
            table.derive_column("technologies_clean", |t, i| {
                Some(rules::harmonize_technologies(t.cell(i, "technologies").unwrap_or("")))
            });
        }

        if table.has_column("experience_years") {
            table.map_column("experience_years", |v| {
                v.and_then(|s| s.trim().parse::<f64>().ok()).map(|y| y.to_string())
            });
            table.retain_rows(|t, i| {
                t.cell(i, "experience_years")
                    .and_then(|s| s.parse::<f64>().ok())
                    .is_some_and(|y| (0.0..=50.0).contains(&y))
            });
            table.derive_column("experience_level", |t, i| {
                let years = t
                    .cell(i, "experience_years")
                    .and_then(|s| s.parse::<f64>().ok())?;
                Some(rules::experience_level(years).to_string())
            });
        }

        stamp_cleaned_at(&mut table);
        stats.rows_output = table.len();
        stats.rows_dropped = stats.rows_input - stats.rows_output;
        Ok((table, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: Vec<Vec<Option<String>>>) -> Table {
        let mut t = Table::new(
            ["id", "job_title", "country", "salary", "experience_years", "technologies"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        for row in rows {
            t.push_row(row);
        }
        t
    }

    #[test]
    fn rows_without_plausible_salary_are_dropped() {
        let table = raw(vec![
            vec![
                Some("1".into()),
                Some("Data Engineer".into()),
                Some("Germany".into()),
                Some("72000".into()),
                Some("4".into()),
                Some("python;sql".into()),
            ],
            vec![
                Some("2".into()),
                Some("Data Engineer".into()),
                Some("Germany".into()),
                Some("999".into()),
                Some("4".into()),
                None,
            ],
            vec![
                Some("3".into()),
                Some("Data Engineer".into()),
                Some("Germany".into()),
                None,
                Some("4".into()),
                None,
            ],
        ]);
        let (cleaned, stats) = KaggleCleaner.clean(table).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.cell(0, "salary_clean"), Some("72000"));
        assert_eq!(stats.rows_dropped, 2);
    }

    #[test]
    fn experience_is_bounded_and_bucketed() {
        let table = raw(vec![
            vec![
                Some("1".into()),
                Some("Backend Developer".into()),
                Some("france".into()),
                Some("60000".into()),
                Some("7".into()),
                Some("Python, JavaScript".into()),
            ],
            vec![
                Some("2".into()),
                Some("Backend Developer".into()),
                Some("france".into()),
                Some("60000".into()),
                Some("99".into()),
                None,
            ],
        ]);
        let (cleaned, _) = KaggleCleaner.clean(table).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.cell(0, "experience_level"), Some("senior"));
        assert_eq!(cleaned.cell(0, "country"), Some("FR"));
        assert_eq!(cleaned.cell(0, "job_title_standard"), Some("backend-developer"));
        assert_eq!(cleaned.cell(0, "technologies_clean"), Some("java;javascript;python"));
    }
}
