use crate::cleaners::{CleaningStats, Source, SourceCleaner, stamp_cleaned_at};
use crate::error::PipelineError;
use crate::rules;
use crate::table::Table;

/// Indeed RSS postings: salaries arrive as free text ("45k€", "€52000"),
/// so numeric extraction runs over the raw salary string.
pub struct IndeedCleaner;

impl SourceCleaner for IndeedCleaner {
    fn source(&self) -> Source {
        Source::Indeed
    }

    fn clean(&self, mut table: Table) -> Result<(Table, CleaningStats), PipelineError> {
        let mut stats = CleaningStats::new(self.source());
        stats.rows_input = table.len();

        table.dedup_by_key(&["title", "company"]);

        for column in ["title", "company", "location", "description", "salary"] {
            table.map_column(column, |v| v.map(rules::clean_text_encoding));
        }
        table.map_column("description", |v| v.map(rules::strip_html));
        table.map_column("country", |v| Some(rules::normalize_country(v.unwrap_or(""))));

        table.derive_column("job_title_standard", |t, i| {
            Some(rules::harmonize_job_title(t.cell(i, "title").unwrap_or("")))
        });
        table.derive_column("technologies", |t, i| {
            let techs = rules::extract_technologies(t.cell(i, "description").unwrap_or(""));
            Some(techs.into_iter().collect::<Vec<_>>().join(";"))
        });

        if table.has_column("salary") {
            table.derive_column("salary_clean", |t, i| {
                t.cell(i, "salary")
                    .and_then(rules::extract_salary_from_text)
                    .map(|s| s.to_string())
            });
        }

        // Published dates: invalid values become null, rows stay.
        table.map_column("published", |v| {
            v.and_then(|s| {
                chrono::DateTime::parse_from_rfc2822(s.trim())
                    .map(|dt| dt.to_rfc3339())
                    .or_else(|_| {
                        chrono::DateTime::parse_from_rfc3339(s.trim()).map(|dt| dt.to_rfc3339())
                    })
                    .ok()
            })
        });

        table.retain_rows(|t, i| t.cell(i, "title").is_some_and(|v| !v.is_empty()));

        stamp_cleaned_at(&mut table);
        stats.rows_output = table.len();
        stats.rows_dropped = stats.rows_input - stats.rows_output;
        Ok((table, stats))
    }
}
