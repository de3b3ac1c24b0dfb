use crate::cleaners::{CleaningStats, Source, SourceCleaner, stamp_cleaned_at};
use crate::error::PipelineError;
use crate::rules;
use crate::table::Table;

/// RemoteOK postings: every listing is remote, so the whole source gets
/// the worldwide country sentinel.
pub struct RemoteOkCleaner;

impl SourceCleaner for RemoteOkCleaner {
    fn source(&self) -> Source {
        Source::RemoteOk
    }

    fn clean(&self, mut table: Table) -> Result<(Table, CleaningStats), PipelineError> {
        let mut stats = CleaningStats::new(self.source());
        stats.rows_input = table.len();

        if table.has_column("id") {
            table.dedup_by_key(&["id"]);
        } else {
            table.dedup_by_key(&["position", "company"]);
        }

        for column in ["position", "company", "location", "description", "tags"] {
            table.map_column(column, |v| v.map(rules::clean_text_encoding));
        }

        table.derive_column("job_title_standard", |t, i| {
            Some(rules::harmonize_job_title(t.cell(i, "position").unwrap_or("")))
        });

        table.derive_column("technologies", |t, i| {
            let text = format!(
                "{} {}",
                t.cell(i, "tags").unwrap_or(""),
                t.cell(i, "description").unwrap_or("")
            );
            let techs = rules::extract_technologies(&text);
            Some(techs.into_iter().collect::<Vec<_>>().join(";"))
        });

        if table.has_column("salary") {
            table.derive_column("salary_clean", |t, i| {
                t.cell(i, "salary")
                    .and_then(rules::clean_salary)
                    .map(|s| s.to_string())
            });
        }

        table.fill_column("work_type", "remote");
        table.fill_column("country", "WW");

        stamp_cleaned_at(&mut table);
        stats.rows_output = table.len();
        stats.rows_dropped = stats.rows_input - stats.rows_output;
        Ok((table, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_is_tagged_worldwide_remote() {
        let mut t = Table::new(
            ["id", "position", "company", "tags", "description"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        t.push_row(vec![
            Some("r1".into()),
            Some("Backend Engineer".into()),
            Some("Acme".into()),
            Some("python, django".into()),
            Some("APIs at scale".into()),
        ]);
        let (cleaned, _) = RemoteOkCleaner.clean(t).unwrap();
        assert_eq!(cleaned.cell(0, "country"), Some("WW"));
        assert_eq!(cleaned.cell(0, "work_type"), Some("remote"));
        assert_eq!(cleaned.cell(0, "job_title_standard"), Some("backend-developer"));
        let techs = cleaned.cell(0, "technologies").unwrap();
        assert!(techs.contains("python"));
        assert!(techs.contains("django"));
    }

    #[test]
    fn dedup_falls_back_to_position_company_without_ids() {
        let mut t = Table::new(
            ["position", "company"].iter().map(|s| s.to_string()).collect(),
        );
        t.push_row(vec![Some("Dev".into()), Some("Acme".into())]);
        t.push_row(vec![Some("Dev".into()), Some("Acme".into())]);
        t.push_row(vec![Some("Dev".into()), Some("Globex".into())]);
        let (cleaned, stats) = RemoteOkCleaner.clean(t).unwrap();
        assert_eq!(cleaned.len(), 2);
        assert_eq!(stats.rows_dropped, 1);
    }
}
