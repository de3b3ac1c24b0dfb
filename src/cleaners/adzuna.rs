use crate::cleaners::{CleaningStats, Source, SourceCleaner, check_expected_columns, stamp_cleaned_at};
use crate::error::PipelineError;
use crate::rules;
use crate::table::Table;

/// Adzuna job postings: the richest posting source, with salary bands and
/// HTML descriptions.
pub struct AdzunaCleaner;

const EXPECTED_COLUMNS: &[&str] = &[
    "title",
    "company",
    "location",
    "salary_min",
    "salary_max",
    "description",
    "contract_type",
    "created",
    "country",
    "source",
];

impl SourceCleaner for AdzunaCleaner {
    fn source(&self) -> Source {
        Source::Adzuna
    }

    fn clean(&self, mut table: Table) -> Result<(Table, CleaningStats), PipelineError> {
        let mut stats = CleaningStats::new(self.source());
        stats.rows_input = table.len();

        stats.issues.extend(check_expected_columns(&mut table, EXPECTED_COLUMNS));

        table.dedup_by_key(&["title", "company", "location"]);

        for column in ["title", "company", "location", "description", "contract_type"] {
            table.map_column(column, |v| v.map(rules::clean_text_encoding));
        }
        table.map_column("description", |v| v.map(rules::strip_html));
        table.map_column("country", |v| Some(rules::normalize_country(v.unwrap_or(""))));
        for column in ["salary_min", "salary_max"] {
            table.map_column(column, |v| {
                v.and_then(rules::clean_salary).map(|s| s.to_string())
            });
        }

        table.derive_column("job_title_standard", |t, i| {
            Some(rules::harmonize_job_title(t.cell(i, "title").unwrap_or("")))
        });
        table.derive_column("technologies", |t, i| {
            let techs = rules::extract_technologies(t.cell(i, "description").unwrap_or(""));
            Some(techs.into_iter().collect::<Vec<_>>().join(";"))
        });

        // Postings with neither a title nor a company are unusable.
        table.retain_rows(|t, i| {
            t.cell(i, "title").is_some_and(|v| !v.is_empty())
                || t.cell(i, "company").is_some_and(|v| !v.is_empty())
        });

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
            ["title", "company", "location", "description", "country", "salary_min"]
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
    fn duplicate_postings_keep_first_description() {
        let table = raw(vec![
            vec![
                Some("Dev".into()),
                Some("Acme".into()),
                Some("Paris".into()),
                Some("first description with python".into()),
                Some("France".into()),
                None,
            ],
            vec![
                Some("Dev".into()),
                Some("Acme".into()),
                Some("Paris".into()),
                Some("second description with rust".into()),
                Some("France".into()),
                None,
            ],
        ]);
        let (cleaned, stats) = AdzunaCleaner.clean(table).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert!(cleaned.cell(0, "description").unwrap().contains("first"));
        assert_eq!(stats.rows_dropped, 1);
        assert!((stats.drop_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn country_salary_and_title_are_normalized() {
        let table = raw(vec![vec![
            Some("Machine Learning Engineer".into()),
            Some("Acme".into()),
            Some("Paris".into()),
            Some("<p>We use Python and AWS</p>".into()),
            Some("france".into()),
            Some("55000".into()),
        ]]);
        let (cleaned, _) = AdzunaCleaner.clean(table).unwrap();
        assert_eq!(cleaned.cell(0, "country"), Some("FR"));
        assert_eq!(cleaned.cell(0, "salary_min"), Some("55000"));
        assert_eq!(cleaned.cell(0, "job_title_standard"), Some("data-scientist"));
        let techs = cleaned.cell(0, "technologies").unwrap();
        assert!(techs.contains("python"));
        assert!(techs.contains("aws"));
        assert!(cleaned.cell(0, "cleaned_at").is_some());
    }

    #[test]
    fn missing_expected_columns_are_recorded_and_synthesized() {
        let mut t = Table::new(vec!["title".into(), "company".into()]);
        t.push_row(vec![Some("Dev".into()), Some("Acme".into())]);
        let (cleaned, stats) = AdzunaCleaner.clean(t).unwrap();
        assert!(stats.issues[0].contains("missing expected columns"));
        assert!(cleaned.has_column("salary_max"));
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let (cleaned, stats) = AdzunaCleaner.clean(Table::default()).unwrap();
        assert!(cleaned.is_empty());
        assert_eq!(stats.drop_rate(), 0.0);
    }
}
