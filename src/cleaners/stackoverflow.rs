use crate::cleaners::{CleaningStats, Source, SourceCleaner, stamp_cleaned_at};
use crate::error::PipelineError;
use crate::rules;
use crate::table::Table;

/// StackOverflow developer survey respondents. Survey columns keep their
/// original names; derived `*_clean`/`*_standard` columns sit alongside so
/// the loader mapping can pick either.
pub struct StackOverflowCleaner;

const SALARY_COLUMNS: &[&str] = &["ConvertedCompYearly", "CompTotal", "salary"];
const LANGUAGE_COLUMNS: &[&str] = &[
    "LanguageHaveWorkedWith",
    "LanguageWantToWorkWith",
    "technologies",
];
const EXPERIENCE_COLUMNS: &[&str] = &["YearsCodePro", "YearsCode", "experience_years"];

impl SourceCleaner for StackOverflowCleaner {
    fn source(&self) -> Source {
        Source::StackOverflow
    }

    fn clean(&self, mut table: Table) -> Result<(Table, CleaningStats), PipelineError> {
        let mut stats = CleaningStats::new(self.source());
        stats.rows_input = table.len();

        table.dedup_by_key(&["ResponseId"]);

        table.map_column("Country", |v| Some(rules::normalize_country(v.unwrap_or(""))));

        for column in SALARY_COLUMNS {
            if table.has_column(column) {
                let derived = format!("{column}_clean");
                let source_col = column.to_string();
                table.derive_column(&derived, move |t, i| {
                    t.cell(i, &source_col)
                        .and_then(rules::clean_salary)
                        .map(|s| s.to_string())
                });
            }
        }

        if table.has_column("DevType") {
            table.derive_column("DevType_standard", |t, i| {
                Some(rules::harmonize_job_title(t.cell(i, "DevType").unwrap_or("")))
            });
        }

        for column in LANGUAGE_COLUMNS {
            if table.has_column(column) {
                let derived = format!("{column}_clean");
                let source_col = column.to_string();
                table.derive_column(&derived, move |t, i| {
                    Some(rules::harmonize_technologies(t.cell(i, &source_col).unwrap_or("")))
                });
            }
        }

        if table.has_column("Age") {
            table.map_column("Age", |v| {
                v.and_then(|s| s.trim().parse::<f64>().ok()).map(|a| a.to_string())
            });
            table.retain_rows(|t, i| {
                t.cell(i, "Age")
                    .and_then(|s| s.parse::<f64>().ok())
                    .is_some_and(|a| (16.0..=80.0).contains(&a))
            });
        }

        for column in EXPERIENCE_COLUMNS {
            if table.has_column(column) {
                let col = column.to_string();
                table.map_column(column, |v| {
                    v.and_then(|s| s.trim().parse::<f64>().ok()).map(|y| y.to_string())
                });
                table.retain_rows(move |t, i| {
                    t.cell(i, &col)
                        .and_then(|s| s.parse::<f64>().ok())
                        .is_some_and(|y| (0.0..=50.0).contains(&y))
                });
            }
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
            [
                "ResponseId",
                "DevType",
                "LanguageHaveWorkedWith",
                "ConvertedCompYearly",
                "Age",
                "YearsCodePro",
                "Country",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        );
        for row in rows {
            t.push_row(row);
        }
        t
    }

    fn respondent(id: &str, age: &str, years: &str) -> Vec<Option<String>> {
        vec![
            Some(id.into()),
            Some("Developer, back-end".into()),
            Some("Rust;Python;TypeScript".into()),
            Some("85000".into()),
            Some(age.into()),
            Some(years.into()),
            Some("Netherlands".into()),
        ]
    }

    #[test]
    fn survey_columns_get_derived_counterparts() {
        let (cleaned, _) = StackOverflowCleaner
            .clean(raw(vec![respondent("1", "34", "8")]))
            .unwrap();
        assert_eq!(cleaned.cell(0, "Country"), Some("NL"));
        assert_eq!(cleaned.cell(0, "ConvertedCompYearly_clean"), Some("85000"));
        assert_eq!(cleaned.cell(0, "DevType_standard"), Some("backend-developer"));
        assert_eq!(
            cleaned.cell(0, "LanguageHaveWorkedWith_clean"),
            Some("python;rust;typescript")
        );
    }

    #[test]
    fn age_and_experience_bounds_drop_rows() {
        let table = raw(vec![
            respondent("1", "34", "8"),
            respondent("2", "12", "8"),
            respondent("3", "34", "60"),
            respondent("4", "34", "not numeric"),
        ]);
        let (cleaned, stats) = StackOverflowCleaner.clean(table).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(stats.rows_dropped, 3);
    }

    #[test]
    fn respondents_dedup_on_response_id() {
        let table = raw(vec![respondent("1", "34", "8"), respondent("1", "40", "9")]);
        let (cleaned, _) = StackOverflowCleaner.clean(table).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.cell(0, "Age"), Some("34"));
    }
}
