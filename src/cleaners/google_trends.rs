use chrono::NaiveDate;

use crate::cleaners::{CleaningStats, Source, SourceCleaner, stamp_cleaned_at};
use crate::error::PipelineError;
use crate::rules;
use crate::table::Table;

/// Google Trends time series: interest points keyed by (keyword, date, geo).
/// Rows with no geo are filled from the keyword-country heuristic before
/// normalization so the heuristic actually gets a chance to fire.
pub struct GoogleTrendsCleaner;

fn coerce_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

impl SourceCleaner for GoogleTrendsCleaner {
    fn source(&self) -> Source {
        Source::GoogleTrends
    }

    fn clean(&self, mut table: Table) -> Result<(Table, CleaningStats), PipelineError> {
        let mut stats = CleaningStats::new(self.source());
        stats.rows_input = table.len();

        table.dedup_by_key(&["keyword", "date", "geo"]);

        table.map_column("keyword", |v| {
            v.map(|s| rules::clean_text_encoding(s).to_lowercase())
        });

        if table.has_column("interest") {
            table.map_column("interest", |v| {
                v.and_then(|s| s.trim().parse::<f64>().ok())
                    .map(|n| (n as i64).to_string())
            });
            table.retain_rows(|t, i| {
                t.cell(i, "interest")
                    .and_then(|s| s.parse::<i64>().ok())
                    .is_some_and(|n| (0..=100).contains(&n))
            });
        }

        // Fill missing geos from the keyword heuristic, then normalize the rest.
        if table.has_column("geo") {
            table.derive_column("geo", |t, i| {
                let geo = t.cell(i, "geo").unwrap_or("").trim();
                if geo.is_empty() {
                    let keyword = t.cell(i, "keyword").unwrap_or("");
                    Some(
                        rules::keyword_country_hint(keyword)
                            .unwrap_or("Global")
                            .to_string(),
                    )
                } else {
                    Some(rules::normalize_country(geo))
                }
            });
        }

        if table.has_column("date") {
            table.map_column("date", |v| {
                v.and_then(coerce_date).map(|d| d.format("%Y-%m-%d").to_string())
            });
            table.retain_rows(|t, i| t.cell(i, "date").is_some());
        }

        table.derive_column("tech_category", |t, i| {
            Some(rules::categorize_technology(t.cell(i, "keyword").unwrap_or("")).to_string())
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
            ["keyword", "date", "interest", "geo"]
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
    fn empty_geo_is_filled_from_keyword_heuristic() {
        let table = raw(vec![
            vec![
                Some("python".into()),
                Some("2024-03-01".into()),
                Some("88".into()),
                Some("".into()),
            ],
            vec![
                Some("cobol".into()),
                Some("2024-03-01".into()),
                Some("12".into()),
                None,
            ],
            vec![
                Some("vue".into()),
                Some("2024-03-01".into()),
                Some("40".into()),
                Some("france".into()),
            ],
        ]);
        let (cleaned, _) = GoogleTrendsCleaner.clean(table).unwrap();
        assert_eq!(cleaned.cell(0, "geo"), Some("US"));
        assert_eq!(cleaned.cell(1, "geo"), Some("Global"));
        assert_eq!(cleaned.cell(2, "geo"), Some("FR"));
    }

    #[test]
    fn out_of_range_interest_and_bad_dates_drop() {
        let table = raw(vec![
            vec![
                Some("rust".into()),
                Some("2024-01-15".into()),
                Some("70".into()),
                Some("US".into()),
            ],
            vec![
                Some("rust".into()),
                Some("2024-01-16".into()),
                Some("150".into()),
                Some("US".into()),
            ],
            vec![
                Some("rust".into()),
                Some("not a date".into()),
                Some("70".into()),
                Some("US".into()),
            ],
        ]);
        let (cleaned, stats) = GoogleTrendsCleaner.clean(table).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(stats.rows_dropped, 2);
        assert_eq!(cleaned.cell(0, "tech_category"), Some("languages"));
    }

    #[test]
    fn trend_points_dedup_on_keyword_date_geo() {
        let table = raw(vec![
            vec![
                Some("go".into()),
                Some("2024-01-01".into()),
                Some("10".into()),
                Some("US".into()),
            ],
            vec![
                Some("go".into()),
                Some("2024-01-01".into()),
                Some("99".into()),
                Some("US".into()),
            ],
        ]);
        let (cleaned, _) = GoogleTrendsCleaner.clean(table).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.cell(0, "interest"), Some("10"));
    }
}
