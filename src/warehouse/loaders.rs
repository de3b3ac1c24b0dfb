//! Fact loaders: map cleaned tables onto warehouse fact tables through
//! static column-mapping tables, coerce types error-tolerantly, and
//! bulk-insert in fixed-size batches. Every table load produces a
//! `LoadingStats`; insert failures mark the whole table as errored
//! instead of leaving it partially counted.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, QueryBuilder};

use crate::cleaners::Source;
use crate::cleaners::runner::clean_file_path;
use crate::config::Config;
use crate::error::PipelineError;
use crate::table::Table;

const INSERT_BATCH_SIZE: usize = 500;

/// Loading statistics for one fact table, scoped to a single run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoadingStats {
    pub table_name: String,
    pub total_rows: usize,
    pub inserted_rows: usize,
    pub updated_rows: usize,
    pub skipped_rows: usize,
    pub error_rows: usize,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl LoadingStats {
    pub fn new(table_name: &str) -> Self {
        Self {
            table_name: table_name.to_string(),
            total_rows: 0,
            inserted_rows: 0,
            updated_rows: 0,
            skipped_rows: 0,
            error_rows: 0,
            start_time: None,
            end_time: None,
        }
    }

    pub fn start(&mut self) {
        self.start_time = Some(Utc::now());
    }

    pub fn end(&mut self) {
        self.end_time = Some(Utc::now());
    }

    /// Wall-clock duration in seconds, when both timestamps are set.
    pub fn duration(&self) -> Option<f64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                Some((end - start).num_milliseconds() as f64 / 1000.0)
            }
            _ => None,
        }
    }

    /// Percentage of rows written; 0.0 when there was nothing to load.
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            return 0.0;
        }
        (self.inserted_rows + self.updated_rows) as f64 / self.total_rows as f64 * 100.0
    }
}

impl std::fmt::Display for LoadingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let duration = self
            .duration()
            .map(|d| format!("{d:.2}s"))
            .unwrap_or_else(|| "N/A".to_string());
        write!(
            f,
            "Table {}: {}/{} inserted ({:.1}%) in {duration}",
            self.table_name,
            self.inserted_rows,
            self.total_rows,
            self.success_rate()
        )
    }
}

/// Outcome of one table load attempt.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TableLoad {
    pub source: String,
    pub stats: LoadingStats,
    /// The cleaned input file did not exist; distinguished from a present
    /// but empty file in the run report.
    pub missing_input: bool,
}

/// Target column types for error-tolerant coercion; invalid values become
/// NULL at this stage, never row drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColType {
    Text,
    Float,
    Int,
    BigInt,
    Date,
    Timestamp,
}

/// One fact-table load: which cleaned file feeds which table, how cleaned
/// columns rename onto fact columns, and what absent columns default to.
struct FactMapping {
    source: Source,
    table: &'static str,
    /// (cleaned column, fact column, fact column type)
    columns: &'static [(&'static str, &'static str, ColType)],
    /// Fact columns filled with a fixed value when the mapping leaves them
    /// unset. `None` keeps them NULL but present for the insert.
    defaults: &'static [(&'static str, Option<&'static str>, ColType)],
    /// Facts without a natural id get `<source>-<row index>`.
    synthesize_id: bool,
}

const ADZUNA_JOBS: FactMapping = FactMapping {
    source: Source::Adzuna,
    table: "jobs",
    columns: &[
        ("id", "id", ColType::Text),
        ("title", "title", ColType::Text),
        ("company", "company", ColType::Text),
        ("location", "location", ColType::Text),
        ("country", "country", ColType::Text),
        ("salary_min", "salary_min", ColType::Float),
        ("salary_max", "salary_max", ColType::Float),
        ("description", "description", ColType::Text),
        ("technologies", "technologies", ColType::Text),
        ("contract_type", "contract_type", ColType::Text),
        ("created", "extracted_at", ColType::Timestamp),
        ("cleaned_at", "cleaned_at", ColType::Timestamp),
    ],
    defaults: &[],
    synthesize_id: true,
};

const REMOTEOK_JOBS: FactMapping = FactMapping {
    source: Source::RemoteOk,
    table: "jobs",
    columns: &[
        ("id", "id", ColType::Text),
        ("position", "title", ColType::Text),
        ("company", "company", ColType::Text),
        ("location", "location", ColType::Text),
        ("description", "description", ColType::Text),
        ("tags", "technologies", ColType::Text),
        ("cleaned_at", "cleaned_at", ColType::Timestamp),
    ],
    defaults: &[
        ("country", Some("WW"), ColType::Text),
        ("contract_type", Some("remote"), ColType::Text),
        ("salary_min", None, ColType::Float),
        ("salary_max", None, ColType::Float),
        ("extracted_at", None, ColType::Timestamp),
    ],
    synthesize_id: true,
};

const GITHUB_REPOS: FactMapping = FactMapping {
    source: Source::Github,
    table: "github_repos",
    columns: &[
        ("id", "repo_id", ColType::BigInt),
        ("full_name", "repo_name", ColType::Text),
        ("description", "description", ColType::Text),
        ("language", "language", ColType::Text),
        ("stargazers_count", "stars", ColType::Int),
        ("forks_count", "forks", ColType::Int),
        ("created_at", "created_at", ColType::Timestamp),
        ("cleaned_at", "cleaned_at", ColType::Timestamp),
    ],
    defaults: &[],
    synthesize_id: false,
};

const GOOGLE_TRENDS: FactMapping = FactMapping {
    source: Source::GoogleTrends,
    table: "google_trends",
    columns: &[
        ("keyword", "keyword", ColType::Text),
        ("date", "date", ColType::Date),
        ("interest", "interest_score", ColType::Int),
        ("geo", "country", ColType::Text),
        ("cleaned_at", "cleaned_at", ColType::Timestamp),
    ],
    defaults: &[],
    synthesize_id: false,
};

const STACKOVERFLOW_DEVELOPERS: FactMapping = FactMapping {
    source: Source::StackOverflow,
    table: "developers",
    columns: &[
        ("ResponseId", "respondent_id", ColType::Int),
        ("DevType", "job_title", ColType::Text),
        ("LanguageHaveWorkedWith", "technologies", ColType::Text),
        ("YearsCodePro", "years_coding_pro", ColType::Text),
        ("ConvertedCompYearly", "salary", ColType::Float),
        ("Employment", "employment", ColType::Text),
        ("OrgSize", "org_size", ColType::Text),
        ("RemoteWork", "remote_work", ColType::Text),
        ("Country", "country", ColType::Text),
        ("cleaned_at", "cleaned_at", ColType::Timestamp),
    ],
    defaults: &[],
    synthesize_id: false,
};

const KAGGLE_DATASETS: FactMapping = FactMapping {
    source: Source::Kaggle,
    table: "kaggle_datasets",
    columns: &[
        ("id", "id", ColType::Int),
        ("job_title", "job_title", ColType::Text),
        ("salary", "salary", ColType::Float),
        ("experience_years", "experience_years", ColType::Int),
        ("location", "location", ColType::Text),
        ("technologies", "technologies", ColType::Text),
        ("dataset_source", "dataset_source", ColType::Text),
        ("cleaned_at", "cleaned_at", ColType::Timestamp),
    ],
    defaults: &[("experience_years", Some("0"), ColType::Int)],
    synthesize_id: true,
};

const ALL_MAPPINGS: &[&FactMapping] = &[
    &ADZUNA_JOBS,
    &REMOTEOK_JOBS,
    &GITHUB_REPOS,
    &GOOGLE_TRENDS,
    &STACKOVERFLOW_DEVELOPERS,
    &KAGGLE_DATASETS,
];

/// A typed cell ready for binding.
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Null,
    Text(String),
    Float(f64),
    Int(i32),
    BigInt(i64),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

fn coerce(cell: Option<&str>, ty: ColType) -> Value {
    let Some(raw) = cell else {
        return Value::Null;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Value::Null;
    }
    match ty {
        ColType::Text => Value::Text(raw.to_string()),
        ColType::Float => raw.parse::<f64>().map(Value::Float).unwrap_or(Value::Null),
        ColType::Int => raw
            .parse::<f64>()
            .map(|n| Value::Int(n as i32))
            .unwrap_or(Value::Null),
        ColType::BigInt => raw
            .parse::<f64>()
            .map(|n| Value::BigInt(n as i64))
            .unwrap_or(Value::Null),
        ColType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Value::Date)
            .unwrap_or(Value::Null),
        ColType::Timestamp => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Value::Timestamp(dt.with_timezone(&Utc)))
            .or_else(|_| {
                chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                    .map(|naive| Value::Timestamp(naive.and_utc()))
            })
            .unwrap_or(Value::Null),
    }
}

/// Project a cleaned table through a mapping: rename mapped columns that
/// exist, fill defaults, coerce everything to the fact column types, and
/// derive computed columns.
fn project(mapping: &FactMapping, cleaned: &Table) -> (Vec<&'static str>, Vec<ColType>, Vec<Vec<Value>>) {
    let mut fact_columns: Vec<&'static str> = Vec::new();
    let mut fact_types: Vec<ColType> = Vec::new();
    let mut cleaned_sources: Vec<Option<&'static str>> = Vec::new();

    for &(cleaned_col, fact_col, ty) in mapping.columns {
        if cleaned.has_column(cleaned_col) {
            fact_columns.push(fact_col);
            fact_types.push(ty);
            cleaned_sources.push(Some(cleaned_col));
        }
    }
    for &(fact_col, _, ty) in mapping.defaults {
        if !fact_columns.contains(&fact_col) {
            fact_columns.push(fact_col);
            fact_types.push(ty);
            cleaned_sources.push(None);
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(cleaned.len());
    for i in 0..cleaned.len() {
        let mut row: Vec<Value> = Vec::with_capacity(fact_columns.len());
        for (slot, source_col) in cleaned_sources.iter().enumerate() {
            let value = match source_col {
                Some(col) => coerce(cleaned.cell(i, col), fact_types[slot]),
                None => {
                    let default = mapping
                        .defaults
                        .iter()
                        .find(|(name, _, _)| name == &fact_columns[slot])
                        .and_then(|(_, v, _)| *v);
                    coerce(default, fact_types[slot])
                }
            };
            row.push(value);
        }
        rows.push(row);
    }

    // Synthetic primary keys for sources whose rows carry none.
    if mapping.synthesize_id {
        if let Some(id_slot) = fact_columns.iter().position(|c| *c == "id") {
            for (i, row) in rows.iter_mut().enumerate() {
                if row[id_slot] == Value::Null {
                    row[id_slot] = match fact_types[id_slot] {
                        ColType::Int => Value::Int(i as i32),
                        _ => Value::Text(format!("{}-{i}", mapping.source)),
                    };
                }
            }
        } else {
            // The id type comes from the mapping declaration, not a fixed
            // Text: kaggle_datasets.id is an INTEGER column.
            let id_type = mapping
                .columns
                .iter()
                .find(|&&(_, fact_col, _)| fact_col == "id")
                .map(|&(_, _, ty)| ty)
                .unwrap_or(ColType::Text);
            fact_columns.push("id");
            fact_types.push(id_type);
            for (i, row) in rows.iter_mut().enumerate() {
                row.push(match id_type {
                    ColType::Int => Value::Int(i as i32),
                    _ => Value::Text(format!("{}-{i}", mapping.source)),
                });
            }
        }
    }

    // Every fact row is tagged with its origin.
    fact_columns.push("source");
    fact_types.push(ColType::Text);
    for row in &mut rows {
        row.push(Value::Text(mapping.source.as_str().to_string()));
    }

    // Derived column: salary_avg when both band ends are present.
    if mapping.table == "jobs" {
        let min_slot = fact_columns.iter().position(|c| *c == "salary_min");
        let max_slot = fact_columns.iter().position(|c| *c == "salary_max");
        fact_columns.push("salary_avg");
        fact_types.push(ColType::Float);
        for row in &mut rows {
            let avg = match (min_slot, max_slot) {
                (Some(lo), Some(hi)) => match (&row[lo], &row[hi]) {
                    (Value::Float(lo), Value::Float(hi)) => Value::Float((lo + hi) / 2.0),
                    _ => Value::Null,
                },
                _ => Value::Null,
            };
            row.push(avg);
        }
    }

    (fact_columns, fact_types, rows)
}

pub struct FactLoader<'a> {
    pool: &'a PgPool,
    config: &'a Config,
}

impl<'a> FactLoader<'a> {
    pub fn new(pool: &'a PgPool, config: &'a Config) -> Self {
        Self { pool, config }
    }

    /// Load every fact table from the cleaned store. Per-table failures
    /// are recorded, never raised; the caller inspects the stats.
    pub async fn load_all(&self) -> Vec<TableLoad> {
        let mut loads = Vec::with_capacity(ALL_MAPPINGS.len());
        for mapping in ALL_MAPPINGS {
            let load = self.load_mapping(mapping).await;
            match &load.stats {
                s if load.missing_input => {
                    tracing::warn!("{}: no cleaned input file, skipped", s.table_name);
                }
                s if s.error_rows > 0 => {
                    tracing::error!("{}", s);
                }
                s => tracing::info!("{}", s),
            }
            loads.push(load);
        }
        loads
    }

    async fn load_mapping(&self, mapping: &FactMapping) -> TableLoad {
        let mut stats = LoadingStats::new(mapping.table);
        stats.start();

        let path = clean_file_path(&self.config.clean_dir, mapping.source);
        if !path.is_file() {
            tracing::warn!("Cleaned file not found: {}", path.display());
            stats.end();
            return TableLoad {
                source: mapping.source.as_str().to_string(),
                stats,
                missing_input: true,
            };
        }

        let cleaned = match Table::read_csv(&path) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!("Failed to read {}: {e}", path.display());
                stats.end();
                return TableLoad {
                    source: mapping.source.as_str().to_string(),
                    stats,
                    missing_input: true,
                };
            }
        };

        let (columns, types, mut rows) = project(mapping, &cleaned);
        stats.total_rows = rows.len();

        // Trend points are unique on (keyword, date, country); drop
        // within-batch duplicates before hitting the constraint.
        if mapping.table == "google_trends" {
            dedup_rows_on(&mut rows, &columns, &["keyword", "date", "country"]);
            stats.skipped_rows = stats.total_rows - rows.len();
        }

        match self.insert_batches(mapping, &columns, &types, &rows).await {
            Ok(inserted) => {
                stats.inserted_rows = inserted;
            }
            Err(e) => {
                tracing::error!("Insert into {} failed: {e}", mapping.table);
                stats.inserted_rows = 0;
                stats.error_rows = stats.total_rows;
            }
        }

        stats.end();
        TableLoad {
            source: mapping.source.as_str().to_string(),
            stats,
            missing_input: false,
        }
    }

    async fn insert_batches(
        &self,
        mapping: &FactMapping,
        columns: &[&'static str],
        types: &[ColType],
        rows: &[Vec<Value>],
    ) -> Result<usize, PipelineError> {
        if rows.is_empty() {
            return Ok(0);
        }
        let mut inserted = 0;
        for chunk in rows.chunks(INSERT_BATCH_SIZE) {
            let mut builder: QueryBuilder<sqlx::Postgres> = QueryBuilder::new(format!(
                "INSERT INTO {} ({}) ",
                mapping.table,
                columns.join(", ")
            ));
            builder.push_values(chunk, |mut b, row| {
                for (value, ty) in row.iter().zip(types) {
                    match value {
                        Value::Text(v) => {
                            b.push_bind(v.clone());
                        }
                        Value::Float(v) => {
                            b.push_bind(*v);
                        }
                        Value::Int(v) => {
                            b.push_bind(*v);
                        }
                        Value::BigInt(v) => {
                            b.push_bind(*v);
                        }
                        Value::Date(v) => {
                            b.push_bind(*v);
                        }
                        Value::Timestamp(v) => {
                            b.push_bind(*v);
                        }
                        Value::Null => match ty {
                            ColType::Text => {
                                b.push_bind(Option::<String>::None);
                            }
                            ColType::Float => {
                                b.push_bind(Option::<f64>::None);
                            }
                            ColType::Int => {
                                b.push_bind(Option::<i32>::None);
                            }
                            ColType::BigInt => {
                                b.push_bind(Option::<i64>::None);
                            }
                            ColType::Date => {
                                b.push_bind(Option::<NaiveDate>::None);
                            }
                            ColType::Timestamp => {
                                b.push_bind(Option::<DateTime<Utc>>::None);
                            }
                        },
                    }
                }
            });
            builder.build().execute(self.pool).await?;
            inserted += chunk.len();
        }
        Ok(inserted)
    }
}

fn dedup_rows_on(rows: &mut Vec<Vec<Value>>, columns: &[&'static str], key: &[&str]) {
    let indices: Vec<usize> = key
        .iter()
        .filter_map(|k| columns.iter().position(|c| c == k))
        .collect();
    if indices.is_empty() {
        return;
    }
    let mut seen = std::collections::HashSet::new();
    rows.retain(|row| {
        let fingerprint: Vec<String> = indices.iter().map(|&i| format!("{:?}", row[i])).collect();
        seen.insert(fingerprint)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_is_zero_on_empty_load() {
        let stats = LoadingStats::new("jobs");
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn success_rate_counts_inserted_and_updated() {
        let mut stats = LoadingStats::new("jobs");
        stats.total_rows = 10;
        stats.inserted_rows = 7;
        stats.updated_rows = 1;
        assert!((stats.success_rate() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn coercion_is_error_tolerant() {
        assert_eq!(coerce(Some("abc"), ColType::Float), Value::Null);
        assert_eq!(coerce(Some("12.5"), ColType::Float), Value::Float(12.5));
        assert_eq!(coerce(Some("42"), ColType::Int), Value::Int(42));
        assert_eq!(coerce(Some("42.0"), ColType::Int), Value::Int(42));
        assert_eq!(coerce(Some(""), ColType::Text), Value::Null);
        assert_eq!(coerce(None, ColType::Date), Value::Null);
        assert_eq!(
            coerce(Some("2024-02-01"), ColType::Date),
            Value::Date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
        );
        assert_eq!(coerce(Some("not a date"), ColType::Date), Value::Null);
    }

    #[test]
    fn projection_renames_defaults_and_derives_salary_avg() {
        let mut cleaned = Table::new(
            ["id", "position", "company", "tags", "cleaned_at"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        cleaned.push_row(vec![
            Some("r1".into()),
            Some("Dev".into()),
            Some("Acme".into()),
            Some("python".into()),
            Some("2024-01-01T00:00:00Z".into()),
        ]);

        let (columns, _, rows) = project(&REMOTEOK_JOBS, &cleaned);
        let col = |name: &str| columns.iter().position(|c| *c == name).unwrap();
        assert_eq!(rows[0][col("title")], Value::Text("Dev".into()));
        assert_eq!(rows[0][col("technologies")], Value::Text("python".into()));
        assert_eq!(rows[0][col("country")], Value::Text("WW".into()));
        assert_eq!(rows[0][col("contract_type")], Value::Text("remote".into()));
        assert_eq!(rows[0][col("salary_min")], Value::Null);
        assert_eq!(rows[0][col("salary_avg")], Value::Null);
    }

    #[test]
    fn salary_avg_derives_when_both_ends_present() {
        let mut cleaned = Table::new(
            ["id", "title", "salary_min", "salary_max"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        cleaned.push_row(vec![
            Some("a1".into()),
            Some("Dev".into()),
            Some("40000".into()),
            Some("60000".into()),
        ]);
        cleaned.push_row(vec![
            Some("a2".into()),
            Some("Dev".into()),
            Some("40000".into()),
            None,
        ]);

        let (columns, _, rows) = project(&ADZUNA_JOBS, &cleaned);
        let avg = columns.iter().position(|c| *c == "salary_avg").unwrap();
        assert_eq!(rows[0][avg], Value::Float(50_000.0));
        assert_eq!(rows[1][avg], Value::Null);
    }

    #[test]
    fn missing_ids_are_synthesized_per_source() {
        let mut cleaned = Table::new(
            ["title", "company"].iter().map(|s| s.to_string()).collect(),
        );
        cleaned.push_row(vec![Some("Dev".into()), Some("Acme".into())]);
        cleaned.push_row(vec![Some("QA".into()), Some("Acme".into())]);

        let (columns, _, rows) = project(&ADZUNA_JOBS, &cleaned);
        let id = columns.iter().position(|c| *c == "id").unwrap();
        assert_eq!(rows[0][id], Value::Text("adzuna-0".into()));
        assert_eq!(rows[1][id], Value::Text("adzuna-1".into()));
    }

    #[test]
    fn synthesized_ids_follow_the_declared_column_type() {
        // kaggle_datasets.id is an INTEGER column, so a cleaned file
        // without ids must get integer surrogates, not "<source>-<i>".
        let mut cleaned = Table::new(
            ["job_title", "salary"].iter().map(|s| s.to_string()).collect(),
        );
        cleaned.push_row(vec![Some("Dev".into()), Some("60000".into())]);
        cleaned.push_row(vec![Some("QA".into()), Some("55000".into())]);

        let (columns, types, rows) = project(&KAGGLE_DATASETS, &cleaned);
        let id = columns.iter().position(|c| *c == "id").unwrap();
        assert_eq!(types[id], ColType::Int);
        assert_eq!(rows[0][id], Value::Int(0));
        assert_eq!(rows[1][id], Value::Int(1));
    }

    #[tokio::test]
    async fn empty_cleaned_file_loads_zero_rows_without_error() {
        let dir = tempfile::tempdir().unwrap();
        let clean_dir = dir.path().to_path_buf();
        let header_only = Table::new(
            ["id", "job_title", "salary"].iter().map(|s| s.to_string()).collect(),
        );
        header_only
            .write_csv(&clean_dir.join("kaggle_clean.csv"))
            .unwrap();

        let config = Config {
            database_url: "postgres://localhost/unused".into(),
            raw_dir: clean_dir.clone(),
            clean_dir: clean_dir.clone(),
            command: None,
        };
        // Lazy pool: never connects because zero rows short-circuit the insert.
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let loader = FactLoader::new(&pool, &config);

        let load = loader.load_mapping(&KAGGLE_DATASETS).await;
        assert!(!load.missing_input);
        assert_eq!(load.stats.total_rows, 0);
        assert_eq!(load.stats.error_rows, 0);
        assert_eq!(load.stats.success_rate(), 0.0);

        let missing = loader.load_mapping(&ADZUNA_JOBS).await;
        assert!(missing.missing_input);
        assert_eq!(missing.stats.total_rows, 0);
    }

    #[test]
    fn trend_rows_dedup_within_batch() {
        let mut rows = vec![
            vec![
                Value::Text("rust".into()),
                Value::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
                Value::Int(50),
                Value::Text("US".into()),
            ],
            vec![
                Value::Text("rust".into()),
                Value::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
                Value::Int(60),
                Value::Text("US".into()),
            ],
        ];
        let columns: Vec<&'static str> = vec!["keyword", "date", "interest_score", "country"];
        dedup_rows_on(&mut rows, &columns, &["keyword", "date", "country"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][2], Value::Int(50));
    }
}
