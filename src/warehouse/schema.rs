//! Star-schema management. `create_schema` is deliberately destructive:
//! every run drops and recreates the fact tables, dimensions, and the
//! consolidated jobs view. Referential links between facts and dimensions
//! are by value (ISO2 codes, company names, technology labels), not by
//! enforced foreign keys, so facts can load before dimensions exist.

use sqlx::PgPool;

use crate::error::PipelineError;

const SCHEMA_SQL: &str = r#"
DROP VIEW IF EXISTS v_jobs_consolidated;
DROP TABLE IF EXISTS jobs CASCADE;
DROP TABLE IF EXISTS github_repos CASCADE;
DROP TABLE IF EXISTS google_trends CASCADE;
DROP TABLE IF EXISTS developers CASCADE;
DROP TABLE IF EXISTS kaggle_datasets CASCADE;
DROP TABLE IF EXISTS d_date CASCADE;
DROP TABLE IF EXISTS d_country CASCADE;
DROP TABLE IF EXISTS d_company CASCADE;
DROP TABLE IF EXISTS d_skill CASCADE;
DROP TABLE IF EXISTS d_source CASCADE;

CREATE TABLE d_date (
    date_key      DATE PRIMARY KEY,
    day           SMALLINT,
    month         SMALLINT,
    quarter       SMALLINT,
    year          SMALLINT,
    day_week      SMALLINT
);

CREATE TABLE d_country (
    id_country       SERIAL PRIMARY KEY,
    iso2             CHAR(2)  UNIQUE NOT NULL,
    country_name     TEXT,
    region           TEXT,
    currency_iso3    CHAR(3)
);

CREATE TABLE d_company (
    id_company        BIGSERIAL PRIMARY KEY,
    company_name      TEXT UNIQUE NOT NULL,
    workforce_size    TEXT,
    sector            TEXT
);

CREATE TABLE d_skill (
    id_skill          SERIAL PRIMARY KEY,
    skill_group       TEXT,
    tech_label        TEXT UNIQUE NOT NULL
);

CREATE TABLE d_source (
    id_source         SMALLSERIAL PRIMARY KEY,
    source_name       TEXT UNIQUE NOT NULL
);

CREATE TABLE jobs (
    id VARCHAR(100) PRIMARY KEY,
    title VARCHAR(500) NOT NULL,
    company VARCHAR(300),
    location VARCHAR(300),
    country VARCHAR(10),
    salary_min NUMERIC(12,2),
    salary_max NUMERIC(12,2),
    salary_avg NUMERIC(12,2),
    salary VARCHAR(100),
    description TEXT,
    technologies TEXT,
    contract_type VARCHAR(100),
    source VARCHAR(50) NOT NULL,
    extracted_at TIMESTAMPTZ,
    cleaned_at TIMESTAMPTZ,
    loaded_at TIMESTAMPTZ DEFAULT NOW()
);

CREATE TABLE github_repos (
    repo_id BIGINT PRIMARY KEY,
    repo_name VARCHAR(500) NOT NULL,
    description TEXT,
    language VARCHAR(100),
    stars INTEGER DEFAULT 0,
    forks INTEGER DEFAULT 0,
    created_at TIMESTAMPTZ,
    source VARCHAR(50) DEFAULT 'github',
    cleaned_at TIMESTAMPTZ,
    loaded_at TIMESTAMPTZ DEFAULT NOW()
);

CREATE TABLE google_trends (
    id SERIAL PRIMARY KEY,
    keyword VARCHAR(200) NOT NULL,
    date DATE NOT NULL,
    interest_score INTEGER CHECK (interest_score >= 0 AND interest_score <= 100),
    country VARCHAR(10),
    source VARCHAR(50) DEFAULT 'google_trends',
    cleaned_at TIMESTAMPTZ,
    loaded_at TIMESTAMPTZ DEFAULT NOW(),
    UNIQUE(keyword, date, country)
);

CREATE TABLE developers (
    respondent_id INTEGER PRIMARY KEY,
    job_title VARCHAR(300),
    technologies TEXT,
    years_coding_pro VARCHAR(50),
    salary NUMERIC(12,2),
    employment VARCHAR(100),
    org_size VARCHAR(100),
    remote_work VARCHAR(50),
    country VARCHAR(100),
    source VARCHAR(50) DEFAULT 'stackoverflow',
    cleaned_at TIMESTAMPTZ,
    loaded_at TIMESTAMPTZ DEFAULT NOW()
);

CREATE TABLE kaggle_datasets (
    id INTEGER PRIMARY KEY,
    job_title VARCHAR(300),
    salary NUMERIC(12,2),
    experience_years INTEGER,
    location VARCHAR(300),
    technologies TEXT,
    dataset_source VARCHAR(500),
    source VARCHAR(50) DEFAULT 'kaggle',
    cleaned_at TIMESTAMPTZ,
    loaded_at TIMESTAMPTZ DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_jobs_source ON jobs(source);
CREATE INDEX IF NOT EXISTS idx_jobs_country ON jobs(country);
CREATE INDEX IF NOT EXISTS idx_jobs_title ON jobs(title);
CREATE INDEX IF NOT EXISTS idx_github_language ON github_repos(language);
CREATE INDEX IF NOT EXISTS idx_github_stars ON github_repos(stars);
CREATE INDEX IF NOT EXISTS idx_trends_keyword ON google_trends(keyword);
CREATE INDEX IF NOT EXISTS idx_trends_date ON google_trends(date);
CREATE INDEX IF NOT EXISTS idx_trends_country ON google_trends(country);
CREATE INDEX IF NOT EXISTS idx_developers_title ON developers(job_title);
CREATE INDEX IF NOT EXISTS idx_developers_country ON developers(country);
CREATE INDEX IF NOT EXISTS idx_kaggle_title ON kaggle_datasets(job_title);

CREATE OR REPLACE VIEW v_jobs_consolidated AS
SELECT
    'job_' || ROW_NUMBER() OVER (ORDER BY source, id) as unified_id,
    id as source_id,
    title,
    company,
    location,
    country,
    COALESCE(salary_avg, (salary_min + salary_max) / 2) as estimated_salary,
    technologies,
    source,
    loaded_at
FROM jobs
WHERE title IS NOT NULL AND title != '';
"#;

/// Drop and recreate the whole star schema. Failure is fatal: no facts can
/// load into a half-built schema.
pub async fn create_schema(pool: &PgPool) -> Result<(), PipelineError> {
    tracing::info!("Rebuilding warehouse schema (drop and recreate)");
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await
        .map_err(|e| PipelineError::Schema(e.to_string()))?;
    tracing::info!("Warehouse schema created");
    Ok(())
}
