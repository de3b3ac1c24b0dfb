//! Dimension population. Runs after the fact loads so derived dimensions
//! (companies, skills) can read the freshly loaded facts. Every statement
//! uses ON CONFLICT DO NOTHING against the dimension's natural key, so
//! re-running the populator yields identical row counts.

use sqlx::PgPool;

use crate::error::PipelineError;
use crate::rules;

const SOURCE_NAMES: [&str; 7] = [
    "adzuna",
    "github",
    "kaggle",
    "google_trends",
    "stackoverflow",
    "remoteok",
    "indeed",
];

/// (iso2, name, region, currency)
const COUNTRY_SEED: [(&str, &str, &str, &str); 20] = [
    ("FR", "France", "Europe", "EUR"),
    ("DE", "Germany", "Europe", "EUR"),
    ("GB", "United Kingdom", "Europe", "GBP"),
    ("ES", "Spain", "Europe", "EUR"),
    ("IT", "Italy", "Europe", "EUR"),
    ("NL", "Netherlands", "Europe", "EUR"),
    ("BE", "Belgium", "Europe", "EUR"),
    ("CH", "Switzerland", "Europe", "CHF"),
    ("PT", "Portugal", "Europe", "EUR"),
    ("PL", "Poland", "Europe", "PLN"),
    ("US", "United States", "North America", "USD"),
    ("CA", "Canada", "North America", "CAD"),
    ("MX", "Mexico", "North America", "MXN"),
    ("BR", "Brazil", "South America", "BRL"),
    ("AR", "Argentina", "South America", "ARS"),
    ("IN", "India", "Asia", "INR"),
    ("JP", "Japan", "Asia", "JPY"),
    ("SG", "Singapore", "Asia", "SGD"),
    ("AU", "Australia", "Oceania", "AUD"),
    ("WW", "Worldwide", "Global", "USD"),
];

#[derive(Debug, Default, serde::Serialize)]
pub struct DimensionCounts {
    pub sources: u64,
    pub countries: u64,
    pub dates: u64,
    pub companies: u64,
    pub skills: u64,
}

/// Populate all five dimensions. Seeded dimensions first, then the two
/// derived from facts. Returns how many rows each pass inserted; on a
/// re-run over the same facts every count is zero.
pub async fn populate_all(pool: &PgPool) -> Result<DimensionCounts, PipelineError> {
    let counts = DimensionCounts {
        sources: seed_sources(pool).await?,
        countries: seed_countries(pool).await?,
        dates: seed_dates(pool).await?,
        companies: derive_companies(pool).await?,
        skills: derive_skills(pool).await?,
    };
    tracing::info!(
        "Dimensions populated: {} sources, {} countries, {} dates, {} companies, {} skills",
        counts.sources,
        counts.countries,
        counts.dates,
        counts.companies,
        counts.skills
    );
    Ok(counts)
}

async fn seed_sources(pool: &PgPool) -> Result<u64, PipelineError> {
    let mut inserted = 0;
    for name in SOURCE_NAMES {
        let result =
            sqlx::query("INSERT INTO d_source (source_name) VALUES ($1) ON CONFLICT (source_name) DO NOTHING")
                .bind(name)
                .execute(pool)
                .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}

async fn seed_countries(pool: &PgPool) -> Result<u64, PipelineError> {
    let mut inserted = 0;
    for (iso2, name, region, currency) in COUNTRY_SEED {
        let result = sqlx::query(
            "INSERT INTO d_country (iso2, country_name, region, currency_iso3) \
             VALUES ($1, $2, $3, $4) ON CONFLICT (iso2) DO NOTHING",
        )
        .bind(iso2)
        .bind(name)
        .bind(region)
        .bind(currency)
        .execute(pool)
        .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}

async fn seed_dates(pool: &PgPool) -> Result<u64, PipelineError> {
    let result = sqlx::query(
        "INSERT INTO d_date (date_key, day, month, quarter, year, day_week) \
         SELECT d::date, \
                EXTRACT(DAY FROM d)::smallint, \
                EXTRACT(MONTH FROM d)::smallint, \
                EXTRACT(QUARTER FROM d)::smallint, \
                EXTRACT(YEAR FROM d)::smallint, \
                EXTRACT(ISODOW FROM d)::smallint \
         FROM generate_series('2020-01-01'::date, '2030-12-31'::date, '1 day') AS d \
         ON CONFLICT (date_key) DO NOTHING",
    )
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

async fn derive_companies(pool: &PgPool) -> Result<u64, PipelineError> {
    let result = sqlx::query(
        "INSERT INTO d_company (company_name) \
         SELECT DISTINCT company FROM jobs \
         WHERE company IS NOT NULL AND company != '' \
         ON CONFLICT (company_name) DO NOTHING",
    )
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Distinct technology tokens across every fact table carrying a
/// semicolon-joined technologies column, classified into skill groups.
async fn derive_skills(pool: &PgPool) -> Result<u64, PipelineError> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT DISTINCT token FROM ( \
             SELECT unnest(string_to_array(technologies, ';')) AS token FROM jobs \
             UNION ALL \
             SELECT unnest(string_to_array(technologies, ';')) FROM developers \
             UNION ALL \
             SELECT unnest(string_to_array(technologies, ';')) FROM kaggle_datasets \
         ) tokens WHERE token IS NOT NULL",
    )
    .fetch_all(pool)
    .await?;

    let mut inserted = 0;
    for (token,) in rows {
        let Some((label, group)) = skill_entry(&token) else {
            continue;
        };
        let result = sqlx::query(
            "INSERT INTO d_skill (skill_group, tech_label) VALUES ($1, $2) \
             ON CONFLICT (tech_label) DO NOTHING",
        )
        .bind(group)
        .bind(&label)
        .execute(pool)
        .await?;
        inserted += result.rows_affected();
    }
    Ok(inserted)
}

/// Normalize one technology token into a skill row, or None when the token
/// is noise (shorter than 2 or longer than 50 characters).
fn skill_entry(token: &str) -> Option<(String, &'static str)> {
    let label = token.trim().to_lowercase();
    if label.len() < 2 || label.len() > 50 {
        return None;
    }
    let group = rules::classify_skill_group(&label);
    Some((label, group))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_entries_filter_noise_and_classify() {
        assert_eq!(skill_entry("Python"), Some(("python".into(), "programming_language")));
        assert_eq!(skill_entry("  react "), Some(("react".into(), "frontend")));
        assert_eq!(skill_entry("cobol"), Some(("cobol".into(), "other")));
        assert_eq!(skill_entry("r"), None);
        assert_eq!(skill_entry(""), None);
        assert_eq!(skill_entry(&"x".repeat(51)), None);
        assert!(skill_entry(&"x".repeat(50)).is_some());
    }

    // Needs a live warehouse; run with
    // `DATABASE_URL=... cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn repopulating_dimensions_inserts_nothing_new() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL for warehouse tests");
        let pool = crate::warehouse::connect(&url).await.unwrap();
        crate::warehouse::schema::create_schema(&pool).await.unwrap();

        let first = populate_all(&pool).await.unwrap();
        assert_eq!(first.sources, 7);
        assert_eq!(first.countries, 20);
        assert!(first.dates > 4000);

        let second = populate_all(&pool).await.unwrap();
        assert_eq!(second.sources, 0);
        assert_eq!(second.countries, 0);
        assert_eq!(second.dates, 0);
        assert_eq!(second.companies, 0);
        assert_eq!(second.skills, 0);
    }
}
