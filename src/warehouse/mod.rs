// Warehouse module: star-schema management, fact loaders, dimension
// population, and the run report.

pub mod dimensions;
pub mod loaders;
pub mod report;
pub mod schema;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::PipelineError;

/// Connect to the warehouse and verify the connection with a round-trip.
/// A failure here is fatal for the run.
pub async fn connect(database_url: &str) -> Result<PgPool, PipelineError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    let _: (i32,) = sqlx::query_as("SELECT 1").fetch_one(&pool).await?;
    tracing::info!("Warehouse connection established");
    Ok(pool)
}
