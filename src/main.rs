mod cleaners;
mod config;
mod error;
mod rules;
mod table;
mod warehouse;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cleaners::runner;
use crate::config::{Command, Config};
use crate::warehouse::loaders::FactLoader;
use crate::warehouse::report::LoadReport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jobtech_pipeline=info")),
        )
        .init();

    let config = Config::parse();

    let useful_rows = match config.resolved_command() {
        Command::Clean => clean(&config)?,
        Command::Load { skip_schema } => load(&config, skip_schema).await?,
        Command::Run => {
            let cleaned = clean(&config)?;
            let loaded = load(&config, false).await?;
            cleaned + loaded
        }
    };

    if useful_rows == 0 {
        tracing::error!("Pipeline produced no rows");
        std::process::exit(1);
    }
    Ok(())
}

fn clean(config: &Config) -> anyhow::Result<usize> {
    let run = runner::clean_all_sources(config);
    runner::log_summary(&run);
    Ok(run.total_rows())
}

async fn load(config: &Config, skip_schema: bool) -> anyhow::Result<usize> {
    tracing::info!("Connecting to warehouse...");
    let pool = warehouse::connect(&config.database_url).await?;

    if skip_schema {
        tracing::info!("Skipping schema rebuild, appending to existing tables");
    } else {
        warehouse::schema::create_schema(&pool).await?;
    }

    let loads = FactLoader::new(&pool, config).load_all().await;

    // Dimensions run even when some fact loads failed; they read whatever
    // facts made it in.
    let dimensions = match warehouse::dimensions::populate_all(&pool).await {
        Ok(counts) => Some(counts),
        Err(e) => {
            tracing::error!("Dimension population failed: {e}");
            if e.is_fatal() {
                return Err(e.into());
            }
            None
        }
    };

    let report = LoadReport::new(&config.database_url, loads, dimensions);
    report.log_summary();
    if let Err(e) = report.write_json(&config.clean_dir) {
        tracing::warn!("Could not write load report: {e}");
    }

    Ok(report.total_rows_inserted)
}
