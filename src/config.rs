use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "jobtech-pipeline", about = "Job-market data cleaning and warehouse loader")]
pub struct Config {
    /// Database connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Directory holding raw extracted files, one subdirectory per source
    #[arg(long, env = "RAW_DIR", default_value = "raw")]
    pub raw_dir: PathBuf,

    /// Directory for cleaned tabular output (<source>_clean.csv)
    #[arg(long, env = "CLEAN_DIR", default_value = "datasets_clean")]
    pub clean_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Clean all raw sources and write the cleaned tabular store
    Clean,
    /// Load cleaned tables into the warehouse and populate dimensions
    Load {
        /// Skip the destructive schema rebuild (facts append to existing tables)
        #[arg(long)]
        skip_schema: bool,
    },
    /// Full pipeline: clean, rebuild schema, load facts, populate dimensions
    Run,
}

impl Config {
    /// Resolve the command, defaulting to the full pipeline.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
