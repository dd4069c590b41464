//! rlp-import - recipe data import
//!
//! Usage:
//! - `rlp-import convert <input.csv> <output.json>`
//! - `rlp-import load <input.json> [--database-url URL | --db-host ...]`

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rlp_api::config::DatabaseArgs;
use rlp_common::db::init_database;
use rlp_import::{convert_file, load_records, read_records_file, write_json};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "rlp-import")]
#[command(about = "Import FF14 recipe data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a CSV export into a JSON array
    Convert {
        /// Input CSV file path
        input: PathBuf,

        /// Output JSON file path
        output: PathBuf,
    },

    /// Insert a JSON array of recipes into the database
    Load {
        /// Input JSON file path
        input: PathBuf,

        #[command(flatten)]
        database: DatabaseArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("rlp-import v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Convert { input, output } => convert(&input, &output),
        Command::Load { input, database } => load(&input, &database).await,
    }
}

fn convert(input: &Path, output: &Path) -> Result<()> {
    let conversion = convert_file(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    for row in &conversion.rejected {
        warn!(line = row.line, "Skipped invalid row: {}", row.errors);
    }

    if conversion.recipes.is_empty() {
        bail!(
            "No valid recipes in {} ({} rows rejected)",
            input.display(),
            conversion.rejected.len()
        );
    }

    write_json(output, &conversion.recipes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(
        "✓ Converted {} recipes to {} ({} rows skipped)",
        conversion.recipes.len(),
        output.display(),
        conversion.rejected.len()
    );
    Ok(())
}

async fn load(input: &Path, database: &DatabaseArgs) -> Result<()> {
    let records = read_records_file(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let config = database.resolve().context("Configuration error")?;
    info!("Database: {}", config.redacted_url());
    let pool = init_database(&config)
        .await
        .context("Failed to initialize database")?;

    let report = load_records(&pool, &records).await;
    pool.close().await;

    info!(
        "Loaded {} of {} recipes from {} ({} already present, {} failed)",
        report.inserted,
        records.len(),
        input.display(),
        report.conflicts(),
        report.failed.len() - report.conflicts()
    );

    if !report.is_clean() {
        bail!(
            "{} records could not be loaded",
            report.failed.len() - report.conflicts()
        );
    }
    Ok(())
}
