use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use tcm_migrate::config::AppConfig;
use tcm_migrate::{migrate, BatchStamp, FsStore, OutputStore, ValidationOutcome, Validator};

/// Migrate legacy herb records to the Material / Slice / Formula schema
#[derive(Debug, Parser)]
#[command(name = "tcm-migrate", version, about)]
struct Cli {
    /// Legacy herbs JSON file
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output directory, created if missing
    #[arg(long)]
    output: Option<PathBuf>,

    /// Schema version stamped on every record
    #[arg(long)]
    schema_version: Option<String>,

    /// Only validate an existing output directory
    #[arg(long)]
    validate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    let input = cli
        .input
        .unwrap_or_else(|| PathBuf::from(&config.migration.input_file));
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&config.migration.output_dir));
    let store = FsStore::new(output);

    if !cli.validate {
        let version = cli
            .schema_version
            .unwrap_or_else(|| config.migration.schema_version.clone());

        println!("Reading legacy herbs from {}", input.display());
        let manifest = migrate(&input, &store, BatchStamp::new(chrono::Utc::now(), version))
            .await
            .with_context(|| format!("migration into {} failed", store.location()))?;

        println!("Migration complete (run {}):", manifest.run_id);
        for (name, count) in manifest.counts.entries() {
            println!("  {}: {}", name, count);
        }
        println!("Output directory: {}", store.location());
        println!();
    }

    let report = Validator::validate(&store)
        .await
        .with_context(|| format!("validation of {} failed", store.location()))?;
    println!("{}", report.render_summary());

    if report.outcome() == ValidationOutcome::Failed {
        bail!("validation found {} errors", report.total_errors());
    }
    Ok(())
}
