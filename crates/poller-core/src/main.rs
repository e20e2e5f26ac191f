//! pollinv - normalize a captured SNMP snapshot into an inventory report

use anyhow::{Context, Result};
use clap::Parser;
use poller_core::{
    DEFAULT_CONFIG_PATH, DeviceSnapshot, InventoryReport, PollerConfig, TranslationTable,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Normalize an SNMP device snapshot into make/series/model and interface records
#[derive(Parser, Debug)]
#[command(name = "pollinv")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Captured snapshot (JSON)
    #[arg(short = 's', long)]
    snapshot: PathBuf,

    /// Configuration file
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,

    /// Pretty-print the JSON report
    #[arg(short = 'p', long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = PollerConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    config.validate()?;
    info!(
        "Query settings: SNMP {:?}, {} retries, {:?} timeout",
        config.protocol_version,
        config.retry_count,
        config.timeout()
    );

    let owned_table;
    let table = match &config.translation_path {
        Some(path) => {
            owned_table = TranslationTable::from_path(path)
                .with_context(|| format!("loading translation dataset {}", path.display()))?;
            &owned_table
        }
        None => TranslationTable::bundled().context("loading bundled translation dataset")?,
    };
    info!("Translation table ready with {} prefixes", table.len());

    let snapshot = DeviceSnapshot::load(&args.snapshot)
        .with_context(|| format!("reading snapshot {}", args.snapshot.display()))?;
    let report = InventoryReport::build(&snapshot, table);

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
