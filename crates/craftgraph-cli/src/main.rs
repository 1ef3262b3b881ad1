//! craftgraph command-line entry point.
//!
//! Loads the configuration and a game data export, then runs one of:
//!
//! - `graph` -- filter, classify, build nodes and edges, and write the
//!   renderer document as JSON.
//! - `tiers` -- print every item's complexity tier.
//! - `icons` -- mirror item icons into a local directory.
//!
//! # Startup Sequence
//!
//! 1. Parse arguments
//! 2. Load configuration from `craftgraph-config.yaml` (defaults if absent)
//! 3. Initialize structured logging (tracing) to stderr
//! 4. Run the subcommand

mod cli;
mod error;
mod fetch;
mod report;

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser as _;
use craftgraph_core::config::{LogFormat, LoggingConfig};
use craftgraph_core::{CraftgraphConfig, ViewState, assets, dataset, pipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, ViewArgs};
use crate::error::CliError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the dataset, or output fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_found) = load_config(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    init_tracing(&config.logging);

    info!(
        config = %cli.config.display(),
        config_found,
        max_tier = %config.classifier.max_tier,
        raw_materials = config.classifier.raw_materials.len(),
        "craftgraph starting"
    );

    match cli.command {
        Command::Graph { data, out, view } => {
            graph(&config, &data, out.as_deref(), &view).context("graph command failed")?;
        }
        Command::Tiers { data } => {
            tiers(&config, &data).context("tiers command failed")?;
        }
        Command::Icons { data, out_dir } => {
            let dir = out_dir.unwrap_or_else(|| PathBuf::from(&config.assets.icon_dir));
            icons(&config, &data, &dir)
                .await
                .context("icons command failed")?;
        }
    }

    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent.
///
/// Returns the config and whether the file existed.
fn load_config(path: &Path) -> Result<(CraftgraphConfig, bool), CliError> {
    if path.exists() {
        Ok((CraftgraphConfig::from_file(path)?, true))
    } else {
        Ok((CraftgraphConfig::parse("")?, false))
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the config.
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    match logging.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn graph(
    config: &CraftgraphConfig,
    data: &Path,
    out: Option<&Path>,
    view_args: &ViewArgs,
) -> Result<(), CliError> {
    let dataset = dataset::from_file(data)?;
    let view = view_args.apply_to(ViewState::from(&config.view));
    let document = pipeline::run_with_view(&dataset, config, &view).into_document();

    match out {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            let mut writer = std::io::BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &document)?;
            writer.flush()?;
            info!(
                path = %path.display(),
                nodes = document.nodes.len(),
                edges = document.edges.len(),
                "Graph document written"
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, &document)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}

fn tiers(config: &CraftgraphConfig, data: &Path) -> Result<(), CliError> {
    let dataset = dataset::from_file(data)?;
    let output = pipeline::run(&dataset, config);

    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    report::write_tier_table(&mut lock, &output.filtered, &output.classification)?;
    Ok(())
}

async fn icons(config: &CraftgraphConfig, data: &Path, dir: &Path) -> Result<(), CliError> {
    let dataset = dataset::from_file(data)?;
    let filtered = craftgraph_core::filter_dataset(&dataset, &config.filter);
    let manifest = assets::icon_manifest(&filtered.items, &config.assets);

    let client = fetch::build_client()?;
    let summary = fetch::fetch_icons(&client, manifest, dir).await?;

    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    writeln!(
        lock,
        "{} downloaded, {} already present, {} failed",
        summary.downloaded, summary.skipped, summary.failed
    )?;
    Ok(())
}
