//! `dispatch` — run a delivery command script and write its report file.
//!
//! ```text
//! dispatch input.txt                       # writes input_output_file.txt
//! dispatch input.txt --output out.txt
//! dispatch input.txt --config weights.json
//! RUST_LOG=debug dispatch input.txt        # per-command engine logs
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use dd_core::DispatchConfig;
use dd_driver::{Runner, TextFileWriter, load_config_path, load_script_path, output_path_for};
use dd_engine::DispatchEngine;

/// CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "dispatch")]
#[command(about = "Schedule deliveries for a single agent from a command script")]
struct CliArgs {
    /// Command script, one command per line.
    input: PathBuf,

    /// Report file (default: `<input dir>/<stem>_output_file.txt`).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file overriding the priority weights.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => load_config_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DispatchConfig::default(),
    };
    let engine = DispatchEngine::with_config(config).context("invalid dispatch config")?;

    let lines = load_script_path(&args.input)
        .with_context(|| format!("reading script {}", args.input.display()))?;
    let output = args.output.clone().unwrap_or_else(|| output_path_for(&args.input));
    let sink = TextFileWriter::create(&output)
        .with_context(|| format!("creating {}", output.display()))?;

    let summary = Runner::new(engine, sink)
        .run(&lines)
        .with_context(|| format!("writing {}", output.display()))?;

    info!(
        output = %output.display(),
        executed = summary.executed,
        malformed = summary.malformed,
        not_found = summary.not_found,
        reports = summary.reports,
        "done"
    );
    Ok(())
}
