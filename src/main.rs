//! residua - archaeological residue taphonomy engine
//!
//! Reads EDS point analyses from a CSV export or JSON lines on stdin,
//! classifies every point, computes diagenesis correlations across the
//! dataset, and prints a site-level report.
//!
//! # Usage
//!
//! ```bash
//! # Classify a CSV export with a known depositional context
//! residua --csv analyses.csv --context cave_guano
//!
//! # Pipe JSON-line readings and emit the structured report
//! residua --stdin --format json < readings.jsonl
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use residua::types::ContextType;
use residua::{ingest, AnalysisReport};

#[derive(Parser, Debug)]
#[command(name = "residua")]
#[command(about = "Archaeological residue taphonomy engine (SEM-EDS)")]
#[command(version)]
struct CliArgs {
    /// Path to a CSV export of EDS point analyses
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Read JSON-encoded readings from stdin, one object per line
    #[arg(long)]
    stdin: bool,

    /// Depositional context key (e.g. cave_guano, peat_bog).
    /// Unrecognized keys fall back to the standard criteria.
    #[arg(long)]
    context: Option<String>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let readings = if let Some(ref path) = args.csv {
        ingest::load_csv(path)
            .with_context(|| format!("failed to load CSV from {}", path.display()))?
    } else if args.stdin {
        let stdin = std::io::stdin();
        ingest::read_json_lines(stdin.lock()).context("failed to read readings from stdin")?
    } else {
        bail!("no input source: pass --csv <path> or --stdin");
    };

    info!(rows = readings.len(), "Loaded EDS point analyses");

    let context = args.context.as_deref().map(|key| {
        let ctx = ContextType::from_key(key);
        if ctx == ContextType::Unknown && key != "unknown" {
            warn!(key, "Unrecognized context; applying standard criteria");
        } else {
            info!(context = %ctx, "Applying depositional context corrections");
        }
        ctx
    });

    let report = AnalysisReport::build(&readings, context);

    match args.format.as_str() {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        ),
        "text" => print!("{}", report.render_text()),
        other => bail!("unknown output format {other:?} (expected text or json)"),
    }

    Ok(())
}
