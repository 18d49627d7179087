use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use review_insights::config::DEFAULT_LIMIT;
use review_insights::jobs;
use review_insights::logging;

/// Runs every review job in one process and writes the dashboard CSVs.
#[derive(Parser, Debug)]
#[command(name = "review_single", version, about, long_about = None)]
struct Cli {
    /// Raw review export (CSV with a header row)
    #[arg(short, long)]
    input: PathBuf,

    /// Directory the result CSVs are written to
    #[arg(short, long, default_value = "outputs")]
    output_dir: PathBuf,

    /// Row limit for the counting jobs
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let reports = jobs::run_all(&cli.input, &cli.output_dir, cli.limit)
        .with_context(|| format!("processing {}", cli.input.display()))?;

    for report in &reports {
        tracing::info!(
            job = report.name,
            rows = report.rows,
            "{}: {}",
            report.artifact.display(),
            report.map_stats
        );
    }

    Ok(())
}
