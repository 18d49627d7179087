use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use review_insights::logging;
use review_insights::mappers::{self, MapperKind};

/// Review mapper: a review CSV in, `key<TAB>value` lines on stdout.
#[derive(Parser, Debug)]
#[command(name = "review_mapper", version, about, long_about = None)]
struct Cli {
    /// Which mapper to run
    #[arg(value_enum)]
    job: MapperKind,

    /// Read from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let input: Box<dyn Read> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let mapper = cli.job.mapper();
    let stdout = io::stdout();
    let stats = mappers::run(mapper.as_ref(), input, stdout.lock())
        .with_context(|| format!("{:?} mapper failed", cli.job))?;

    tracing::info!(job = ?cli.job, "map finished: {}", stats);
    Ok(())
}
