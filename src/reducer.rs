extern crate efflux;

use clap::{Parser, Subcommand};
use review_insights::config::{TopNConfig, DEFAULT_LIMIT, HEADER_VAR, LIMIT_VAR};
use review_insights::logging;
use review_insights::reducers::{AverageReduction, TopNReduction};
use review_insights::streaming::StreamingReducer;

/// Streaming reducer: `key<TAB>value` lines on stdin, CSV on stdout.
#[derive(Parser, Debug)]
#[command(name = "review_reducer", version, about, long_about = None)]
struct Cli {
    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sum values per key and keep the highest totals
    TopN {
        /// Maximum number of data rows
        #[arg(short = 'n', long, env = LIMIT_VAR, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Comma separated header line, e.g. "word,count"
        #[arg(long, env = HEADER_VAR)]
        header: Option<String>,
    },
    /// Average values per key; writes category,avg_rating,review_count
    Average,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // the driver groups input by key; both reducers fold groups into one
    // in-memory aggregate and only write once stdin is exhausted
    match cli.command {
        Commands::TopN { limit, header } => {
            let config = TopNConfig::new(limit, header.as_deref());
            tracing::debug!(?config, "starting top-n reducer");
            efflux::run_reducer(StreamingReducer::new(TopNReduction::new(config)));
        }
        Commands::Average => {
            tracing::debug!("starting average reducer");
            efflux::run_reducer(StreamingReducer::new(AverageReduction::new()));
        }
    }
}
