use tracing_subscriber::EnvFilter;

/// Installs the stderr subscriber. stdout is reserved for stage output.
///
/// `RUST_LOG` wins when set; otherwise `-v` picks debug and `-vv` trace.
pub fn init(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .try_init();
}
