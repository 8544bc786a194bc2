use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `LOANCALC_LOG=loancalc=trace`.
pub const LOG_ENV: &str = "LOANCALC_LOG";

/// Send tracing output to stderr so it never mixes with command output.
///
/// `LOANCALC_LOG` wins over `--verbose`; without either only warnings show.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "loancalc=debug" } else { "loancalc=warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
