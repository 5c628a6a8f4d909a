use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Overrides the default directives, e.g. `SVCGRAPH_LOG=svcgraph::core=trace`.
pub const LOG_ENV: &str = "SVCGRAPH_LOG";

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "svcgraph=debug,info"
    } else {
        "svcgraph=warn"
    }
}

/// Filter from [`LOG_ENV`] when it is set and parses, otherwise the defaults for `verbose`.
pub fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber. Events go to stderr so a report written to stdout
/// stays clean.
pub fn init_cli_logger(verbose: bool) {
    let events = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    // A subscriber installed earlier (by a test harness, say) is left in place.
    let _ = tracing_subscriber::registry()
        .with(log_filter(verbose))
        .with(events)
        .try_init();
}
