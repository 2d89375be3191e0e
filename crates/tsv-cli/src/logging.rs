//! Tracing setup for the CLI
//!
//! Filtering follows `RUST_LOG` (e.g. `RUST_LOG=tsv_core=debug`). Without it,
//! only warnings are shown, or debug output with `--verbose`. Everything goes
//! to stderr so stdout carries only table data.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
