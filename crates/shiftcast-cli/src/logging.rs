//! Tracing subscriber setup for the CLI.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

const LOG_ENV: &str = "SHIFTCAST_LOG";
const DEFAULT_FILTER: &str = "shiftcast=warn";

/// Install the global subscriber. Safe to call more than once.
///
/// Filter directives come from `SHIFTCAST_LOG`, e.g.
/// `SHIFTCAST_LOG=shiftcast_core=debug`. Output goes to stderr so JSON on
/// stdout stays machine-readable.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by an embedding host
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
    });
}
