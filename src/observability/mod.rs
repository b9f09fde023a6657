//! Diagnostic logging.
//!
//! couplingmap emits `tracing` events from the analysis pipeline and `log`
//! records from the configuration loader. [`init_tracing`] installs one
//! `fmt` subscriber on stderr that receives both, so stdout stays reserved
//! for the report.
//!
//! ```ignore
//! use couplingmap::observability::init_tracing;
//!
//! fn main() {
//!     init_tracing(cli.verbosity);
//!     // ... rest of application
//! }
//! ```

use tracing_subscriber::EnvFilter;

/// Default filter for a `-v` count. `RUST_LOG` takes precedence when set.
pub fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity_directive(verbosity)))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_tracing(verbosity: u8) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .try_init();

    if installed.is_ok() {
        tracing::debug!(verbosity, "Tracing initialized");
    }
}
