//! Logging initialization for all wakeel binaries.
//!
//! Emits JSON lines so scheduled runs produce machine-scannable logs.
//! Quiet mode (the CLI default) raises the floor to warnings so human
//! output stays readable; `RUST_LOG` overrides everything.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init_logging(quiet: bool) {
    let default_directive = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
