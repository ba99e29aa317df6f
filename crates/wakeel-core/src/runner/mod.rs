//! Run guard and run orchestration.

pub mod errors;
pub mod guard;
pub mod run;

pub use errors::RunError;
pub use guard::should_run;
pub use run::{RunOutcome, RunSummary, Runner};

use tracing::info;
use wakeel_config::MonitorConfig;

use crate::jitter;

/// Set to `1` by the shared scheduler wrapper. Interactive invocations
/// leave it unset and start immediately.
pub const SCHEDULED_ENV: &str = "WAKEEL_SCHEDULED";

/// Sleep for the configured randomized startup window when the run was
/// triggered by the shared scheduler, so parallel scheduled jobs do not
/// hit the dashboard at the same instant.
pub async fn apply_startup_jitter(monitor: &MonitorConfig) {
    let scheduled = std::env::var(SCHEDULED_ENV).is_ok_and(|v| v == "1");
    if !scheduled {
        return;
    }

    info!(
        event = "core.runner.startup_jitter",
        min_secs = monitor.startup_jitter_secs.min_secs,
        max_secs = monitor.startup_jitter_secs.max_secs,
    );
    jitter::sleep_secs(&monitor.startup_jitter_secs).await;
}
