//! Minimum-interval run guard.

use tracing::info;

/// Whether a run triggered at `now` (epoch seconds) may proceed.
///
/// A run is allowed when no previous run is recorded, or when at least
/// `min_interval_secs` have elapsed since the last one. A last-run
/// timestamp in the future means the clock moved backwards; the run
/// proceeds rather than stalling until the clock catches up.
pub fn should_run(last_run: Option<i64>, min_interval_secs: u64, now: i64) -> bool {
    let Some(last_run) = last_run else {
        return true;
    };

    let elapsed = now - last_run;
    if elapsed < 0 {
        info!(
            event = "core.runner.clock_skew_detected",
            last_run = last_run,
            now = now,
        );
        return true;
    }

    elapsed >= min_interval_secs as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_ever_run_is_allowed() {
        assert!(should_run(None, 300, 1_756_100_000));
    }

    #[test]
    fn run_within_interval_is_blocked() {
        assert!(!should_run(Some(1_756_100_000), 300, 1_756_100_120));
    }

    #[test]
    fn run_at_exactly_the_interval_is_allowed() {
        assert!(should_run(Some(1_756_100_000), 300, 1_756_100_300));
    }

    #[test]
    fn run_after_the_interval_is_allowed() {
        assert!(should_run(Some(1_756_100_000), 300, 1_756_200_000));
    }

    #[test]
    fn future_last_run_does_not_stall_forever() {
        assert!(should_run(Some(1_756_200_000), 300, 1_756_100_000));
    }
}
