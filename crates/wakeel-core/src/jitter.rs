//! Randomized delays.
//!
//! The engine paces its page fetches and outbound messages with uniform
//! jitter so scheduled runs do not hit the remote side in lockstep bursts.

use std::time::Duration;

use rand::Rng;
use wakeel_config::{DelayRange, SecondsRange};

/// Sample a duration uniformly from a millisecond range.
pub fn sample_ms(range: &DelayRange) -> Duration {
    if range.max_ms == 0 {
        return Duration::ZERO;
    }
    let ms = rand::rng().random_range(range.min_ms..=range.max_ms);
    Duration::from_millis(ms)
}

/// Sleep for a jittered duration sampled from `range` (milliseconds).
pub async fn sleep_ms(range: &DelayRange) {
    let duration = sample_ms(range);
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

/// Sleep for a jittered duration sampled from a seconds range.
pub async fn sleep_secs(range: &SecondsRange) {
    let as_ms = DelayRange {
        min_ms: range.min_secs.saturating_mul(1_000),
        max_ms: range.max_secs.saturating_mul(1_000),
    };
    sleep_ms(&as_ms).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_stays_in_range() {
        let range = DelayRange {
            min_ms: 100,
            max_ms: 200,
        };
        for _ in 0..50 {
            let d = sample_ms(&range);
            assert!(d >= Duration::from_millis(100));
            assert!(d <= Duration::from_millis(200));
        }
    }

    #[test]
    fn zero_range_is_no_delay() {
        let range = DelayRange {
            min_ms: 0,
            max_ms: 0,
        };
        assert_eq!(sample_ms(&range), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn seconds_range_sleeps_whole_seconds() {
        let start = tokio::time::Instant::now();
        sleep_secs(&SecondsRange {
            min_secs: 2,
            max_secs: 2,
        })
        .await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }
}
