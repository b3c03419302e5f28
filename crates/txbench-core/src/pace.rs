use std::time::Duration;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Period between submissions for `rate` per second, by integer nanosecond division.
pub fn tick_interval(rate: u64) -> Duration {
    Duration::from_nanos((NANOS_PER_SEC / rate.max(1)).max(1))
}

pub fn achieved_rate(count: u64, elapsed: Duration) -> f64 {
    if elapsed.is_zero() {
        return 0.0;
    }
    count as f64 / elapsed.as_secs_f64()
}
