/// Microsecond timestamps, matching the resolution of the sampling period.
pub type Instant = fugit::TimerInstantU64<1_000_000>;
pub type Duration = fugit::TimerDurationU64<1_000_000>;

/// Seconds elapsed between `start` and `now`, or zero if `now` is before `start`.
pub fn seconds_since(start: Instant, now: Instant) -> f64 {
    match now.checked_duration_since(start) {
        #[allow(clippy::cast_precision_loss)]
        Some(elapsed) => elapsed.to_micros() as f64 * 1e-6,
        None => 0.0,
    }
}

/// Busy-wait until `duration` has passed since the first reading of `now`.
///
/// Returns as soon as the clock reads earlier than where it started, as when a hardware counter wraps.
pub fn spin_for<F: FnMut() -> Instant>(mut now: F, duration: Duration) {
    let start = now();
    loop {
        match now().checked_duration_since(start) {
            Some(elapsed) if elapsed < duration => continue,
            _ => return,
        }
    }
}
