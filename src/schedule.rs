use crate::config;
use crate::io::Clock;
use crate::time::{Duration, Instant};

/// Wait out the remainder of the sampling period that started at `previous`.
///
/// If between 0 (exclusive) and `period` (inclusive) has lapsed since `previous`,
/// sleeps for `period - lapsed - overhead` (if that is still positive).
/// Otherwise the tick is already late, or the clock went backwards, and this returns immediately.
///
/// Returns the time taken right after the wait, which is the `previous` for the next call.
pub fn wait_next_period<C: Clock>(
    clock: &mut C,
    previous: Instant,
    period: Duration,
    overhead: Duration,
) -> Instant {
    let now = clock.now();

    match now.checked_duration_since(previous) {
        Some(lapsed) if lapsed.ticks() > 0 && lapsed <= period => {
            let remaining = period
                .checked_sub(lapsed)
                .and_then(|d| d.checked_sub(overhead));
            if let Some(remaining) = remaining {
                if remaining.ticks() > 0 {
                    clock.sleep(remaining);
                }
            }
        }
        Some(lapsed) if lapsed > period => {
            if config::debug::LOG_LATE_TICKS {
                warn!(
                    "Tick late by {} us (period {} us)",
                    (lapsed - period).to_micros(),
                    period.to_micros()
                );
            }
        }
        _ => {}
    }

    clock.now()
}

/// Fixed-period cadence, holding the timestamp of the previous tick.
pub struct Scheduler {
    previous: Instant,
    period: Duration,
    overhead: Duration,
}

impl Scheduler {
    pub fn new(start: Instant, period: Duration, overhead: Duration) -> Self {
        Self {
            previous: start,
            period,
            overhead,
        }
    }

    /// Block until the next tick and record it.
    pub fn wait<C: Clock>(&mut self, clock: &mut C) -> Instant {
        let now = wait_next_period(clock, self.previous, self.period, self.overhead);
        self.previous = now;
        now
    }

    pub fn previous(&self) -> Instant {
        self.previous
    }
}
