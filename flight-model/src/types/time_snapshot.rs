use chrono::{DateTime, Utc};

/// Elapsed and total flight time at one instant, in whole seconds.
///
/// `elapsed` is always within `[0, total]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSnapshot {
    pub total: i64,
    pub elapsed: i64,
}

/// Rounds a millisecond span to whole seconds, half away from zero.
fn millis_to_seconds(millis: i64) -> i64 {
    (millis as f64 / 1000.0).round() as i64
}

impl TimeSnapshot {
    /// Takes a snapshot of the flight at `now`.
    ///
    /// An arrival at or before the departure gives a zero-length flight.
    pub fn capture(now: DateTime<Utc>, departure: DateTime<Utc>, arrival: DateTime<Utc>) -> Self {
        let total = millis_to_seconds(arrival.signed_duration_since(departure).num_milliseconds())
            .max(0);
        let elapsed = millis_to_seconds(now.signed_duration_since(departure).num_milliseconds())
            .clamp(0, total);

        Self { total, elapsed }
    }

    pub fn remaining(&self) -> i64 {
        (self.total - self.elapsed).max(0)
    }

    /// Fraction of the flight that has elapsed, capped at 1.
    /// A zero-length flight has already arrived and reports 1.
    pub fn progress(&self) -> f64 {
        if self.total > 0 {
            (self.elapsed as f64 / self.total as f64).min(1.0)
        } else {
            1.0
        }
    }

    pub fn is_arrived(&self) -> bool {
        self.elapsed >= self.total
    }
}
