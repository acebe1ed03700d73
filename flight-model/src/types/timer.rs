use std::time::{Duration, Instant};

/// A fixed-period task driven by polling from a single-threaded frame loop.
///
/// The task is idle until [`RepeatingTask::start`] is called and runs until
/// [`RepeatingTask::stop`]. Missed periods are skipped rather than replayed, so a
/// stalled frame loop never causes a burst of ticks.
#[derive(Debug, Clone)]
pub struct RepeatingTask {
    period: Duration,
    next_due: Option<Instant>,
}

impl RepeatingTask {
    /// Creates a stopped task. A zero period is raised to one millisecond.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    /// Arms the task; the first tick is due one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true when a tick is due at `now`, and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(mut due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        while due <= now {
            due += self.period;
        }
        self.next_due = Some(due);
        true
    }

    /// Time left until the next tick, or `None` when stopped.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
