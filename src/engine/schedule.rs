// src/engine/schedule.rs

use std::time::{Duration, Instant};

/// Fixed-interval schedule owned exclusively by the monitor loop.
///
/// The first fire is one full interval after construction (starting the
/// monitor does not itself produce a report); `is_due` is a pure predicate
/// of explicit state, and only the loop mutates this after a scheduled run.
/// Never persisted — restarting the process restarts the cadence.
#[derive(Debug)]
pub struct ScheduleState {
    interval: Duration,
    next_fire: Instant,
}

impl ScheduleState {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    pub fn starting_at(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_fire: now + interval,
        }
    }

    /// Whether the schedule calls for a run at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_fire
    }

    /// Re-arm after a scheduled run; the next fire is one interval from
    /// `now`, not from the previous deadline, so a long run does not cause
    /// a burst of catch-up reports.
    pub fn mark_fired(&mut self, now: Instant) {
        self.next_fire = now + self.interval;
    }
}
