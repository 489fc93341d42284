//! Periodic trigger with cancellation tokens.
//!
//! RULES:
//!   - At most one tick is armed at a time.
//!   - Every arm or cancel bumps the epoch, so a tick handed out earlier
//!     can never fire once the schedule has changed.
//!   - Time is whatever monotonic millisecond value the caller supplies.

use crate::types::Millis;

/// Identifies one arming of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTick {
    pub token:  TickToken,
    pub due_ms: Millis,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    epoch: u64,
    armed: Option<ScheduledTick>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh trigger whose first tick is one full interval away.
    pub fn arm(&mut self, now_ms: Millis, interval_ms: u32) -> ScheduledTick {
        self.epoch += 1;
        let tick = ScheduledTick {
            token:  TickToken(self.epoch),
            due_ms: now_ms + Millis::from(interval_ms),
        };
        self.armed = Some(tick);
        tick
    }

    /// Drop the armed trigger. Any tick handed out before is now stale.
    pub fn cancel(&mut self) {
        self.epoch += 1;
        self.armed = None;
    }

    pub fn pending(&self) -> Option<ScheduledTick> {
        self.armed
    }

    pub fn is_current(&self, tick: &ScheduledTick) -> bool {
        self.armed.as_ref() == Some(tick)
    }

    /// Re-arm after `fired` ran at `now_ms`. Keeps the cadence when on time;
    /// a late tick pushes the next one a full interval past `now_ms`.
    pub fn rearm_after(&mut self, fired: ScheduledTick, now_ms: Millis, interval_ms: u32) -> ScheduledTick {
        let on_cadence = fired.due_ms + Millis::from(interval_ms);
        let anchor = if on_cadence > now_ms { fired.due_ms } else { now_ms };
        self.arm(anchor, interval_ms)
    }
}
