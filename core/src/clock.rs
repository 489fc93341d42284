//! Simulation clock: generation count, logical time, cadence and pause.

use crate::types::{Generation, Millis, DEFAULT_INTERVAL_MS};
use std::time::Duration;

/// Clamp a requested step interval to at least 1 ms.
pub fn clamp_interval(ms: i64) -> u32 {
    ms.clamp(1, i64::from(u32::MAX)) as u32
}

/// Generation count, logical time, step cadence and the pause flag.
#[derive(Debug, Clone, PartialEq)]
pub struct SimClock {
    pub generation:            Generation,
    /// Logical time: grows by `interval_ms` per step, whatever the step cost.
    pub total_simulated_ms:    Millis,
    /// Wall-clock cost of the last step computation.
    pub last_step_duration_ms: Millis,
    pub interval_ms:           u32,
    pub paused:                bool,
}

impl SimClock {
    pub fn new(interval_ms: u32, paused: bool) -> Self {
        Self {
            generation: 0,
            total_simulated_ms: 0,
            last_step_duration_ms: 0,
            interval_ms: interval_ms.max(1),
            paused,
        }
    }

    /// Record one completed step. Returns the new generation number.
    pub fn advance(&mut self, step_cost: Duration) -> Generation {
        self.generation += 1;
        self.total_simulated_ms += Millis::from(self.interval_ms);
        self.last_step_duration_ms = step_cost.as_millis() as Millis;
        self.generation
    }

    /// Back to generation 0 with no simulated time. Cadence and pause state
    /// are kept.
    pub fn rewind(&mut self) {
        self.generation = 0;
        self.total_simulated_ms = 0;
    }

    pub fn pause(&mut self)  { self.paused = true;  }
    pub fn resume(&mut self) { self.paused = false; }

    pub fn set_interval(&mut self, ms: i64) -> u32 {
        self.interval_ms = clamp_interval(ms);
        self.interval_ms
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MS, false)
    }
}
