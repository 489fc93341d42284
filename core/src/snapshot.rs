//! Read-only view of engine state handed to the presentation side.
//!
//! A snapshot owns copies of everything it shows; holding one never
//! borrows from or aliases the engine.

use crate::types::{Generation, Millis};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSnapshot {
    pub width:                 usize,
    pub height:                usize,
    /// Cell states indexed `[x][y]`.
    pub cells:                 Vec<Vec<bool>>,
    pub generation:            Generation,
    pub total_alive:           u32,
    pub dead_count:            u32,
    pub last_step_duration_ms: Millis,
    pub total_simulated_ms:    Millis,
    pub total_births:          u64,
    pub total_deaths:          u64,
    pub paused:                bool,
    pub interval_ms:           u32,
    pub color:                 String,
}

impl SimSnapshot {
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells
            .get(x)
            .and_then(|column| column.get(y))
            .copied()
            .unwrap_or(false)
    }

    pub fn total_cells(&self) -> usize {
        self.width * self.height
    }

    /// `#` for alive, `.` for dead; one line per y, x runs left to right.
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.is_alive(x, y) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}
