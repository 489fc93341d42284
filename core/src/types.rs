//! Shared primitive types used across the entire simulation.

/// One discrete step of the automaton.
pub type Generation = u64;

/// Logical or measured milliseconds.
pub type Millis = u64;

/// Default side length of a freshly created grid.
pub const DEFAULT_SIZE: usize = 10;

/// Default step interval in milliseconds.
pub const DEFAULT_INTERVAL_MS: u32 = 1000;

/// Default (cosmetic) alive-cell color.
pub const DEFAULT_COLOR: &str = "#7ADC1D";
