use crate::{
    clock::clamp_interval,
    grid::clamp_dimension,
    types::{DEFAULT_INTERVAL_MS, DEFAULT_SIZE},
};
use serde::{Deserialize, Serialize};

/// Grid area at which stepping moves onto the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width:              i64,
    pub height:             i64,
    pub interval_ms:        i64,
    pub start_paused:       bool,
    /// Cells at or above which `step_parallel` is used.
    pub parallel_threshold: usize,
    /// Seed for an initial random soup. `None` starts empty.
    pub seed:               Option<u64>,
    /// Alive probability for the initial soup.
    pub density:            f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width:              DEFAULT_SIZE as i64,
            height:             DEFAULT_SIZE as i64,
            interval_ms:        i64::from(DEFAULT_INTERVAL_MS),
            start_paused:       false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            seed:               None,
            density:            0.0,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    /// Config for unit tests: paused, so nothing steps unless asked.
    pub fn default_test(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            interval_ms: 100,
            start_paused: true,
            ..Self::default()
        }
    }

    pub fn grid_width(&self) -> usize  { clamp_dimension(self.width) }
    pub fn grid_height(&self) -> usize { clamp_dimension(self.height) }
    pub fn interval(&self) -> u32      { clamp_interval(self.interval_ms) }

    /// Density limited to [0, 1]; NaN counts as 0.
    pub fn soup_density(&self) -> f64 {
        if self.density.is_nan() { 0.0 } else { self.density.clamp(0.0, 1.0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"width": 32}"#).unwrap();
        assert_eq!(config.grid_width(), 32);
        assert_eq!(config.grid_height(), DEFAULT_SIZE);
        assert_eq!(config.interval(), DEFAULT_INTERVAL_MS);
        assert!(!config.start_paused);
    }

    #[test]
    fn bad_values_are_clamped() {
        let config = EngineConfig {
            width: 0,
            height: -3,
            interval_ms: 0,
            density: 4.0,
            ..EngineConfig::default()
        };
        assert_eq!((config.grid_width(), config.grid_height()), (1, 1));
        assert_eq!(config.interval(), 1);
        assert_eq!(config.soup_density(), 1.0);
    }
}
