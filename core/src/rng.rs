//! Deterministic random number generation for seeded soups.
//!
//! RULE: Nothing in the simulation may call a platform RNG.
//! A soup is fully determined by its seed, so the same seed always
//! produces the same starting grid.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Stream constant mixed into every seed so that seed 0 is not degenerate.
const SOUP_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

pub struct SoupRng {
    inner: Pcg64Mcg,
}

impl SoupRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed ^ SOUP_STREAM),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Bernoulli trial: returns true with probability p.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}
