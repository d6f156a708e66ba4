//! Injectable randomness
//!
//! Serve direction, power shots and opponent re-aims all draw from a
//! `RandomSource`. Browser builds use a seeded PCG generator; tests inject a
//! scripted sequence to force exact outcomes.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform samples for the simulation
pub trait RandomSource {
    /// Uniform sample in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// Fair coin: true when the sample lands above one half
    fn coin_flip(&mut self) -> bool {
        self.next_unit() > 0.5
    }

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_unit() < p
    }

    /// Uniform sample in `[lo, hi)`
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_unit()
    }
}

/// Seeded PCG generator
#[derive(Debug, Clone)]
pub struct PcgRandom(Pcg32);

impl PcgRandom {
    pub fn new(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }
}

impl RandomSource for PcgRandom {
    fn next_unit(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}

/// Replays a fixed list of samples, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    index: usize,
}

impl ScriptedRandom {
    /// Create from samples; each is clamped into `[0, 1)`
    pub fn new(values: Vec<f32>) -> Self {
        let values = if values.is_empty() { vec![0.0] } else { values };
        Self {
            values: values
                .into_iter()
                .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
                .collect(),
            index: 0,
        }
    }

    /// Always returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples drawn so far
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
