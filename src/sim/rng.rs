//! Injectable random source
//!
//! Every random draw in the simulation (spawn velocity, spark color, drift,
//! lantern color cycle) goes through `RandomSource` so runs can be seeded
//! or scripted.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// A source of uniform samples in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform sample in `[lo, hi)`
    fn next_range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_unit() * (hi - lo)
    }

    /// Uniform index in `0..len`
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.next_unit() * len as f32) as usize).min(len - 1)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

/// Seeded PCG32 generator used for live sessions
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SimRng {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed cycle of samples. Values are clamped into `[0, 1)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let mut values: Vec<f32> = values.into();
        if values.is_empty() {
            values.push(0.5);
        }
        for v in &mut values {
            *v = v.clamp(0.0, 1.0 - f32::EPSILON);
        }
        Self { values, cursor: 0 }
    }

    /// A source that always yields `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
