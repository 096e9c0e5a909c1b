//! Random draw seam
//!
//! Generation only ever asks three questions of its randomness source, so the
//! source is a small trait. Gameplay uses a seeded [`Pcg32`]; tests use
//! [`ScriptedRng`] to pin exact layouts.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of random draws for generation and effects
pub trait RowRng {
    /// True with probability `p` (`p` in [0, 1])
    fn chance(&mut self, p: f64) -> bool;
    /// Uniform index in `0..len` (`len` > 0)
    fn pick(&mut self, len: usize) -> usize;
    /// Uniform float in [0, 1)
    fn unit(&mut self) -> f32;
}

impl RowRng for Pcg32 {
    fn chance(&mut self, p: f64) -> bool {
        self.random_bool(p)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }

    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded gameplay RNG
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed, cycling sequence of unit draws
///
/// `chance(p)` is true when the next draw is below `p`, `pick(len)` maps the
/// draw onto `0..len`. An empty script always draws 0.0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// A script that repeats one value forever
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }

    fn next(&mut self) -> f64 {
        if self.draws.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

impl RowRng for ScriptedRng {
    fn chance(&mut self, p: f64) -> bool {
        self.next() < p
    }

    fn pick(&mut self, len: usize) -> usize {
        ((self.next() * len as f64) as usize).min(len.saturating_sub(1))
    }

    fn unit(&mut self) -> f32 {
        // Narrowing can round up to 1.0
        (self.next() as f32).min(1.0 - f32::EPSILON)
    }
}
