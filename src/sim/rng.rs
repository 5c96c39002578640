//! Seeded random source shared by every stochastic decision
//!
//! One stream per game run: shadow headings, freezes, flicker, reveal pacing
//! and glitches all draw from here so a fixed seed replays a run exactly.

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: Pcg32,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this stream was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[lo, hi)`; returns `lo` when the range is empty
    pub fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.rng.random::<f32>()
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform heading in `[0, 2π)`
    pub fn angle(&mut self) -> f32 {
        self.uniform(0.0, TAU)
    }

    /// Uniform integer in `[lo, hi]`
    pub fn int_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    /// Uniform byte in `[0, 255]`
    pub fn byte(&mut self) -> u8 {
        self.rng.random()
    }
}
