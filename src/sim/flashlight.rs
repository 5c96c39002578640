//! Flickering flashlight
//!
//! Each frame draws a fresh flicker multiplier (no smoothing) and yields the
//! lit region anchored on the pointer. The darkness mask is expressed as a
//! function of position so any renderer can sample it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::*;

/// The lit region for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Illumination {
    pub center: Vec2,
    /// Effective radius after flicker
    pub radius: f32,
}

impl Illumination {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Amount of light at `p` in `[0, 1]`
    ///
    /// Zero at and beyond the radius. Inside, the falloff steps in
    /// `LIGHT_RING_STEP` rings: a point takes the value of the smallest ring
    /// that still covers it, so the centre is brightest.
    pub fn light_at(&self, p: Vec2) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        let d = (p - self.center).length();
        if d >= self.radius {
            return 0.0;
        }
        let last_ring = ((self.radius / LIGHT_RING_STEP).ceil() - 1.0).max(0.0);
        let k = ((self.radius - d) / LIGHT_RING_STEP).floor().min(last_ring);
        let ring = self.radius - k * LIGHT_RING_STEP;
        1.0 - ring / self.radius
    }

    /// Darkness alpha at `p` once the light mask is subtracted from the
    /// ambient layer
    pub fn darkness_at(&self, p: Vec2) -> f32 {
        (AMBIENT_ALPHA - LIGHT_MASK_ALPHA * self.light_at(p)).max(0.0)
    }
}

/// Computes the per-frame illumination
#[derive(Debug, Clone, Copy)]
pub struct Flashlight {
    pub base_radius: f32,
}

impl Default for Flashlight {
    fn default() -> Self {
        Self {
            base_radius: FLASHLIGHT_RADIUS,
        }
    }
}

impl Flashlight {
    pub fn compute(&self, pointer: Vec2, rng: &mut RandomSource) -> Illumination {
        let flicker = rng.uniform(FLICKER_MIN, FLICKER_MAX);
        Illumination::new(pointer, self.base_radius * flicker)
    }
}
