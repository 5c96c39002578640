//! Occasional full-field static flash

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::{GLITCH_ALPHA, GLITCH_CHANCE, GLITCH_JITTER};

/// A translucent red sheet drawn over the finished frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glitch {
    /// Red channel; green and blue are zero
    pub red: u8,
    pub alpha: f32,
    /// Vertical offset of the sheet in logical pixels
    pub offset_y: i32,
}

impl Glitch {
    /// Roll for this frame's glitch
    pub fn roll(rng: &mut RandomSource) -> Option<Self> {
        if !rng.chance(GLITCH_CHANCE) {
            return None;
        }
        Some(Self {
            red: rng.byte(),
            alpha: GLITCH_ALPHA,
            offset_y: rng.int_inclusive(-GLITCH_JITTER, GLITCH_JITTER),
        })
    }
}
