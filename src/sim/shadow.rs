//! Shadow entities
//!
//! A shadow drifts along its heading, now and then turns to face the pointer,
//! now and then holds still, and wraps around the margin-expanded field.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::field::FieldBounds;
use super::rng::RandomSource;
use crate::consts::*;
use crate::{heading_to_vec, heading_toward};

/// A roaming shadow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub id: u32,
    pub pos: Vec2,
    /// Visual extent and contact radius
    pub size: f32,
    /// Pixels per second
    pub speed: f32,
    /// Radians
    pub heading: f32,
}

impl Shadow {
    pub fn new(id: u32, pos: Vec2, size: f32, speed: f32, heading: f32) -> Self {
        Self {
            id,
            pos,
            size,
            speed,
            heading,
        }
    }

    /// Create a shadow anywhere in the margin-expanded field
    pub fn spawn(id: u32, bounds: FieldBounds, rng: &mut RandomSource) -> Self {
        let x = rng.uniform(-FIELD_MARGIN, bounds.width + FIELD_MARGIN);
        let y = rng.uniform(-FIELD_MARGIN, bounds.height + FIELD_MARGIN);
        let size = rng.uniform(SHADOW_SIZE_MIN, SHADOW_SIZE_MAX);
        let speed = rng.uniform(SHADOW_SPEED_MIN, SHADOW_SPEED_MAX);
        let heading = rng.angle();
        Self::new(id, Vec2::new(x, y), size, speed, heading)
    }

    /// Advance one step toward (or away from) the player
    pub fn update(&mut self, dt: f32, target: Vec2, bounds: FieldBounds, rng: &mut RandomSource) {
        // A frozen shadow keeps both position and heading
        if rng.chance(FREEZE_CHANCE) {
            return;
        }
        if rng.chance(NOTICE_CHANCE) {
            self.heading = heading_toward(self.pos, target);
        }
        self.pos += heading_to_vec(self.heading) * self.speed * dt;
        self.pos = bounds.wrap(self.pos);
    }
}

/// Accumulates frame time and decides when a new shadow appears
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub elapsed: f32,
}

impl SpawnTimer {
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// True (and resets) when the interval has passed and there is room
    pub fn ready(&mut self, live: usize) -> bool {
        if self.elapsed > SHADOW_SPAWN_INTERVAL && live < MAX_SHADOWS {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }
}
