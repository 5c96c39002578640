//! Contact detection between shadows and the player
//!
//! A shadow kills only when it touches the pointer from outside the inner
//! lit zone: `distance < size * 0.6` and `distance > radius * 0.6`.

use glam::Vec2;

use super::shadow::Shadow;
use crate::consts::{CONTACT_FACTOR, SAFE_LIGHT_FACTOR};
use crate::distance;

/// The shadow that reached the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index into the evaluated slice
    pub index: usize,
    pub shadow_id: u32,
    pub distance: f32,
}

/// True if a shadow at `dist` with `size` kills under a light of `radius`
#[inline]
pub fn is_fatal(dist: f32, size: f32, radius: f32) -> bool {
    dist < size * CONTACT_FACTOR && dist > radius * SAFE_LIGHT_FACTOR
}

/// First shadow in iteration order that is in fatal contact, if any
pub fn evaluate(shadows: &[Shadow], pointer: Vec2, radius: f32) -> Option<Contact> {
    shadows.iter().enumerate().find_map(|(index, s)| {
        let dist = distance(s.pos, pointer);
        is_fatal(dist, s.size, radius).then_some(Contact {
            index,
            shadow_id: s.id,
            distance: dist,
        })
    })
}
