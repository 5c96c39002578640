//! Field bounds and toroidal wrap
//!
//! The visible field is resolved once from the display and passed by value
//! into everything that needs it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::FIELD_MARGIN;

/// Visible field size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
}

impl FieldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Wrap a position that strayed more than `FIELD_MARGIN` past an edge
    /// to just outside the opposite edge.
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            wrap_axis(pos.x, self.width),
            wrap_axis(pos.y, self.height),
        )
    }

    /// True if `pos` lies within the margin-expanded field
    pub fn contains_with_margin(&self, pos: Vec2) -> bool {
        (-FIELD_MARGIN..=self.width + FIELD_MARGIN).contains(&pos.x)
            && (-FIELD_MARGIN..=self.height + FIELD_MARGIN).contains(&pos.y)
    }
}

fn wrap_axis(v: f32, extent: f32) -> f32 {
    if v < -FIELD_MARGIN {
        extent + FIELD_MARGIN
    } else if v > extent + FIELD_MARGIN {
        -FIELD_MARGIN
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_reenters_outside_opposite_edge() {
        let bounds = FieldBounds::new(800.0, 600.0);
        assert_eq!(bounds.wrap(Vec2::new(-100.5, 300.0)), Vec2::new(900.0, 300.0));
        assert_eq!(bounds.wrap(Vec2::new(900.5, 300.0)), Vec2::new(-100.0, 300.0));
        assert_eq!(bounds.wrap(Vec2::new(10.0, -101.0)), Vec2::new(10.0, 700.0));
        assert_eq!(bounds.wrap(Vec2::new(10.0, 701.0)), Vec2::new(10.0, -100.0));
    }

    #[test]
    fn test_wrap_leaves_margin_band_alone() {
        let bounds = FieldBounds::new(800.0, 600.0);
        let p = Vec2::new(-99.0, 699.0);
        assert_eq!(bounds.wrap(p), p);
        assert!(bounds.contains_with_margin(p));
    }
}
