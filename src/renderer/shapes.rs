//! Pixel-layer primitives: floor, silhouettes, darkness, overlays

use glam::Vec2;

use super::canvas::{Frame, Rgb};
use crate::consts::SHADOW_RINGS;
use crate::sim::{FieldBounds, Glitch, Illumination, Shadow};

pub const FLOOR: Rgb = Rgb::new(150, 140, 115);
pub const NIGHT: Rgb = Rgb::new(10, 10, 10);

/// Maps frame pixels and cells onto field coordinates
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub bounds: FieldBounds,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(bounds: FieldBounds, cols: u16, rows: u16) -> Self {
        Self { bounds, cols, rows }
    }

    /// Field size of one half-block pixel
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.bounds.width / self.cols.max(1) as f32,
            self.bounds.height / (self.rows.max(1) as f32 * 2.0),
        )
    }

    /// Field position at the centre of pixel (`x`, `y`)
    pub fn pixel_center(&self, x: usize, y: usize) -> Vec2 {
        let s = self.pixel_size();
        Vec2::new((x as f32 + 0.5) * s.x, (y as f32 + 0.5) * s.y)
    }

    /// Cell containing a field position, if on screen
    pub fn cell_of(&self, p: Vec2) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 || p.x >= self.bounds.width || p.y >= self.bounds.height {
            return None;
        }
        let s = self.pixel_size();
        let col = (p.x / s.x) as u16;
        let row = (p.y / (s.y * 2.0)) as u16;
        (col < self.cols && row < self.rows).then_some((col, row))
    }
}

/// Opacity of a shadow silhouette `d` px from its centre.
/// Rings stack: every ring whose radius covers the point adds its alpha.
pub fn silhouette_alpha(d: f32, size: f32) -> f32 {
    let mut through = 1.0;
    for i in 1..=SHADOW_RINGS {
        let ring_radius = size * i as f32 / SHADOW_RINGS as f32;
        if d <= ring_radius {
            let a = (40.0 - 6.0 * i as f32).max(0.0) / 255.0;
            through *= 1.0 - a;
        }
    }
    1.0 - through
}

/// Floor, shadows, then the flashlight-cut darkness
pub fn draw_field(frame: &mut Frame, vp: &Viewport, light: &Illumination, shadows: &[Shadow]) {
    frame.map_pixels(|x, y, _| {
        let p = vp.pixel_center(x, y);
        let mut color = FLOOR;
        for s in shadows {
            let d = (p - s.pos).length();
            if d <= s.size {
                color = color.blend(Rgb::BLACK, silhouette_alpha(d, s.size));
            }
        }
        color.blend(NIGHT, light.darkness_at(p))
    });
}

/// Translucent fill over every pixel
pub fn tint_all(frame: &mut Frame, color: Rgb, alpha: f32) {
    frame.map_pixels(|_, _, px| px.blend(color, alpha));
}

/// Translucent fill over the pixels under a cell rectangle
pub fn tint_cells(frame: &mut Frame, col: u16, row: u16, w: u16, h: u16, color: Rgb, alpha: f32) {
    for r in row..row.saturating_add(h) {
        for c in col..col.saturating_add(w) {
            frame.blend_pixel(c as usize, r as usize * 2, color, alpha);
            frame.blend_pixel(c as usize, r as usize * 2 + 1, color, alpha);
        }
    }
}

/// Full-field red sheet shifted vertically by the glitch jitter
pub fn glitch_sheet(frame: &mut Frame, vp: &Viewport, glitch: &Glitch) {
    let color = Rgb::new(glitch.red, 0, 0);
    let offset = glitch.offset_y as f32;
    let height = vp.bounds.height;
    frame.map_pixels(|x, y, px| {
        let sheet_y = vp.pixel_center(x, y).y - offset;
        if (0.0..height).contains(&sheet_y) {
            px.blend(color, glitch.alpha)
        } else {
            px
        }
    });
}
