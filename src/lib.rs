//! They Know - a terminal survival horror
//!
//! Core modules:
//! - `sim`: Deterministic simulation (shadows, flashlight, detection, reveal)
//! - `narrative`: Narrative text assembled from host facts, with redaction
//! - `renderer`: Half-block terminal frame composition
//! - `platform`: Host collaborators (system facts, terminal display, frame clock)
//! - `audio`: Ambient loop playback

pub mod app;
pub mod audio;
pub mod error;
pub mod narrative;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AudioError, DisplayError, ObserverError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Frame rate cap
    pub const TARGET_FPS: u32 = 60;
    /// Longest simulated step; slower frames are clamped to this
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical pixels covered by one terminal cell
    pub const CELL_WIDTH_PX: f32 = 8.0;
    pub const CELL_HEIGHT_PX: f32 = 16.0;

    /// Flashlight
    pub const FLASHLIGHT_RADIUS: f32 = 200.0;
    pub const FLICKER_MIN: f32 = 0.8;
    pub const FLICKER_MAX: f32 = 1.2;
    /// Radial falloff is drawn in rings this far apart
    pub const LIGHT_RING_STEP: f32 = 8.0;
    /// Darkness over the whole field before the light is subtracted
    pub const AMBIENT_ALPHA: f32 = 200.0 / 255.0;
    /// Strength of the light mask subtracted from the ambient layer
    pub const LIGHT_MASK_ALPHA: f32 = 220.0 / 255.0;

    /// Shadows
    pub const SHADOW_SPAWN_INTERVAL: f32 = 1.2;
    pub const MAX_SHADOWS: usize = 12;
    /// Distance outside the field before a shadow wraps; also the spawn margin
    pub const FIELD_MARGIN: f32 = 100.0;
    pub const SHADOW_SIZE_MIN: f32 = 30.0;
    pub const SHADOW_SIZE_MAX: f32 = 120.0;
    pub const SHADOW_SPEED_MIN: f32 = 10.0;
    pub const SHADOW_SPEED_MAX: f32 = 60.0;
    /// Per-update chance a shadow turns straight toward the pointer
    pub const NOTICE_CHANCE: f64 = 0.01;
    /// Per-update chance a shadow holds still
    pub const FREEZE_CHANCE: f64 = 0.005;
    /// Silhouette rings (soft edge)
    pub const SHADOW_RINGS: u32 = 6;

    /// Contact: closer than this fraction of the shadow size...
    pub const CONTACT_FACTOR: f32 = 0.6;
    /// ...and farther than this fraction of the light radius
    pub const SAFE_LIGHT_FACTOR: f32 = 0.6;

    /// Narrative
    pub const INTRO_DURATION: f32 = 6.0;
    pub const REVEAL_DELAY_MIN_MS: f32 = 20.0;
    pub const REVEAL_DELAY_MAX_MS: f32 = 80.0;
    pub const MAX_LISTED_PROCESSES: usize = 12;
    pub const HUD_PROCESSES: usize = 5;

    /// Glitch overlay
    pub const GLITCH_CHANCE: f64 = 0.05;
    pub const GLITCH_ALPHA: f32 = 15.0 / 255.0;
    pub const GLITCH_JITTER: i32 = 10;

    /// Death overlay
    pub const DEATH_OVERLAY_ALPHA: f32 = 180.0 / 255.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Heading (radians) pointing from `from` toward `to`
#[inline]
pub fn heading_toward(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector for a heading
#[inline]
pub fn heading_to_vec(heading: f32) -> Vec2 {
    Vec2::new(heading.cos(), heading.sin())
}
