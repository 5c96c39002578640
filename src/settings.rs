//! Runtime settings and preferences
//!
//! Read once at startup from a JSON file; never written back. Nothing here
//! touches gameplay tuning, which lives in `consts`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming an explicit settings file
pub const SETTINGS_ENV: &str = "THEY_KNOW_SETTINGS";

/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "they-know.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame-rate cap
    pub fps_cap: u32,
    /// Fixed seed for the random stream (None = random each launch)
    pub seed: Option<u64>,

    // === Audio ===
    /// Looping ambient track
    pub ambient_path: PathBuf,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no glitch flashes)
    pub reduced_motion: bool,

    // === HUD ===
    /// Show the observed-process panel
    pub show_hud: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps_cap: crate::consts::TARGET_FPS,
            seed: None,

            // Audio
            ambient_path: PathBuf::from("ambient.ogg"),
            master_volume: 0.8,
            music_volume: 0.7,
            muted: false,

            // Accessibility
            reduced_motion: false,

            // HUD
            show_hud: true,
        }
    }
}

impl Settings {
    /// Whether the glitch overlay may fire (respects reduced_motion)
    pub fn glitches_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// Volume actually applied to the ambient loop
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        }
    }

    /// Load from `$THEY_KNOW_SETTINGS`, else `./they-know.json`, else defaults
    pub fn load() -> Self {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from(SETTINGS_FILE)).filter(|p| p.exists()));

        match path {
            Some(path) => Self::load_from(&path),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load from a specific file, falling back to defaults on any failure
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
