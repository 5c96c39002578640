//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta-time driven, never frame-count driven
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No terminal, audio or OS dependencies

pub mod field;
pub mod flashlight;
pub mod glitch;
pub mod machine;
pub mod proximity;
pub mod reveal;
pub mod rng;
pub mod shadow;
pub mod state;
pub mod tick;

pub use field::FieldBounds;
pub use flashlight::{Flashlight, Illumination};
pub use glitch::Glitch;
pub use machine::{Flow, GameMachine};
pub use proximity::{Contact, evaluate, is_fatal};
pub use reveal::{Typewriter, intro_active, intro_lines};
pub use rng::RandomSource;
pub use shadow::{Shadow, SpawnTimer};
pub use state::{GameEvent, GamePhase, GameSession};
pub use tick::{Command, TickInput, TickOptions, tick};
