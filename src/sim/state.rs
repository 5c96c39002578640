//! Game session state
//!
//! One session is one play-through. It is never reset field by field:
//! a restart builds a fresh `GameSession` and drops the old one.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::field::FieldBounds;
use super::flashlight::Illumination;
use super::glitch::Glitch;
use super::reveal::{Typewriter, intro_active};
use super::shadow::{Shadow, SpawnTimer};
use crate::consts::FLASHLIGHT_RADIUS;
use crate::narrative::NarrativeText;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Narrative is being shown; everything else already runs
    Intro,
    /// Normal play
    Alive,
    /// Caught; the death message types out
    Dead,
}

/// Events emitted by a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Spawned { shadow_id: u32 },
    Died { shadow_id: u32, distance: f32 },
}

/// Complete session state (deterministic given seed and inputs)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub bounds: FieldBounds,
    pub phase: GamePhase,
    /// Session clock: sum of simulated frame deltas
    pub clock: Duration,
    pub shadows: Vec<Shadow>,
    pub spawn_timer: SpawnTimer,
    pub narrative: NarrativeText,
    /// Set on the transition to Dead
    pub death: Option<Typewriter>,
    /// Last pointer position seen
    pub pointer: Vec2,
    /// This frame's light (recomputed every tick)
    pub light: Illumination,
    /// This frame's glitch, if any
    pub glitch: Option<Glitch>,
    next_id: u32,
}

impl GameSession {
    pub fn new(bounds: FieldBounds, narrative: NarrativeText) -> Self {
        let center = bounds.center();
        Self {
            bounds,
            phase: GamePhase::Intro,
            clock: Duration::ZERO,
            shadows: Vec::new(),
            spawn_timer: SpawnTimer::default(),
            narrative,
            death: None,
            pointer: center,
            light: Illumination::new(center, FLASHLIGHT_RADIUS),
            glitch: None,
            next_id: 1,
        }
    }

    /// Seconds since the session began
    pub fn elapsed(&self) -> f32 {
        self.clock.as_secs_f32()
    }

    pub fn is_dead(&self) -> bool {
        self.phase == GamePhase::Dead
    }

    /// True while the intro narrative should be drawn
    pub fn intro_visible(&self) -> bool {
        intro_active(self.elapsed())
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Visible part of the death message, if dead
    pub fn death_text(&self) -> Option<&str> {
        self.death.as_ref().map(Typewriter::prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrative() -> NarrativeText {
        NarrativeText::new(
            "mara".into(),
            "cellar-box".into(),
            "10.0.0.7".into(),
            vec!["bash".into()],
            false,
            "00:00:00".into(),
            2026,
        )
    }

    #[test]
    fn test_new_session_is_empty() {
        let bounds = FieldBounds::new(800.0, 600.0);
        let session = GameSession::new(bounds, narrative());
        assert_eq!(session.phase, GamePhase::Intro);
        assert_eq!(session.elapsed(), 0.0);
        assert!(session.shadows.is_empty());
        assert!(session.death_text().is_none());
        assert_eq!(session.pointer, Vec2::new(400.0, 300.0));
        assert!(session.intro_visible());
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut session = GameSession::new(FieldBounds::new(10.0, 10.0), narrative());
        assert_eq!(session.next_entity_id(), 1);
        assert_eq!(session.next_entity_id(), 2);
    }
}
