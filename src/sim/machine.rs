//! Session lifecycle: Intro -> Alive -> Dead -> (Restart | Quit)
//!
//! Owns the random stream and the current session. Restart drops the
//! session and builds a new one from a freshly composed narrative.

use super::field::FieldBounds;
use super::rng::RandomSource;
use super::state::{GameEvent, GameSession};
use super::tick::{Command, TickInput, TickOptions, tick};
use crate::narrative::NarrativeSource;

/// What the frame loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct GameMachine<N> {
    bounds: FieldBounds,
    rng: RandomSource,
    narrative: N,
    options: TickOptions,
    session: GameSession,
    /// Sessions started so far, including the current one
    runs: u32,
}

impl<N: NarrativeSource> GameMachine<N> {
    pub fn new(bounds: FieldBounds, seed: u64, mut narrative: N) -> Self {
        let session = GameSession::new(bounds, narrative.compose());
        log::info!(
            "Session started (seed {}, field {:.0}x{:.0})",
            seed,
            bounds.width,
            bounds.height
        );
        Self {
            bounds,
            rng: RandomSource::new(seed),
            narrative,
            options: TickOptions::default(),
            session,
            runs: 1,
        }
    }

    pub fn with_options(mut self, options: TickOptions) -> Self {
        self.options = options;
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Handle this frame's command, then advance the session
    pub fn step(&mut self, input: &TickInput, dt: f32) -> (Flow, Vec<GameEvent>) {
        match input.command {
            Command::Quit => return (Flow::Quit, Vec::new()),
            Command::Restart if self.session.is_dead() => {
                self.restart();
                return (Flow::Continue, Vec::new());
            }
            Command::Restart | Command::None => {}
        }
        let events = tick(&mut self.session, input, dt, &mut self.rng, self.options);
        (Flow::Continue, events)
    }

    fn restart(&mut self) {
        let pointer = self.session.pointer;
        self.session = GameSession::new(self.bounds, self.narrative.compose());
        // The player's hand did not move
        self.session.pointer = pointer;
        self.runs += 1;
        log::info!("Restarted (run {})", self.runs);
    }
}
