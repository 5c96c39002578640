//! Time-paced narrative disclosure
//!
//! Two flavours: the death message types out character by character at a
//! per-episode delay, while intro lines appear whole, one per elapsed second.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::{INTRO_DURATION, REVEAL_DELAY_MAX_MS, REVEAL_DELAY_MIN_MS};

/// Character-by-character reveal of one string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typewriter {
    text: String,
    started_at: Duration,
    delay: Duration,
    /// Characters shown so far (never decreases)
    shown: usize,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, started_at: Duration, delay: Duration) -> Self {
        Self {
            text: text.into(),
            started_at,
            delay,
            shown: 0,
        }
    }

    /// Start a reveal with a delay drawn once for the whole episode
    pub fn with_random_delay(
        text: impl Into<String>,
        started_at: Duration,
        rng: &mut RandomSource,
    ) -> Self {
        let ms = rng.uniform(REVEAL_DELAY_MIN_MS, REVEAL_DELAY_MAX_MS);
        Self::new(text, started_at, Duration::from_secs_f32(ms / 1000.0))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn started_at(&self) -> Duration {
        self.started_at
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn shown_chars(&self) -> usize {
        self.shown
    }

    pub fn is_complete(&self) -> bool {
        self.shown >= self.char_count()
    }

    /// Visible prefix at `now`: `floor((now - start) / delay)` characters,
    /// clamped to the text length
    pub fn advance(&mut self, now: Duration) -> &str {
        let due = self.chars_due(now);
        self.shown = self.shown.max(due);
        self.prefix()
    }

    /// Prefix currently shown, without advancing
    pub fn prefix(&self) -> &str {
        match self.text.char_indices().nth(self.shown) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    fn chars_due(&self, now: Duration) -> usize {
        let since = now.saturating_sub(self.started_at);
        let delay = self.delay.as_nanos();
        let due = if delay == 0 {
            usize::MAX
        } else {
            usize::try_from(since.as_nanos() / delay).unwrap_or(usize::MAX)
        };
        due.min(self.char_count())
    }
}

/// Intro lines visible after `elapsed` seconds of session time
///
/// Line `i` shows once `elapsed >= i`; later lines are withheld entirely.
/// Nothing is shown once the intro is over.
pub fn intro_lines(lines: &[String], elapsed: f32) -> &[String] {
    if !intro_active(elapsed) {
        return &[];
    }
    let count = (elapsed.max(0.0).floor() as usize + 1).min(lines.len());
    &lines[..count]
}

/// True while the intro narrative is still drawn
pub fn intro_active(elapsed: f32) -> bool {
    elapsed < INTRO_DURATION
}
