//! One frame, composed from a session
//!
//! Layer order: lit field with shadows, intro narrative, death overlay,
//! HUD panel, glitch sheet, crosshair.

use super::canvas::{Frame, Glyph, Rgb};
use super::shapes::{Viewport, draw_field, glitch_sheet, tint_all, tint_cells};
use super::text::{centered_col, clip, wrap};
use crate::consts::DEATH_OVERLAY_ALPHA;
use crate::settings::Settings;
use crate::sim::{GameSession, intro_lines};

pub const TITLE: &str = "They Know";
pub const RESTART_HINT: &str = "Press R to restart or ESC to quit";
pub const HUD_TITLE: &str = "Open: (observed)";

const TITLE_COLOR: Rgb = Rgb::new(235, 235, 235);
const INTRO_COLOR: Rgb = Rgb::new(200, 200, 200);
const DEATH_COLOR: Rgb = Rgb::new(220, 30, 30);
const HINT_COLOR: Rgb = Rgb::new(170, 170, 170);
const HUD_COLOR: Rgb = Rgb::new(190, 190, 170);
const HUD_ALPHA: f32 = 0.6;
const CROSSHAIR_COLOR: Rgb = Rgb::new(255, 250, 210);

/// Draw `session` into `frame` (already sized to the terminal)
pub fn compose(frame: &mut Frame, session: &GameSession, settings: &Settings) {
    let vp = Viewport::new(session.bounds, frame.cols(), frame.rows());
    frame.clear_glyphs();

    draw_field(frame, &vp, &session.light, &session.shadows);

    if session.intro_visible() {
        draw_intro(frame, session);
    }
    if let Some(text) = session.death_text() {
        draw_death(frame, text);
    }
    if settings.show_hud {
        draw_hud(frame, session.narrative.hud_processes());
    }
    if let Some(glitch) = &session.glitch {
        glitch_sheet(frame, &vp, glitch);
    }
    if let Some((col, row)) = vp.cell_of(session.pointer) {
        frame.put_glyph(col, row, Glyph { ch: '•', fg: CROSSHAIR_COLOR });
    }
}

fn draw_intro(frame: &mut Frame, session: &GameSession) {
    let (cols, rows) = (frame.cols(), frame.rows());
    frame.put_text(centered_col(TITLE, cols), rows / 6, TITLE, TITLE_COLOR);

    let left = cols / 10;
    let width = (cols - left) as usize;
    let lines = intro_lines(session.narrative.intro_lines(), session.elapsed());
    for (i, line) in lines.iter().enumerate() {
        let row = rows / 4 + i as u16;
        frame.put_text(left, row, clip(line, width), INTRO_COLOR);
    }
}

fn draw_death(frame: &mut Frame, text: &str) {
    tint_all(frame, Rgb::BLACK, DEATH_OVERLAY_ALPHA);
    // The overlay covers everything drawn before it, text included
    frame.clear_glyphs();

    let (cols, rows) = (frame.cols(), frame.rows());
    let left = cols / 6;
    let width = (cols - 2 * left).max(1) as usize;
    let lines = wrap(text, width);
    let top = (rows / 2).saturating_sub(lines.len() as u16 / 2 + 1);
    for (i, line) in lines.iter().enumerate() {
        frame.put_text(left, top + i as u16, line, DEATH_COLOR);
    }
    let hint_row = top + lines.len() as u16 + 1;
    frame.put_text(left, hint_row, clip(RESTART_HINT, width), HINT_COLOR);
}

fn draw_hud(frame: &mut Frame, processes: &[String]) {
    let (cols, rows) = (frame.cols(), frame.rows());
    let mut lines = vec![HUD_TITLE.to_string()];
    lines.extend(processes.iter().map(|p| format!(" - {p}")));

    let max_inner = (cols / 2).saturating_sub(2) as usize;
    let inner = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .min(max_inner);
    let w = inner as u16 + 2;
    let h = lines.len() as u16 + 2;
    if w + 1 > cols || h + 1 > rows {
        return;
    }
    let col = cols - w - 1;
    let row = rows - h - 1;
    tint_cells(frame, col, row, w, h, Rgb::BLACK, HUD_ALPHA);
    for (i, line) in lines.iter().enumerate() {
        frame.put_text(col + 1, row + 1 + i as u16, clip(line, inner), HUD_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::NarrativeText;
    use crate::sim::{FieldBounds, GamePhase, Typewriter};
    use std::time::Duration;

    fn session() -> GameSession {
        let narrative = NarrativeText::new(
            "mara".into(),
            "cellar-box".into(),
            "10.0.0.7".into(),
            vec!["bash".into(), "vim".into()],
            false,
            "23:59:01".into(),
            2026,
        );
        GameSession::new(FieldBounds::new(800.0, 480.0), narrative)
    }

    fn row_text(frame: &Frame, row: u16) -> String {
        (0..frame.cols())
            .map(|c| frame.glyph(c, row).map_or(' ', |g| g.ch))
            .collect()
    }

    fn screen_text(frame: &Frame) -> String {
        (0..frame.rows())
            .map(|r| row_text(frame, r))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_intro_shows_title_and_first_line() {
        let s = session();
        let mut f = Frame::new(100, 30);
        compose(&mut f, &s, &Settings::default());
        assert!(row_text(&f, 5).contains(TITLE));
        assert!(row_text(&f, 7).contains("Welcome, mara."));
        assert!(!screen_text(&f).contains("This is cellar-box."));
    }

    #[test]
    fn test_intro_gone_after_six_seconds() {
        let mut s = session();
        s.clock = Duration::from_secs(6);
        s.phase = GamePhase::Alive;
        let mut f = Frame::new(100, 30);
        compose(&mut f, &s, &Settings::default());
        assert!(!screen_text(&f).contains(TITLE));
    }

    #[test]
    fn test_death_overlay_shows_revealed_text_and_hint() {
        let mut s = session();
        s.clock = Duration::from_secs(10);
        s.phase = GamePhase::Dead;
        let mut reveal = Typewriter::new("Now you are in the dark.", s.clock, Duration::from_millis(50));
        reveal.advance(s.clock + Duration::from_millis(150));
        s.death = Some(reveal);
        let mut f = Frame::new(100, 30);
        compose(&mut f, &s, &Settings::default());
        let text = screen_text(&f);
        assert!(text.contains("Now"));
        assert!(!text.contains("Now you"));
        assert!(text.contains(RESTART_HINT));
    }

    #[test]
    fn test_hud_lists_processes_unless_hidden() {
        let mut s = session();
        s.clock = Duration::from_secs(7);
        let mut f = Frame::new(100, 30);
        compose(&mut f, &s, &Settings::default());
        let text = screen_text(&f);
        assert!(text.contains(HUD_TITLE));
        assert!(text.contains(" - vim"));

        let hidden = Settings {
            show_hud: false,
            ..Settings::default()
        };
        compose(&mut f, &s, &hidden);
        assert!(!screen_text(&f).contains(HUD_TITLE));
    }

    #[test]
    fn test_crosshair_at_pointer() {
        let s = session();
        let mut f = Frame::new(100, 30);
        compose(&mut f, &s, &Settings::default());
        // Pointer starts at the centre (400, 240): cell (50, 15)
        assert_eq!(f.glyph(50, 15).map(|g| g.ch), Some('•'));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut s = session();
        s.phase = GamePhase::Dead;
        s.death = Some(Typewriter::new("x", Duration::ZERO, Duration::from_millis(20)));
        for (c, r) in [(1, 1), (2, 3), (10, 2)] {
            let mut f = Frame::new(c, r);
            compose(&mut f, &s, &Settings::default());
        }
    }
}
