//! Terminal events to frame input
//!
//! Everything that arrived since the last frame collapses into one
//! `TickInput`: the last pointer position wins, Quit beats Restart.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use glam::Vec2;

use crate::sim::{Command, FieldBounds, TickInput};

/// Command for a single key press
pub fn map_key(key: &KeyEvent) -> Command {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return Command::None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Command::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        _ => Command::None,
    }
}

/// Keep the stronger of two commands
pub fn merge(a: Command, b: Command) -> Command {
    match (a, b) {
        (Command::Quit, _) | (_, Command::Quit) => Command::Quit,
        (Command::Restart, _) | (_, Command::Restart) => Command::Restart,
        _ => Command::None,
    }
}

/// Centre of a terminal cell in field coordinates
pub fn cell_to_field(col: u16, row: u16, cols: u16, rows: u16, bounds: FieldBounds) -> Vec2 {
    let cw = bounds.width / cols.max(1) as f32;
    let ch = bounds.height / rows.max(1) as f32;
    Vec2::new((col as f32 + 0.5) * cw, (row as f32 + 0.5) * ch)
}

/// Folds terminal events into one frame's input
#[derive(Debug, Default)]
pub struct InputCollector {
    input: TickInput,
}

impl InputCollector {
    /// Apply one event; `cols`/`rows` is the current terminal size
    pub fn push(&mut self, event: &Event, cols: u16, rows: u16, bounds: FieldBounds) {
        match event {
            Event::Key(key) => {
                self.input.command = merge(self.input.command, map_key(key));
            }
            Event::Mouse(mouse) => {
                if matches!(
                    mouse.kind,
                    MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_)
                ) {
                    self.input.pointer =
                        Some(cell_to_field(mouse.column, mouse.row, cols, rows, bounds));
                }
            }
            _ => {}
        }
    }

    pub fn finish(self) -> TickInput {
        self.input
    }
}
