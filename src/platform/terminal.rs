//! Terminal display (crossterm)
//!
//! Owns the alternate screen, raw mode and mouse capture for its lifetime.
//! Dropping it restores the terminal, including during a panic unwind.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};

use super::input::InputCollector;
use crate::consts::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::error::DisplayError;
use crate::renderer::{Cell, Frame, Rgb};
use crate::sim::{FieldBounds, TickInput};

/// Where frames go and where input comes from
pub trait Display {
    /// Logical field size, fixed when the display opened
    fn bounds(&self) -> FieldBounds;

    /// Current size in cells (cols, rows)
    fn size(&self) -> (u16, u16);

    /// Drain pending events into one frame's input
    fn poll(&mut self) -> Result<TickInput, DisplayError>;

    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError>;
}

pub struct TerminalDisplay {
    out: Stdout,
    cols: u16,
    rows: u16,
    bounds: FieldBounds,
    /// Cells printed last frame, for diffing
    prev: Vec<Option<Cell>>,
    active: bool,
}

impl TerminalDisplay {
    pub fn open() -> Result<Self, DisplayError> {
        let (cols, rows) = terminal::size().map_err(DisplayError::Init)?;
        if cols == 0 || rows == 0 {
            return Err(DisplayError::EmptySurface { cols, rows });
        }

        terminal::enable_raw_mode().map_err(DisplayError::Init)?;
        let mut display = Self {
            out: io::stdout(),
            cols,
            rows,
            bounds: field_bounds(cols, rows),
            prev: Vec::new(),
            active: true,
        };
        // From here on, an early return drops `display` and restores
        execute!(
            display.out,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            DisableLineWrap,
            Clear(ClearType::All)
        )
        .map_err(DisplayError::Init)?;
        display.reset_diff();

        log::info!(
            "Terminal {}x{} cells, field {:.0}x{:.0}",
            cols,
            rows,
            display.bounds.width,
            display.bounds.height
        );
        Ok(display)
    }

    fn reset_diff(&mut self) {
        self.prev = vec![None; self.cols as usize * self.rows as usize];
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()
    }
}

impl Display for TerminalDisplay {
    fn bounds(&self) -> FieldBounds {
        self.bounds
    }

    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn poll(&mut self) -> Result<TickInput, DisplayError> {
        let mut collector = InputCollector::default();
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if let Event::Resize(cols, rows) = ev {
                log::debug!("Resized to {cols}x{rows}");
                self.cols = cols;
                self.rows = rows;
                self.reset_diff();
                queue!(self.out, Clear(ClearType::All))?;
                continue;
            }
            collector.push(&ev, self.cols, self.rows, self.bounds);
        }
        Ok(collector.finish())
    }

    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let cols = frame.cols().min(self.cols);
        let rows = frame.rows().min(self.rows);
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;
        for y in 0..rows {
            for x in 0..cols {
                let i = y as usize * self.cols as usize + x as usize;
                let c = frame.cell(x, y);
                if self.prev[i] == Some(c) {
                    continue;
                }
                queue!(self.out, cursor::MoveTo(x, y))?;
                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(color(c.fg)))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(color(c.bg)))?;
                    last_bg = Some(c.bg);
                }
                queue!(self.out, Print(c.ch))?;
                self.prev[i] = Some(c);
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("Failed to restore terminal: {e}");
        }
    }
}

/// Logical field for a terminal of `cols` x `rows` cells
pub fn field_bounds(cols: u16, rows: u16) -> FieldBounds {
    FieldBounds::new(
        cols as f32 * CELL_WIDTH_PX,
        rows as f32 * CELL_HEIGHT_PX,
    )
}

fn color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}
