//! Frame buffer: half-block pixels with an optional glyph layer
//!
//! Each terminal cell holds two stacked pixels (top and bottom half).
//! A glyph written into a cell replaces the half-block for that cell and
//! uses the mean of its two pixels as background.

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Source-over blend of `src` onto `self` at `alpha`
    pub fn blend(self, src: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |d: u8, s: u8| -> u8 {
            let out = d as f32 + (s as f32 - d as f32) * a;
            (out.clamp(0.0, 255.0) + 0.5) as u8
        };
        Rgb::new(mix(self.r, src.r), mix(self.g, src.g), mix(self.b, src.b))
    }

    pub fn average(self, other: Rgb) -> Rgb {
        let avg = |a: u8, b: u8| ((a as u16 + b as u16 + 1) / 2) as u8;
        Rgb::new(avg(self.r, other.r), avg(self.g, other.g), avg(self.b, other.b))
    }
}

/// A character drawn on top of the pixel layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
}

/// What the terminal finally prints for one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// Upper half block; foreground paints the top pixel
pub const HALF_BLOCK: char = '▀';

pub struct Frame {
    cols: u16,
    rows: u16,
    pixels: Vec<Rgb>,
    glyphs: Vec<Option<Glyph>>,
}

impl Frame {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cells = cols as usize * rows as usize;
        Self {
            cols,
            rows,
            pixels: vec![Rgb::BLACK; cells * 2],
            glyphs: vec![None; cells],
        }
    }

    /// Reallocate if the terminal size changed
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if cols != self.cols || rows != self.rows {
            *self = Frame::new(cols, rows);
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Pixel columns
    pub fn px_width(&self) -> usize {
        self.cols as usize
    }

    /// Pixel rows (two per cell row)
    pub fn px_height(&self) -> usize {
        self.rows as usize * 2
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
        self.clear_glyphs();
    }

    pub fn clear_glyphs(&mut self) {
        self.glyphs.fill(None);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.px_width() && y < self.px_height() {
            Some(self.pixels[y * self.px_width() + x])
        } else {
            None
        }
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.px_width() && y < self.px_height() {
            let w = self.px_width();
            self.pixels[y * w + x] = color;
        }
    }

    pub fn blend_pixel(&mut self, x: usize, y: usize, color: Rgb, alpha: f32) {
        if let Some(dst) = self.pixel(x, y) {
            self.set_pixel(x, y, dst.blend(color, alpha));
        }
    }

    /// Rewrite every pixel through `f(x, y, current)`
    pub fn map_pixels(&mut self, mut f: impl FnMut(usize, usize, Rgb) -> Rgb) {
        let w = self.px_width();
        if w == 0 {
            return;
        }
        for (i, px) in self.pixels.iter_mut().enumerate() {
            *px = f(i % w, i / w, *px);
        }
    }

    pub fn glyph(&self, col: u16, row: u16) -> Option<Glyph> {
        if col < self.cols && row < self.rows {
            self.glyphs[row as usize * self.cols as usize + col as usize]
        } else {
            None
        }
    }

    pub fn put_glyph(&mut self, col: u16, row: u16, glyph: Glyph) {
        if col < self.cols && row < self.rows {
            self.glyphs[row as usize * self.cols as usize + col as usize] = Some(glyph);
        }
    }

    /// Write `text` from (`col`, `row`), clipped at the right edge.
    /// Returns the number of cells written.
    pub fn put_text(&mut self, col: u16, row: u16, text: &str, fg: Rgb) -> usize {
        if row >= self.rows {
            return 0;
        }
        let mut written = 0;
        for (i, ch) in text.chars().enumerate() {
            let c = col as usize + i;
            if c >= self.cols as usize {
                break;
            }
            self.put_glyph(c as u16, row, Glyph { ch, fg });
            written += 1;
        }
        written
    }

    /// Resolve one cell for output
    pub fn cell(&self, col: u16, row: u16) -> Cell {
        let x = col as usize;
        let top = self.pixel(x, row as usize * 2).unwrap_or_default();
        let bottom = self.pixel(x, row as usize * 2 + 1).unwrap_or_default();
        match self.glyph(col, row) {
            Some(g) => Cell {
                ch: g.ch,
                fg: g.fg,
                bg: top.average(bottom),
            },
            None => Cell {
                ch: HALF_BLOCK,
                fg: top,
                bg: bottom,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        let dst = Rgb::new(100, 100, 100);
        assert_eq!(dst.blend(Rgb::BLACK, 0.0), dst);
        assert_eq!(dst.blend(Rgb::BLACK, 1.0), Rgb::BLACK);
        assert_eq!(dst.blend(Rgb::new(200, 0, 100), 0.5), Rgb::new(150, 50, 100));
    }

    #[test]
    fn test_frame_dimensions() {
        let f = Frame::new(80, 24);
        assert_eq!(f.px_width(), 80);
        assert_eq!(f.px_height(), 48);
        assert!(f.pixel(79, 47).is_some());
        assert!(f.pixel(80, 0).is_none());
    }

    #[test]
    fn test_cell_uses_half_block_or_glyph() {
        let mut f = Frame::new(4, 2);
        f.set_pixel(1, 2, Rgb::new(200, 0, 0));
        f.set_pixel(1, 3, Rgb::new(0, 0, 200));
        let c = f.cell(1, 1);
        assert_eq!(c.ch, HALF_BLOCK);
        assert_eq!(c.fg, Rgb::new(200, 0, 0));
        assert_eq!(c.bg, Rgb::new(0, 0, 200));

        f.put_glyph(1, 1, Glyph { ch: 'x', fg: Rgb::new(1, 2, 3) });
        let c = f.cell(1, 1);
        assert_eq!(c.ch, 'x');
        assert_eq!(c.bg, Rgb::new(100, 0, 100));
    }

    #[test]
    fn test_put_text_clips() {
        let mut f = Frame::new(5, 1);
        assert_eq!(f.put_text(3, 0, "hello", Rgb::BLACK), 2);
        assert_eq!(f.glyph(4, 0).map(|g| g.ch), Some('e'));
        assert_eq!(f.put_text(0, 3, "off", Rgb::BLACK), 0);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut f = Frame::new(2, 2);
        f.put_glyph(0, 0, Glyph { ch: 'a', fg: Rgb::BLACK });
        f.resize(2, 2);
        assert!(f.glyph(0, 0).is_some());
        f.resize(3, 1);
        assert_eq!(f.px_height(), 2);
        assert!(f.glyph(0, 0).is_none());
    }
}
