/// Display surface: the character grid the draw phase paints into.
///
/// The loop only needs five operations from a backend (clear, set a cell,
/// query the size, present, shut down). `Grid` is the in-memory
/// implementation; the terminal backend composes every frame into one.

use std::io;

use crossterm::style::Color;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
}

impl Default for Style {
    fn default() -> Self {
        Style { fg: Color::White, bg: Color::Black }
    }
}

pub trait Surface {
    fn init(&mut self) -> io::Result<()>;
    fn clear(&mut self);
    /// Paint one cell. Cells outside the surface are silently dropped.
    fn set_cell(&mut self, col: i32, row: i32, glyph: char, style: Style);
    /// Current `(width, height)` in cells.
    fn size(&self) -> (usize, usize);
    fn present(&mut self) -> io::Result<()>;
    fn shutdown(&mut self) -> io::Result<()>;
}

// ── Cell / Grid ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub glyph: char,
    pub style: Style,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        style: Style { fg: Color::White, bg: Color::Black },
    };
}

#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(w: usize, h: usize) -> Self {
        Grid {
            width: w,
            height: h,
            cells: vec![Cell::BLANK; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Rows as plain strings, handy for asserting on a whole frame.
    #[cfg(test)]
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .take(self.height)
            .map(|row| row.iter().map(|c| c.glyph).collect())
            .collect()
    }
}

impl Surface for Grid {
    fn init(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set_cell(&mut self, col: i32, row: i32, glyph: char, style: Style) {
        if col < 0 || row < 0 {
            return;
        }
        let (x, y) = (col as usize, row as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Cell { glyph, style };
        }
    }

    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn shutdown(&mut self) -> io::Result<()> {
        Ok(())
    }
}
