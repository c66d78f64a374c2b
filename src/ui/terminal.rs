/// crossterm backend: a `Surface` over the real terminal plus the blocking
/// event source the input listener runs on.
///
/// Frames are composed into a `Grid`, then `present()` writes every cell
/// through a buffered writer and flushes once. Full repaint, no diff.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use log::info;

use crate::ui::input::EventSource;
use crate::ui::surface::{Grid, Style, Surface};

pub struct TerminalSurface {
    writer: BufWriter<io::Stdout>,
    grid: Grid,
    active: bool,
}

impl TerminalSurface {
    pub fn new() -> Self {
        TerminalSurface {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            grid: Grid::new(0, 0),
            active: false,
        }
    }

    fn live_size() -> (usize, usize) {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        (tw as usize, th as usize)
    }
}

impl Surface for TerminalSurface {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Color::Black),
            Clear(ClearType::All)
        )?;

        let (w, h) = Self::live_size();
        self.grid.resize(w, h);
        info!("terminal surface ready: {w}x{h}");
        Ok(())
    }

    fn clear(&mut self) {
        // Pick up terminal resizes once per frame.
        let (w, h) = Self::live_size();
        self.grid.resize(w, h);
        self.grid.clear();
    }

    fn set_cell(&mut self, col: i32, row: i32, glyph: char, style: Style) {
        self.grid.set_cell(col, row, glyph, style);
    }

    fn size(&self) -> (usize, usize) {
        Self::live_size()
    }

    fn present(&mut self) -> io::Result<()> {
        let (w, h) = self.grid.size();
        let mut last: Option<Style> = None;

        for y in 0..h {
            queue!(self.writer, MoveTo(0, y as u16))?;
            for x in 0..w {
                let cell = self.grid.get(x, y);
                if last != Some(cell.style) {
                    queue!(
                        self.writer,
                        SetForegroundColor(cell.style.fg),
                        SetBackgroundColor(cell.style.bg),
                    )?;
                    last = Some(cell.style);
                }
                queue!(self.writer, Print(cell.glyph))?;
            }
        }

        self.writer.flush()
    }

    fn shutdown(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

/// Blocking reader over crossterm's global event queue.
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn poll_event(&mut self) -> io::Result<Event> {
        event::read()
    }
}
