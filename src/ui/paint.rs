/// Painting primitives and the draw phase.
///
/// Every frame is a full repaint: clear, decorate, debug text, objects in
/// render order, present. There is no diffing, so no cell can go stale.

use std::io;

use crate::config::FrameConfig;
use crate::sim::state::SimulationState;
use crate::ui::surface::{Style, Surface};

/// Anchor of the debug line.
const DEBUG_ROW: i32 = 0;
const DEBUG_COL: i32 = 0;

/// Fill every cell of the `width` x `height` block at (row, col).
pub fn fill_rect<S: Surface + ?Sized>(
    surface: &mut S, row: i32, col: i32, width: u16, height: u16, glyph: char, style: Style,
) {
    for r in 0..height as i32 {
        let Some(y) = row.checked_add(r) else { break };
        for c in 0..width as i32 {
            let Some(x) = col.checked_add(c) else { break };
            surface.set_cell(x, y, glyph, style);
        }
    }
}

/// Paint only the perimeter of the block: full top and bottom rows, and the
/// first/last column of the rows in between.
pub fn outline_rect<S: Surface + ?Sized>(
    surface: &mut S, row: i32, col: i32, width: u16, height: u16, glyph: char, style: Style,
) {
    if width == 0 || height == 0 {
        return;
    }
    let (w, h) = (width as i32, height as i32);
    let bottom = row.checked_add(h - 1);
    let right = col.checked_add(w - 1);

    for c in 0..w {
        let Some(x) = col.checked_add(c) else { break };
        surface.set_cell(x, row, glyph, style);
        if let Some(y) = bottom {
            surface.set_cell(x, y, glyph, style);
        }
    }
    for r in 1..h - 1 {
        let Some(y) = row.checked_add(r) else { break };
        surface.set_cell(col, y, glyph, style);
        if let Some(x) = right {
            surface.set_cell(x, y, glyph, style);
        }
    }
}

/// One char per cell, left to right. No wrapping, no truncation.
pub fn print_str<S: Surface + ?Sized>(surface: &mut S, row: i32, col: i32, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        let Some(x) = i32::try_from(i).ok().and_then(|i| col.checked_add(i)) else { break };
        surface.set_cell(x, row, ch, style);
    }
}

/// `print_str` with `col` as the midpoint of the text.
pub fn print_str_center<S: Surface + ?Sized>(surface: &mut S, row: i32, col: i32, text: &str, style: Style) {
    let half = i32::try_from(text.chars().count() / 2).unwrap_or(i32::MAX);
    let start = col.saturating_sub(half);
    print_str(surface, row, start, text, style);
}

/// Draw phase: repaint the whole surface from `state`. Skipped while paused,
/// leaving the last frame on screen.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, state: &SimulationState, frame: &FrameConfig) -> io::Result<()> {
    if state.paused {
        return Ok(());
    }

    let style = Style::default();
    surface.clear();

    if frame.enabled {
        draw_frame(surface, frame, style);
    }

    print_str(surface, DEBUG_ROW, DEBUG_COL, &state.debug_text, style);

    for obj in &state.objects {
        fill_rect(surface, obj.row, obj.col, obj.width, obj.height, obj.glyph, style);
    }

    surface.present()
}

fn draw_frame<S: Surface + ?Sized>(surface: &mut S, frame: &FrameConfig, style: Style) {
    outline_rect(surface, frame.row, frame.col, frame.width, frame.height, frame.symbol, style);
    if !frame.caption.is_empty() {
        let mid = frame.col.saturating_add(frame.width as i32 / 2);
        print_str_center(surface, frame.row, mid, &frame.caption, style);
    }
}
