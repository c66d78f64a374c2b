/// Game objects: axis-aligned glyph rectangles moving at a fixed integer velocity.
/// Objects never clamp themselves; bounds policy belongs to the caller.

/// Full block, the body glyph of the snake.
pub const SNAKE_GLYPH: char = '\u{2588}';
/// Filled circle, the apple.
pub const APPLE_GLYPH: char = '\u{25CF}';

/// Resolve a glyph spelled as a single character or by name (`snake`, `apple`).
pub fn glyph_from_name(name: &str) -> Option<char> {
    match name {
        "snake" => Some(SNAKE_GLYPH),
        "apple" => Some(APPLE_GLYPH),
        _ => {
            let mut chars = name.chars();
            let c = chars.next()?;
            chars.next().is_none().then_some(c)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameObject {
    pub row: i32,
    pub col: i32,
    pub width: u16,
    pub height: u16,
    pub vel_row: i32,
    pub vel_col: i32,
    pub glyph: char,
}

impl GameObject {
    pub fn new(row: i32, col: i32, width: u16, height: u16, glyph: char) -> Self {
        GameObject {
            row, col,
            width, height,
            vel_row: 0,
            vel_col: 0,
            glyph,
        }
    }

    pub fn with_velocity(mut self, vel_row: i32, vel_col: i32) -> Self {
        self.vel_row = vel_row;
        self.vel_col = vel_col;
        self
    }

    /// Move one step along the velocity. Positions saturate at the `i32`
    /// range instead of overflowing.
    pub fn advance(&mut self) {
        self.row = self.row.saturating_add(self.vel_row);
        self.col = self.col.saturating_add(self.vel_col);
    }
}

/// Would the next `advance()` take the object above row 0 or past the last row?
///
/// Looks one step ahead and only along the vertical axis, against the live
/// surface height rather than any logical playfield.
pub fn collides_with_wall(obj: &GameObject, surface_height: usize) -> bool {
    let next_row = obj.row as i64 + obj.vel_row as i64;
    let height = i64::try_from(surface_height).unwrap_or(i64::MAX);
    next_row < 0 || next_row >= height
}
