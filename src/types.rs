//! Core types shared across the engine.
//! This module contains pure data types with no external dependencies.

/// Display dimensions (HD44780-class 16x2 module).
pub const COLS: u8 = 16;
pub const ROWS: u8 = 2;

/// Number of programmable custom-character slots the hardware provides.
pub const GLYPH_SLOTS: u8 = 8;

/// Custom-character pixel dimensions.
pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 8;

/// Default game-loop cadence.
pub const DEFAULT_FPS: u32 = 10;

/// Minimum stability window for physical-signal debouncing (milliseconds).
pub const DEBOUNCE_WINDOW_MS: u64 = 20;

/// Auto-release timeout for terminals that never emit key-release events
/// (milliseconds).
pub const KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Analog joystick axis thresholds (normalized 0.0..=1.0).
pub const JOYSTICK_LOW: f32 = 0.3;
pub const JOYSTICK_HIGH: f32 = 0.7;

/// A grid position in display cells.
///
/// Signed so objects can sit off-screen while scrolling in or out; the render
/// pass skips anything outside the 16x2 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Map to a `(row, col)` cell, or `None` when off-grid.
    pub fn cell(&self) -> Option<(u8, u8)> {
        if self.x < 0 || self.x >= COLS as i32 || self.y < 0 || self.y >= ROWS as i32 {
            return None;
        }
        Some((self.y as u8, self.x as u8))
    }
}

/// What a game object's render hook produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// A literal printable character.
    Char(char),
    /// One of the 8 custom-character slots.
    Slot(u8),
}

/// A resolved framebuffer cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Symbol {
    #[default]
    Blank,
    Char(char),
    /// A programmed custom-character slot.
    Glyph(u8),
}

/// Immutable per-frame input state: four directions (8-way combinations
/// allowed) plus two action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub button_a: bool,
    pub button_b: bool,
}

impl InputSnapshot {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down || self.button_a || self.button_b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_maps_to_row_col() {
        assert_eq!(Position::new(0, 0).cell(), Some((0, 0)));
        assert_eq!(Position::new(15, 1).cell(), Some((1, 15)));
        assert_eq!(Position::new(3, 1).cell(), Some((1, 3)));
    }

    #[test]
    fn off_grid_positions_have_no_cell() {
        assert_eq!(Position::new(-1, 0).cell(), None);
        assert_eq!(Position::new(16, 0).cell(), None);
        assert_eq!(Position::new(0, 2).cell(), None);
        assert_eq!(Position::new(0, -1).cell(), None);
    }
}
