//! Terminal emulator backend.
//!
//! Draws the 16x2 grid in a bordered box on the alternate screen so games can
//! be developed on a workstation without the hardware. A 5x8 glyph cannot be
//! reproduced in one terminal cell, so programmed glyphs render as a shade
//! picked by lit-pixel density; backlight-off renders everything dim.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{Attribute, Print, SetAttribute},
    terminal, QueueableCommand,
};

use crate::display::{DisplayBackend, FrameBuffer};
use crate::error::Result;
use crate::sprite::GlyphPattern;
use crate::types::{Symbol, COLS, GLYPH_SLOTS, ROWS};

pub struct TerminalDisplay {
    stdout: io::Stdout,
    grid: FrameBuffer,
    patterns: [Option<GlyphPattern>; GLYPH_SLOTS as usize],
    backlight: bool,
    active: bool,
}

fn shade(pattern: &GlyphPattern) -> char {
    match pattern.lit_pixels() {
        0 => ' ',
        1..=10 => '░',
        11..=20 => '▒',
        21..=30 => '▓',
        _ => '█',
    }
}

impl TerminalDisplay {
    pub fn new(backlight: bool) -> Result<Self> {
        let mut display = Self {
            stdout: io::stdout(),
            grid: FrameBuffer::new(),
            patterns: [None; GLYPH_SLOTS as usize],
            backlight,
            active: false,
        };
        display.enter()?;
        Ok(display)
    }

    fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.draw_border()?;
        self.redraw_all()?;
        self.stdout.flush()?;
        self.active = true;
        Ok(())
    }

    fn draw_border(&mut self) -> Result<()> {
        let horizontal: String = std::iter::repeat('─').take(COLS as usize).collect();
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        self.stdout.queue(Print(format!("┌{horizontal}┐")))?;
        for row in 0..ROWS {
            self.stdout.queue(cursor::MoveTo(0, row as u16 + 1))?;
            self.stdout.queue(Print('│'))?;
            self.stdout.queue(cursor::MoveTo(COLS as u16 + 1, row as u16 + 1))?;
            self.stdout.queue(Print('│'))?;
        }
        self.stdout.queue(cursor::MoveTo(0, ROWS as u16 + 1))?;
        self.stdout.queue(Print(format!("└{horizontal}┘")))?;
        Ok(())
    }

    fn cell_char(&self, symbol: Symbol) -> char {
        match symbol {
            Symbol::Blank => ' ',
            Symbol::Char(c) => c,
            Symbol::Glyph(slot) => match self.patterns.get(slot as usize).and_then(|p| p.as_ref())
            {
                Some(pattern) => shade(pattern),
                None => '?',
            },
        }
    }

    fn queue_cell(&mut self, row: u8, col: u8) -> Result<()> {
        let ch = self.cell_char(self.grid.get(row, col));
        self.stdout
            .queue(cursor::MoveTo(col as u16 + 1, row as u16 + 1))?;
        if self.backlight {
            self.stdout.queue(SetAttribute(Attribute::Reset))?;
        } else {
            self.stdout.queue(SetAttribute(Attribute::Dim))?;
        }
        self.stdout.queue(Print(ch))?;
        Ok(())
    }

    fn redraw_all(&mut self) -> Result<()> {
        for row in 0..ROWS {
            for col in 0..COLS {
                self.queue_cell(row, col)?;
            }
        }
        Ok(())
    }
}

impl DisplayBackend for TerminalDisplay {
    fn program_glyph(&mut self, slot: u8, pattern: &GlyphPattern) -> Result<()> {
        if let Some(entry) = self.patterns.get_mut(slot as usize) {
            *entry = Some(*pattern);
        }
        // Cells already showing this slot pick up the new art.
        for row in 0..ROWS {
            for col in 0..COLS {
                if self.grid.get(row, col) == Symbol::Glyph(slot) {
                    self.queue_cell(row, col)?;
                }
            }
        }
        Ok(())
    }

    fn write_cell(&mut self, row: u8, col: u8, symbol: Symbol) -> Result<()> {
        self.grid.set(row, col, symbol);
        self.queue_cell(row, col)
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.grid.clear();
        self.redraw_all()?;
        self.stdout.flush()?;
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<()> {
        self.backlight = on;
        self.redraw_all()?;
        self.stdout.flush()?;
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let _ = self.stdout.queue(SetAttribute(Attribute::Reset));
        let _ = self.stdout.queue(cursor::Show);
        let _ = self.stdout.queue(terminal::LeaveAlternateScreen);
        let _ = self.stdout.flush();
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_tracks_pattern_density() {
        assert_eq!(shade(&GlyphPattern::default()), ' ');
        assert_eq!(shade(&GlyphPattern([0b00001; 8])), '░');
        assert_eq!(shade(&GlyphPattern([0b00111; 8])), '▓');
        assert_eq!(shade(&GlyphPattern([0b11111; 8])), '█');
    }
}
