//! Headless display backend.
//!
//! Keeps the full cell grid in memory and records every backend call, so the
//! engine can run on CI or in tests with no hardware and no terminal. The
//! backend is a cheap clone of shared state: keep one clone as a probe and
//! hand the other to the engine, then assert on the probe after `run`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::display::{DisplayBackend, FrameBuffer};
use crate::error::Result;
use crate::sprite::GlyphPattern;
use crate::types::{Symbol, GLYPH_SLOTS};

#[derive(Debug, Default)]
struct Inner {
    grid: FrameBuffer,
    patterns: [Option<GlyphPattern>; GLYPH_SLOTS as usize],
    writes: Vec<(u8, u8, Symbol)>,
    glyphs_programmed: usize,
    flushes: usize,
    backlight: bool,
    shutdowns: usize,
}

#[derive(Debug, Clone)]
pub struct HeadlessDisplay {
    inner: Rc<RefCell<Inner>>,
}

impl Default for HeadlessDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                backlight: true,
                ..Inner::default()
            })),
        }
    }

    pub fn symbol_at(&self, row: u8, col: u8) -> Symbol {
        self.inner.borrow().grid.get(row, col)
    }

    /// Every `write_cell` call since construction, in order.
    pub fn writes(&self) -> Vec<(u8, u8, Symbol)> {
        self.inner.borrow().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.inner.borrow_mut().writes.clear();
    }

    pub fn glyphs_programmed(&self) -> usize {
        self.inner.borrow().glyphs_programmed
    }

    pub fn pattern(&self, slot: u8) -> Option<GlyphPattern> {
        *self.inner.borrow().patterns.get(slot as usize)?
    }

    pub fn flushes(&self) -> usize {
        self.inner.borrow().flushes
    }

    pub fn backlight(&self) -> bool {
        self.inner.borrow().backlight
    }

    pub fn shutdowns(&self) -> usize {
        self.inner.borrow().shutdowns
    }
}

impl DisplayBackend for HeadlessDisplay {
    fn program_glyph(&mut self, slot: u8, pattern: &GlyphPattern) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if let Some(entry) = inner.patterns.get_mut(slot as usize) {
            *entry = Some(*pattern);
        }
        inner.glyphs_programmed += 1;
        Ok(())
    }

    fn write_cell(&mut self, row: u8, col: u8, symbol: Symbol) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.grid.set(row, col, symbol);
        inner.writes.push((row, col, symbol));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.borrow_mut().flushes += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.borrow_mut().grid.clear();
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<()> {
        self.inner.borrow_mut().backlight = on;
        Ok(())
    }

    fn shutdown(&mut self) {
        self.inner.borrow_mut().shutdowns += 1;
    }
}
