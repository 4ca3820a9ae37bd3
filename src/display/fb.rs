//! Fixed 2x16 framebuffer of resolved symbols.
//!
//! The engine recomputes the buffer every frame and diffs it against the
//! previous one so only changed cells reach the backend. Hardware writes are
//! slow; this bounds per-frame I/O to the number of changed cells instead of
//! the full 32-cell grid.

use crate::types::{Symbol, COLS, ROWS};

const CELLS: usize = COLS as usize * ROWS as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    cells: [Symbol; CELLS],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            cells: [Symbol::Blank; CELLS],
        }
    }

    #[inline(always)]
    fn idx(row: u8, col: u8) -> Option<usize> {
        if row >= ROWS || col >= COLS {
            return None;
        }
        Some(row as usize * COLS as usize + col as usize)
    }

    pub fn get(&self, row: u8, col: u8) -> Symbol {
        Self::idx(row, col)
            .map(|i| self.cells[i])
            .unwrap_or_default()
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, row: u8, col: u8, symbol: Symbol) {
        if let Some(i) = Self::idx(row, col) {
            self.cells[i] = symbol;
        }
    }

    pub fn clear(&mut self) {
        self.cells = [Symbol::Blank; CELLS];
    }

    /// Cells whose symbol differs from `prev`, in row-major order.
    pub fn diff<'a>(
        &'a self,
        prev: &'a FrameBuffer,
    ) -> impl Iterator<Item = (u8, u8, Symbol)> + 'a {
        (0..ROWS).flat_map(move |row| {
            (0..COLS).filter_map(move |col| {
                let next = self.get(row, col);
                (next != prev.get(row, col)).then_some((row, col, next))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_blank() {
        let fb = FrameBuffer::new();
        assert_eq!(fb.get(0, 0), Symbol::Blank);
        assert_eq!(fb.get(1, 15), Symbol::Blank);
    }

    #[test]
    fn out_of_range_set_is_ignored() {
        let mut fb = FrameBuffer::new();
        fb.set(2, 0, Symbol::Char('X'));
        fb.set(0, 16, Symbol::Char('X'));
        assert_eq!(fb, FrameBuffer::new());
    }

    #[test]
    fn diff_yields_only_changed_cells() {
        let prev = FrameBuffer::new();
        let mut next = FrameBuffer::new();
        next.set(0, 3, Symbol::Char('A'));
        next.set(1, 7, Symbol::Glyph(2));

        let changed: Vec<_> = next.diff(&prev).collect();
        assert_eq!(
            changed,
            vec![(0, 3, Symbol::Char('A')), (1, 7, Symbol::Glyph(2))]
        );
    }

    #[test]
    fn identical_buffers_diff_to_nothing() {
        let mut a = FrameBuffer::new();
        a.set(1, 1, Symbol::Char('#'));
        let b = a.clone();
        assert_eq!(a.diff(&b).count(), 0);
    }

    #[test]
    fn cell_reverting_to_blank_is_a_change() {
        let mut prev = FrameBuffer::new();
        prev.set(0, 5, Symbol::Char('*'));
        let next = FrameBuffer::new();
        assert_eq!(
            next.diff(&prev).collect::<Vec<_>>(),
            vec![(0, 5, Symbol::Blank)]
        );
    }
}
