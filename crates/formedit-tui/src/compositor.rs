//! Off-screen canvas that field controls draw into.
//!
//! Controls render as if they owned a canvas as tall as all of their rows
//! together; the panel then copies the visible window onto the real surface.
//! Scrolling and clipping therefore never reach the controls.

use crate::surface::Surface;
use ratatui::{
    layout::{Position, Rect},
    style::Style,
};

const BLANK: (char, Style) = (' ', Style::new());

/// A width×height grid of styled cells plus a logical cursor.
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    width: u16,
    height: u16,
    cells: Vec<(char, Style)>,
    cursor: Option<Position>,
}

impl Compositor {
    pub fn new(width: u16, height: u16) -> Self {
        let mut compositor = Self::default();
        compositor.set_size(width, height);
        compositor
    }

    /// Resize the canvas and hide the cursor.
    ///
    /// The backing store is only reallocated when the size actually changes.
    pub fn set_size(&mut self, width: u16, height: u16) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.cells = vec![BLANK; width as usize * height as usize];
        }
        self.cursor = None;
    }

    /// Blank every cell.
    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Write one cell.
    pub fn set_content(&mut self, x: u16, y: u16, symbol: char, style: Style) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = (symbol, style);
        }
    }

    /// Read one cell.
    pub fn content(&self, x: u16, y: u16) -> Option<(char, Style)> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Logical cursor, if shown.
    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    /// Copy `source` (canvas coordinates) onto `target` with its top-left
    /// corner at `dest`.
    pub fn copy(&self, source: Rect, dest: Position, target: &mut dyn Surface) {
        let source = source.intersection(Rect::new(0, 0, self.width, self.height));
        for dy in 0..source.height {
            for dx in 0..source.width {
                if let Some((symbol, style)) = self.content(source.x + dx, source.y + dy) {
                    target.set_cell(dest.x + dx, dest.y + dy, symbol, style);
                }
            }
        }
    }

    /// Where the logical cursor lands on the target after a [`copy`] of
    /// `source` to `dest`, or `None` when it lies outside the window.
    ///
    /// [`copy`]: Compositor::copy
    pub fn translate_cursor(&self, source: Rect, dest: Position) -> Option<Position> {
        let cursor = self.cursor?;
        if source.contains(cursor) {
            Some(Position::new(
                dest.x + (cursor.x - source.x),
                dest.y + (cursor.y - source.y),
            ))
        } else {
            None
        }
    }
}

impl Surface for Compositor {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn set_cell(&mut self, x: u16, y: u16, symbol: char, style: Style) {
        self.set_content(x, y, symbol, style);
    }

    fn cell(&self, x: u16, y: u16) -> Option<(char, Style)> {
        self.content(x, y)
    }

    fn show_cursor(&mut self, x: u16, y: u16) {
        self.cursor = Some(Position::new(x, y));
    }

    fn hide_cursor(&mut self) {
        self.cursor = None;
    }
}
