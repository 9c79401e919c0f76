//! Multi-line text area with selection support
//!
//! The inner widget of a multi-line field. It knows nothing about labels,
//! focus traversal or the form; the owning control decides which keys reach
//! it and where it is drawn.

use crate::surface::Surface;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, style::Style};
use std::cmp::Ordering;

/// Position in the editor (row, column), in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

/// Actions that an editing widget may request from its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Put text on the system clipboard
    Copy(String),
    /// Put text on the system clipboard (already removed from the widget)
    Cut(String),
    /// Paste from the system clipboard
    PasteRequest,
}

/// Byte offset of character `col` in `line` (end of line when past it).
pub(crate) fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

/// A multi-line text editor with shift-selection and clipboard actions
#[derive(Debug, Clone)]
pub struct TextEditor {
    lines: Vec<String>,
    cursor: Position,
    /// Selection anchor; the selection runs from here to the cursor
    selection_anchor: Option<Position>,
    /// First visible row
    scroll_row: usize,
    /// First visible column
    scroll_col: usize,
    style: Style,
    selection_style: Style,
}

impl Default for TextEditor {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::default(),
            selection_anchor: None,
            scroll_row: 0,
            scroll_col: 0,
            style: Style::default(),
            selection_style: Style::default(),
        }
    }
}

impl TextEditor {
    /// Create a new text editor with the given content
    pub fn new(content: &str) -> Self {
        let mut editor = Self::default();
        editor.lines = Self::split(content);
        editor
    }

    /// `split('\n')` rather than `lines()` so a trailing newline keeps its
    /// empty last line.
    fn split(content: &str) -> Vec<String> {
        content.split('\n').map(String::from).collect()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get the content as a single string
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Replace the content, keeping the cursor as close as possible
    pub fn set_content(&mut self, content: &str) {
        self.lines = Self::split(content);
        self.selection_anchor = None;
        self.set_cursor(self.cursor.row, self.cursor.col);
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Move the cursor, clamped to the text, and drop the selection
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        let row = row.min(self.lines.len() - 1);
        self.cursor = Position::new(row, col.min(self.line_len(row)));
        self.selection_anchor = None;
    }

    pub fn move_to_start(&mut self) {
        self.set_cursor(0, 0);
    }

    pub fn move_to_end(&mut self) {
        let last = self.lines.len() - 1;
        self.set_cursor(last, self.line_len(last));
    }

    pub fn on_first_line(&self) -> bool {
        self.cursor.row == 0
    }

    pub fn on_last_line(&self) -> bool {
        self.cursor.row + 1 >= self.lines.len()
    }

    /// Check if there's an active selection
    pub fn has_selection(&self) -> bool {
        self.selection_anchor.is_some_and(|a| a != self.cursor)
    }

    /// Get the selected text
    pub fn selected_text(&self) -> Option<String> {
        if !self.has_selection() {
            return None;
        }
        let (start, end) = self.selection_bounds();

        let mut result = String::new();
        for row in start.row..=end.row {
            let line = &self.lines[row];
            let from = if row == start.row { start.col } else { 0 };
            let to = if row == end.row {
                end.col
            } else {
                line.chars().count()
            };
            result.push_str(&line[byte_index(line, from)..byte_index(line, to)]);
            if row < end.row {
                result.push('\n');
            }
        }
        Some(result)
    }

    /// Selection bounds (start, end) in document order
    fn selection_bounds(&self) -> (Position, Position) {
        match self.selection_anchor {
            Some(anchor) if anchor <= self.cursor => (anchor, self.cursor),
            Some(anchor) => (self.cursor, anchor),
            None => (self.cursor, self.cursor),
        }
    }

    /// Delete the selected text and return it
    fn delete_selection(&mut self) -> Option<String> {
        let text = self.selected_text();
        let (start, end) = self.selection_bounds();
        self.selection_anchor = None;
        text.as_ref()?;

        let tail = {
            let end_line = &self.lines[end.row];
            end_line[byte_index(end_line, end.col)..].to_string()
        };
        let start_line = &mut self.lines[start.row];
        start_line.truncate(byte_index(start_line, start.col));
        start_line.push_str(&tail);
        self.lines.drain(start.row + 1..=end.row);

        self.cursor = start;
        text
    }

    /// Select all text
    pub fn select_all(&mut self) {
        self.selection_anchor = Some(Position::new(0, 0));
        let last = self.lines.len() - 1;
        self.cursor = Position::new(last, self.line_len(last));
    }

    /// Paste text at cursor position, replacing any selection
    pub fn paste(&mut self, text: &str) {
        self.delete_selection();
        for c in text.chars() {
            match c {
                '\n' => self.insert_newline(),
                '\r' => {}
                c => self.insert_char(c),
            }
        }
    }

    /// Handle a key event
    ///
    /// Tab, Esc and function keys are never consumed: they belong to the
    /// owner.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<EditorAction> {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match (key.code, ctrl, shift) {
            // Selection with Shift+movement
            (KeyCode::Left, false, true) => self.select_with(Self::move_left),
            (KeyCode::Right, false, true) => self.select_with(Self::move_right),
            (KeyCode::Up, false, true) => self.select_with(Self::move_up),
            (KeyCode::Down, false, true) => self.select_with(Self::move_down),
            (KeyCode::Home, false, true) => self.select_with(|e| e.cursor.col = 0),
            (KeyCode::End, false, true) => {
                self.select_with(|e| e.cursor.col = e.line_len(e.cursor.row))
            }
            (KeyCode::Home, true, true) => self.select_with(|e| e.cursor = Position::new(0, 0)),
            (KeyCode::End, true, true) => self.select_with(|e| {
                let last = e.lines.len() - 1;
                e.cursor = Position::new(last, e.line_len(last));
            }),

            (KeyCode::Char('a'), true, false) => self.select_all(),
            (KeyCode::Char('c'), true, false) => return self.selected_text().map(EditorAction::Copy),
            (KeyCode::Char('x'), true, false) => {
                return self.delete_selection().map(EditorAction::Cut)
            }
            (KeyCode::Char('v'), true, false) => return Some(EditorAction::PasteRequest),

            // Navigation (clears selection)
            (KeyCode::Left, false, false) => self.move_with(Self::move_left),
            (KeyCode::Right, false, false) => self.move_with(Self::move_right),
            (KeyCode::Up, false, false) => self.move_with(Self::move_up),
            (KeyCode::Down, false, false) => self.move_with(Self::move_down),
            (KeyCode::Left, true, false) => self.move_with(Self::move_word_left),
            (KeyCode::Right, true, false) => self.move_with(Self::move_word_right),
            (KeyCode::Home, false, false) => self.move_with(|e| e.cursor.col = 0),
            (KeyCode::End, false, false) => {
                self.move_with(|e| e.cursor.col = e.line_len(e.cursor.row))
            }
            (KeyCode::Home, true, false) => self.move_to_start(),
            (KeyCode::End, true, false) => self.move_to_end(),
            (KeyCode::PageUp, false, false) => self.move_with(|e| {
                e.cursor.row = e.cursor.row.saturating_sub(10);
                e.cursor.col = e.cursor.col.min(e.line_len(e.cursor.row));
            }),
            (KeyCode::PageDown, false, false) => self.move_with(|e| {
                e.cursor.row = (e.cursor.row + 10).min(e.lines.len() - 1);
                e.cursor.col = e.cursor.col.min(e.line_len(e.cursor.row));
            }),

            // Editing
            (KeyCode::Char(c), false, _) => {
                self.delete_selection();
                self.insert_char(c);
            }
            (KeyCode::Enter, false, _) => {
                self.delete_selection();
                self.insert_newline();
            }
            (KeyCode::Backspace, false, _) => {
                if self.delete_selection().is_none() {
                    self.delete_char_before();
                }
            }
            (KeyCode::Delete, false, _) => {
                if self.delete_selection().is_none() {
                    self.delete_char_after();
                }
            }

            // Line operations
            (KeyCode::Char('k'), true, false) => self.delete_line(),
            (KeyCode::Char('u'), true, false) => self.clear_line_before_cursor(),

            _ => {}
        }

        None
    }

    fn select_with(&mut self, movement: impl FnOnce(&mut Self)) {
        if self.selection_anchor.is_none() {
            self.selection_anchor = Some(self.cursor);
        }
        movement(self);
    }

    fn move_with(&mut self, movement: impl FnOnce(&mut Self)) {
        self.selection_anchor = None;
        movement(self);
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|l| l.chars().count()).unwrap_or(0)
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.line_len(self.cursor.row);
        }
    }

    fn move_right(&mut self) {
        if self.cursor.col < self.line_len(self.cursor.row) {
            self.cursor.col += 1;
        } else if !self.on_last_line() {
            self.cursor.row += 1;
            self.cursor.col = 0;
        }
    }

    fn move_up(&mut self) {
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.col = self.cursor.col.min(self.line_len(self.cursor.row));
        }
    }

    fn move_down(&mut self) {
        if !self.on_last_line() {
            self.cursor.row += 1;
            self.cursor.col = self.cursor.col.min(self.line_len(self.cursor.row));
        }
    }

    fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            self.move_left();
            return;
        }
        let chars: Vec<char> = self.lines[self.cursor.row].chars().collect();
        let mut pos = self.cursor.col;
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        self.cursor.col = pos;
    }

    fn move_word_right(&mut self) {
        let chars: Vec<char> = self.lines[self.cursor.row].chars().collect();
        let mut pos = self.cursor.col;
        while pos < chars.len() && !chars[pos].is_whitespace() {
            pos += 1;
        }
        while pos < chars.len() && chars[pos].is_whitespace() {
            pos += 1;
        }
        if pos >= chars.len() && !self.on_last_line() && self.cursor.col == chars.len() {
            self.cursor.row += 1;
            self.cursor.col = 0;
        } else {
            self.cursor.col = pos;
        }
    }

    fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.cursor.row];
        line.insert(byte_index(line, self.cursor.col), c);
        self.cursor.col += 1;
    }

    fn insert_newline(&mut self) {
        let line = &mut self.lines[self.cursor.row];
        let rest = line.split_off(byte_index(line, self.cursor.col));
        self.lines.insert(self.cursor.row + 1, rest);
        self.cursor = Position::new(self.cursor.row + 1, 0);
    }

    fn delete_char_before(&mut self) {
        if self.cursor.col > 0 {
            let line = &mut self.lines[self.cursor.row];
            let from = byte_index(line, self.cursor.col - 1);
            let to = byte_index(line, self.cursor.col);
            line.replace_range(from..to, "");
            self.cursor.col -= 1;
        } else if self.cursor.row > 0 {
            // Merge with previous line
            let current = self.lines.remove(self.cursor.row);
            self.cursor.row -= 1;
            self.cursor.col = self.line_len(self.cursor.row);
            self.lines[self.cursor.row].push_str(&current);
        }
    }

    fn delete_char_after(&mut self) {
        if self.cursor.col < self.line_len(self.cursor.row) {
            let line = &mut self.lines[self.cursor.row];
            let from = byte_index(line, self.cursor.col);
            let to = byte_index(line, self.cursor.col + 1);
            line.replace_range(from..to, "");
        } else if !self.on_last_line() {
            // Merge with next line
            let next = self.lines.remove(self.cursor.row + 1);
            self.lines[self.cursor.row].push_str(&next);
        }
    }

    fn delete_line(&mut self) {
        self.selection_anchor = None;
        if self.lines.len() > 1 {
            self.lines.remove(self.cursor.row);
            self.cursor.row = self.cursor.row.min(self.lines.len() - 1);
            self.cursor.col = self.cursor.col.min(self.line_len(self.cursor.row));
        } else {
            self.lines[0].clear();
            self.cursor.col = 0;
        }
    }

    fn clear_line_before_cursor(&mut self) {
        self.selection_anchor = None;
        let line = &mut self.lines[self.cursor.row];
        line.replace_range(..byte_index(line, self.cursor.col), "");
        self.cursor.col = 0;
    }

    /// Re-clamp the vertical scroll for a view `height` rows tall.
    ///
    /// Enter at the very end of the text can scroll the view before the new
    /// empty line has been laid out; once the owner has grown the view this
    /// pulls the scroll back so no blank rows sit above the text.
    pub fn clamp_scroll(&mut self, height: usize) {
        let max = self.lines.len().saturating_sub(height.max(1));
        self.scroll_row = self.scroll_row.min(max);
    }

    /// First visible row
    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    /// Place the cursor at view cell (x, y) of the last render.
    pub fn click(&mut self, x: usize, y: usize) {
        self.set_cursor(self.scroll_row + y, self.scroll_col + x);
    }

    /// Check if a position is within the selection
    fn is_selected(&self, row: usize, col: usize) -> bool {
        if !self.has_selection() {
            return false;
        }
        let pos = Position::new(row, col);
        let (start, end) = self.selection_bounds();
        pos >= start && pos < end
    }

    /// Render into `area` of `surface`, placing the cursor when focused
    pub fn render(&mut self, surface: &mut dyn Surface, area: Rect, focused: bool) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let height = area.height as usize;
        let width = area.width as usize;

        // Keep the cursor visible
        self.clamp_scroll(height);
        if self.cursor.row >= self.scroll_row + height {
            self.scroll_row = self.cursor.row + 1 - height;
        } else if self.cursor.row < self.scroll_row {
            self.scroll_row = self.cursor.row;
        }
        if self.cursor.col >= self.scroll_col + width {
            self.scroll_col = self.cursor.col + 1 - width;
        } else if self.cursor.col < self.scroll_col {
            self.scroll_col = self.cursor.col;
        }

        surface.fill(area, ' ', self.style);
        let (sel_start, sel_end) = self.selection_bounds();

        for (i, line) in self.lines.iter().enumerate().skip(self.scroll_row).take(height) {
            let y = area.y + (i - self.scroll_row) as u16;
            for (j, c) in line.chars().enumerate().skip(self.scroll_col).take(width) {
                let x = area.x + (j - self.scroll_col) as u16;
                let style = if self.is_selected(i, j) {
                    self.selection_style
                } else {
                    self.style
                };
                surface.set_cell(x, y, c, style);
            }

            // Extend the highlight past the end of fully covered lines
            if self.has_selection() && i >= sel_start.row && i < sel_end.row {
                let len = line.chars().count().max(self.scroll_col);
                if len - self.scroll_col < width {
                    let x = area.x + (len - self.scroll_col) as u16;
                    surface.set_cell(x, y, ' ', self.selection_style);
                }
            }
        }

        if focused {
            surface.show_cursor(
                area.x + (self.cursor.col - self.scroll_col) as u16,
                area.y + (self.cursor.row - self.scroll_row) as u16,
            );
        }
    }

    /// Set the text style
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the selection style
    pub fn selection_style(mut self, style: Style) -> Self {
        self.selection_style = style;
        self
    }
}
