//! Single-line field control.
//!
//! Draws a label and either a one-row text box or, for a field with declared
//! choices that has not been typed into, a strip listing those choices.
//! Cursor and selection are character offsets into the field value; the
//! selection is the half-open range `sel_start..sel_end`.

use super::control::{draw_label, finish_key, ControlOutcome, Finish};
use super::text_editor::{byte_index, EditorAction};
use crate::compositor::Compositor;
use crate::config::EditorConfig;
use crate::surface::Surface;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formedit_forms::EditField;
use ratatui::layout::Rect;
use std::ops::Range;
use std::rc::Rc;

/// Columns taken by the clear toggle and the gap after it.
const TOGGLE_WIDTH: u16 = 4;
/// Indent of a text box stacked under its label.
const STACK_INDENT: u16 = 2;

/// Where the pieces of the control landed, relative to its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Geometry {
    /// Clickable extent of the label on row 0.
    label_extent: u16,
    box_x: u16,
    box_row: u16,
    box_width: u16,
    /// Columns available to the choice strip.
    strip_width: u16,
}

#[derive(Debug)]
pub struct InputField {
    theme: Rc<Theme>,
    choice_slot_width: u16,
    min_input_width: u16,
    cursor: usize,
    sel_start: usize,
    sel_end: usize,
    /// First visible character of the text box.
    scroll: usize,
    /// Set once the user types; hides the choice strip until focus leaves.
    typed: bool,
    focused: bool,
    geometry: Geometry,
    /// Strip hit ranges from the last draw; `None` is the clear toggle.
    hits: Vec<(Range<u16>, Option<usize>)>,
}

impl InputField {
    pub fn new(theme: Rc<Theme>, config: &EditorConfig) -> Self {
        Self {
            theme,
            choice_slot_width: config.choice_slot_width,
            min_input_width: config.min_input_width,
            cursor: 0,
            sel_start: 0,
            sel_end: 0,
            scroll: 0,
            typed: false,
            focused: false,
            geometry: Geometry::default(),
            hits: Vec::new(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current selection as `(start, end)`.
    pub fn selection(&self) -> (usize, usize) {
        (self.sel_start, self.sel_end)
    }

    fn layout(&self, field: &EditField, width: u16, label_width: u16) -> Geometry {
        let label_len = field.label.chars().count() as u16;
        let inline = width.saturating_sub(label_width.saturating_add(1));
        if inline >= self.min_input_width {
            Geometry {
                label_extent: label_len.min(label_width),
                box_x: label_width + 1,
                box_row: 0,
                box_width: preferred_width(field.width, inline),
                strip_width: inline,
            }
        } else {
            let box_x = STACK_INDENT.min(width);
            let avail = width - box_x;
            Geometry {
                label_extent: label_len.min(width),
                box_x,
                box_row: 1,
                box_width: preferred_width(field.width, avail),
                strip_width: avail,
            }
        }
    }

    pub fn rows(&self, field: &EditField, width: u16, label_width: u16) -> u16 {
        self.layout(field, width, label_width).box_row + 1
    }

    pub fn cursor_row(&self, field: &EditField, width: u16, label_width: u16) -> u16 {
        self.layout(field, width, label_width).box_row
    }

    /// Whether the choice strip is showing instead of the text box.
    pub fn showing_choices(&self, field: &EditField) -> bool {
        let n = field.choices.len();
        self.focused
            && !self.typed
            && n > 0
            && (field.value.is_empty() || field.matching_choice(&field.value).is_some())
            && TOGGLE_WIDTH as usize + n * self.choice_slot_width as usize
                <= self.geometry.strip_width as usize
    }

    /// 0 for an empty value, `i + 1` for choice `i`.
    fn choice_stop(&self, field: &EditField) -> usize {
        if field.value.is_empty() {
            return 0;
        }
        field
            .choices
            .iter()
            .position(|c| c.eq_ignore_ascii_case(&field.value))
            .map_or(0, |i| i + 1)
    }

    fn len(field: &EditField) -> usize {
        field.value.chars().count()
    }

    fn sanitize(&mut self, field: &EditField) {
        let len = Self::len(field);
        self.cursor = self.cursor.min(len);
        self.sel_start = self.sel_start.min(len);
        self.sel_end = self.sel_end.min(len);
        if self.sel_start > self.sel_end {
            std::mem::swap(&mut self.sel_start, &mut self.sel_end);
        }
    }

    fn has_selection(&self) -> bool {
        self.sel_start < self.sel_end
    }

    fn collapse(&mut self, pos: usize) {
        self.cursor = pos;
        self.sel_start = pos;
        self.sel_end = pos;
    }

    fn select_all(&mut self, field: &EditField) {
        let len = Self::len(field);
        self.sel_start = 0;
        self.sel_end = len;
        self.cursor = len;
    }

    /// Move the cursor to `pos`, keeping the end of the selection it does
    /// not touch as the anchor.
    fn extend_to(&mut self, pos: usize) {
        let anchor = if self.cursor == self.sel_start {
            self.sel_end
        } else {
            self.sel_start
        };
        self.cursor = pos;
        self.sel_start = anchor.min(pos);
        self.sel_end = anchor.max(pos);
    }

    fn selected_text(&self, field: &EditField) -> Option<String> {
        if !self.has_selection() {
            return None;
        }
        let start = byte_index(&field.value, self.sel_start);
        let end = byte_index(&field.value, self.sel_end);
        Some(field.value[start..end].to_string())
    }

    fn delete_selection(&mut self, field: &mut EditField) -> Option<String> {
        let text = self.selected_text(field)?;
        let start = byte_index(&field.value, self.sel_start);
        let end = byte_index(&field.value, self.sel_end);
        field.value.replace_range(start..end, "");
        self.collapse(self.sel_start);
        Some(text)
    }

    fn insert(&mut self, field: &mut EditField, c: char) {
        self.delete_selection(field);
        let at = byte_index(&field.value, self.cursor);
        field.value.insert(at, c);
        self.collapse(self.cursor + 1);
        self.typed = true;
        self.complete(field);
    }

    /// Type-ahead: complete to the only choice the value is a prefix of.
    fn complete(&mut self, field: &mut EditField) {
        let typed_len = Self::len(field);
        if self.cursor != typed_len || field.value.is_empty() {
            return;
        }
        let prefix = field.value.to_lowercase();
        let mut matches = field
            .choices
            .iter()
            .filter(|c| c.to_lowercase().starts_with(&prefix));
        if let (Some(choice), None) = (matches.next(), matches.next()) {
            let choice = choice.clone();
            field.value = choice;
            let len = Self::len(field);
            self.sel_start = typed_len.min(len);
            self.sel_end = len;
            self.cursor = len;
        }
    }

    fn backspace(&mut self, field: &mut EditField) -> ControlOutcome {
        if self.delete_selection(field).is_some() {
            return ControlOutcome::Changed;
        }
        if self.cursor == 0 {
            return ControlOutcome::Handled;
        }
        let start = byte_index(&field.value, self.cursor - 1);
        let end = byte_index(&field.value, self.cursor);
        field.value.replace_range(start..end, "");
        self.collapse(self.cursor - 1);
        ControlOutcome::Changed
    }

    fn delete(&mut self, field: &mut EditField) -> ControlOutcome {
        if self.delete_selection(field).is_some() {
            return ControlOutcome::Changed;
        }
        if self.cursor >= Self::len(field) {
            return ControlOutcome::Handled;
        }
        let start = byte_index(&field.value, self.cursor);
        let end = byte_index(&field.value, self.cursor + 1);
        field.value.replace_range(start..end, "");
        ControlOutcome::Changed
    }

    fn clear(&mut self, field: &mut EditField) -> ControlOutcome {
        if field.value.is_empty() {
            return ControlOutcome::Handled;
        }
        field.value.clear();
        self.collapse(0);
        ControlOutcome::Changed
    }

    /// Step through the empty value and each choice, wrapping around.
    fn cycle(&mut self, field: &mut EditField, forward: bool) -> ControlOutcome {
        let stops = field.choices.len() + 1;
        let current = self.choice_stop(field);
        let next = if forward {
            (current + 1) % stops
        } else {
            (current + stops - 1) % stops
        };
        field.value = match next {
            0 => String::new(),
            n => field.choices[n - 1].clone(),
        };
        self.select_all(field);
        ControlOutcome::Changed
    }

    pub fn handle_key(&mut self, field: &mut EditField, key: KeyEvent) -> ControlOutcome {
        self.sanitize(field);
        if let Some(finish) = finish_key(&key) {
            return ControlOutcome::Finished(finish);
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        // Shift keeps its text-box meaning so a selection can be extended.
        if self.showing_choices(field) && !ctrl && !shift {
            match key.code {
                KeyCode::Left => return self.cycle(field, false),
                KeyCode::Right => return self.cycle(field, true),
                KeyCode::Backspace | KeyCode::Delete => return self.clear(field),
                _ => {}
            }
        }

        let len = Self::len(field);
        match (key.code, ctrl, shift) {
            (KeyCode::Up, false, false) => ControlOutcome::Finished(Finish::Previous),
            (KeyCode::Down, false, false) | (KeyCode::Enter, false, false) => {
                ControlOutcome::Finished(Finish::Next)
            }

            (KeyCode::Char('a'), true, false) => {
                self.select_all(field);
                ControlOutcome::Handled
            }
            (KeyCode::Char('c'), true, false) => match self.selected_text(field) {
                Some(text) => ControlOutcome::Action(EditorAction::Copy(text)),
                None => ControlOutcome::Handled,
            },
            (KeyCode::Char('x'), true, false) => match self.delete_selection(field) {
                Some(text) => {
                    self.typed = true;
                    ControlOutcome::Action(EditorAction::Cut(text))
                }
                None => ControlOutcome::Handled,
            },
            (KeyCode::Char('v'), true, false) => ControlOutcome::Action(EditorAction::PasteRequest),

            (KeyCode::Left, false, false) => {
                self.collapse(self.cursor.saturating_sub(1));
                ControlOutcome::Handled
            }
            (KeyCode::Right, false, false) => {
                self.collapse((self.cursor + 1).min(len));
                ControlOutcome::Handled
            }
            (KeyCode::Left, false, true) => {
                self.extend_to(self.cursor.saturating_sub(1));
                ControlOutcome::Handled
            }
            (KeyCode::Right, false, true) => {
                self.extend_to((self.cursor + 1).min(len));
                ControlOutcome::Handled
            }
            (KeyCode::Home, _, false) => {
                self.collapse(0);
                ControlOutcome::Handled
            }
            (KeyCode::End, _, false) => {
                self.collapse(len);
                ControlOutcome::Handled
            }
            (KeyCode::Home, _, true) => {
                self.extend_to(0);
                ControlOutcome::Handled
            }
            (KeyCode::End, _, true) => {
                self.extend_to(len);
                ControlOutcome::Handled
            }

            (KeyCode::Backspace, false, _) => {
                self.typed = true;
                self.backspace(field)
            }
            (KeyCode::Delete, false, _) => {
                self.typed = true;
                self.delete(field)
            }
            (KeyCode::Char(c), false, _) if !alt => {
                self.insert(field, c);
                ControlOutcome::Changed
            }
            _ => ControlOutcome::Ignored,
        }
    }

    /// Insert clipboard text, flattening line breaks to spaces.
    pub fn paste(&mut self, field: &mut EditField, text: &str) {
        self.sanitize(field);
        self.delete_selection(field);
        let flat: String = text
            .chars()
            .filter(|&c| c != '\r')
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let at = byte_index(&field.value, self.cursor);
        field.value.insert_str(at, &flat);
        self.collapse(self.cursor + flat.chars().count());
        self.typed = true;
    }

    pub fn handle_click(&mut self, field: &mut EditField, x: u16, y: u16) -> ControlOutcome {
        self.sanitize(field);
        let g = self.geometry;
        if y == 0 && x < g.label_extent {
            return ControlOutcome::Help;
        }
        if y != g.box_row {
            return ControlOutcome::Handled;
        }
        if self.showing_choices(field) {
            let hit = self
                .hits
                .iter()
                .find(|(range, _)| range.contains(&x))
                .map(|(_, choice)| *choice);
            return match hit {
                Some(None) => self.clear(field),
                Some(Some(i)) => match field.choices.get(i).cloned() {
                    Some(choice) => {
                        field.value = choice;
                        self.select_all(field);
                        ControlOutcome::Changed
                    }
                    None => ControlOutcome::Handled,
                },
                None => ControlOutcome::Handled,
            };
        }
        if x >= g.box_x && x < g.box_x + g.box_width {
            let pos = (self.scroll + (x - g.box_x) as usize).min(Self::len(field));
            self.collapse(pos);
        }
        ControlOutcome::Handled
    }

    /// Select the whole value; the strip shows again until the user types.
    pub fn focus(&mut self, field: &EditField) {
        self.focused = true;
        self.typed = false;
        self.select_all(field);
    }

    pub fn blur(&mut self) {
        self.focused = false;
        self.typed = false;
    }

    pub fn draw(&mut self, field: &EditField, canvas: &mut Compositor, area: Rect, label_width: u16) {
        self.sanitize(field);
        self.geometry = self.layout(field, area.width, label_width);
        let g = self.geometry;
        let label_width = if g.box_row == 0 { label_width } else { area.width };
        draw_label(canvas, area.x, area.y, label_width, field, &self.theme, self.focused);

        let y = area.y + g.box_row;
        if self.showing_choices(field) {
            self.draw_choices(field, canvas, area.x, y);
        } else {
            self.hits.clear();
            self.draw_box(field, canvas, area.x, y);
        }
    }

    fn draw_choices(&mut self, field: &EditField, canvas: &mut Compositor, origin: u16, y: u16) {
        let g = self.geometry;
        let current = self.choice_stop(field);
        self.hits.clear();

        let toggle = if current == 0 { "[ ]" } else { "[x]" };
        canvas.print(origin + g.box_x, y, toggle, 3, self.theme.text());
        self.hits.push((g.box_x..g.box_x + 3, None));

        let mut cursor_x = g.box_x + 1;
        let mut x = TOGGLE_WIDTH;
        for (i, choice) in field.choices.iter().enumerate() {
            let remaining = g.strip_width.saturating_sub(x);
            if remaining == 0 {
                break;
            }
            let selected = current == i + 1;
            let written = canvas.print(
                origin + g.box_x + x,
                y,
                choice,
                remaining,
                self.theme.choice(selected),
            );
            self.hits.push((g.box_x + x..g.box_x + x + written, Some(i)));
            if selected {
                cursor_x = g.box_x + x;
            }
            x = x.saturating_add(written + 1);
        }
        canvas.show_cursor(origin + cursor_x, y);
    }

    fn draw_box(&mut self, field: &EditField, canvas: &mut Compositor, origin: u16, y: u16) {
        let g = self.geometry;
        let width = g.box_width as usize;
        if width == 0 {
            return;
        }
        let len = Self::len(field);
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + width {
            self.scroll = self.cursor + 1 - width;
        }
        self.scroll = self.scroll.min((len + 1).saturating_sub(width));

        let x0 = origin + g.box_x;
        let input = self.theme.input();
        canvas.fill(Rect::new(x0, y, g.box_width, 1), ' ', input);

        if field.value.is_empty() && !self.focused {
            canvas.print(x0, y, &field.hint, g.box_width, input.patch(self.theme.hint()));
        } else {
            let selection = self.theme.selection();
            for (i, c) in field.value.chars().enumerate().skip(self.scroll).take(width) {
                let style = if self.focused && i >= self.sel_start && i < self.sel_end {
                    selection
                } else {
                    input
                };
                canvas.set_content(x0 + (i - self.scroll) as u16, y, c, style);
            }
        }
        if self.focused {
            canvas.show_cursor(x0 + (self.cursor - self.scroll) as u16, y);
        }
    }
}

fn preferred_width(requested: u16, avail: u16) -> u16 {
    if requested == 0 {
        avail
    } else {
        requested.min(avail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Position;

    fn control() -> InputField {
        InputField::new(Rc::new(Theme::default()), &EditorConfig::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shift(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::SHIFT)
    }

    fn precedence() -> EditField {
        EditField::new("Precedence").with_choices(["PRIORITY", "ROUTINE"])
    }

    #[test]
    fn test_type_ahead_completes_unique_choice() {
        let mut field = precedence();
        let mut input = control();
        input.focus(&field);

        let outcome = input.handle_key(&mut field, key(KeyCode::Char('P')));
        assert_eq!(outcome, ControlOutcome::Changed);
        assert_eq!(field.value, "PRIORITY");
        assert_eq!(input.selection(), (1, 8));
        assert_eq!(input.cursor(), 8);

        // Typing over the suggestion keeps completing.
        input.handle_key(&mut field, key(KeyCode::Char('r')));
        assert_eq!(field.value, "PRIORITY");
        assert_eq!(input.selection(), (2, 8));
    }

    #[test]
    fn test_arrows_step_one_from_cursor() {
        let mut field =
            EditField::new("Handling").with_choices(["ROUTINE", "PRIORITY", "IMMEDIATE"]);
        let mut input = control();
        input.focus(&field);
        input.handle_key(&mut field, key(KeyCode::Char('P')));
        assert_eq!(input.selection(), (1, 8));

        input.handle_key(&mut field, key(KeyCode::Left));
        assert_eq!(input.cursor(), 7);
        assert_eq!(input.selection(), (7, 7));

        input.handle_key(&mut field, key(KeyCode::Home));
        input.handle_key(&mut field, shift(KeyCode::End));
        input.handle_key(&mut field, key(KeyCode::Right));
        assert_eq!(input.cursor(), 8);
        assert_eq!(input.selection(), (8, 8));
    }

    #[test]
    fn test_shift_extends_while_strip_showing() {
        let mut field = precedence().with_value("ROUTINE");
        let mut input = control();
        let mut canvas = Compositor::new(40, 1);
        input.focus(&field);
        input.draw(&field, &mut canvas, Rect::new(0, 0, 40, 1), 10);
        assert!(input.showing_choices(&field));

        input.handle_key(&mut field, shift(KeyCode::Left));
        assert_eq!(field.value, "ROUTINE");
        assert_eq!(input.selection(), (0, 6));
    }

    #[test]
    fn test_ambiguous_prefix_does_not_complete() {
        let mut field = EditField::new("Kind").with_choices(["PRIORITY", "PERSONAL"]);
        let mut input = control();
        input.focus(&field);
        input.handle_key(&mut field, key(KeyCode::Char('p')));
        assert_eq!(field.value, "p");
        assert_eq!(input.selection(), (1, 1));
    }

    #[test]
    fn test_backspace_removes_suggestion() {
        let mut field = precedence();
        let mut input = control();
        input.focus(&field);
        input.handle_key(&mut field, key(KeyCode::Char('R')));
        assert_eq!(field.value, "ROUTINE");
        input.handle_key(&mut field, key(KeyCode::Backspace));
        assert_eq!(field.value, "R");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_shift_extends_from_cursor_end() {
        let mut field = precedence();
        let mut input = control();
        input.focus(&field);
        input.handle_key(&mut field, key(KeyCode::Char('P')));
        input.handle_key(&mut field, shift(KeyCode::Left));
        assert_eq!(input.selection(), (1, 7));

        input.handle_key(&mut field, key(KeyCode::Home));
        input.handle_key(&mut field, shift(KeyCode::Right));
        input.handle_key(&mut field, shift(KeyCode::Right));
        assert_eq!(input.selection(), (0, 2));
        input.handle_key(&mut field, shift(KeyCode::Left));
        assert_eq!(input.selection(), (0, 1));
    }

    #[test]
    fn test_backspace_on_selection_and_collapse() {
        let mut field = EditField::new("Subject").with_value("abcdef");
        let mut input = control();
        input.focus(&field);
        assert_eq!(input.selection(), (0, 6));

        input.handle_key(&mut field, key(KeyCode::Left));
        assert_eq!(input.cursor(), 5);
        assert_eq!(input.selection(), (5, 5));

        input.handle_key(&mut field, key(KeyCode::End));
        input.handle_key(&mut field, shift(KeyCode::Left));
        input.handle_key(&mut field, shift(KeyCode::Left));
        assert_eq!(input.selection(), (4, 6));
        assert_eq!(
            input.handle_key(&mut field, key(KeyCode::Backspace)),
            ControlOutcome::Changed
        );
        assert_eq!(field.value, "abcd");
        assert_eq!(input.cursor(), 4);

        input.handle_key(&mut field, key(KeyCode::Home));
        input.handle_key(&mut field, key(KeyCode::Delete));
        assert_eq!(field.value, "bcd");
    }

    #[test]
    fn test_up_down_and_finish_keys_leave() {
        let mut field = EditField::new("Subject");
        let mut input = control();
        assert_eq!(
            input.handle_key(&mut field, key(KeyCode::Up)),
            ControlOutcome::Finished(Finish::Previous)
        );
        assert_eq!(
            input.handle_key(&mut field, key(KeyCode::Down)),
            ControlOutcome::Finished(Finish::Next)
        );
        assert_eq!(
            input.handle_key(&mut field, key(KeyCode::Esc)),
            ControlOutcome::Finished(Finish::Draft)
        );
        assert_eq!(input.handle_key(&mut field, key(KeyCode::F(5))), ControlOutcome::Ignored);
    }

    #[test]
    fn test_clipboard_actions() {
        let mut field = EditField::new("Subject").with_value("hello");
        let mut input = control();
        input.focus(&field);
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);

        assert_eq!(
            input.handle_key(&mut field, ctrl('c')),
            ControlOutcome::Action(EditorAction::Copy("hello".into()))
        );
        assert_eq!(
            input.handle_key(&mut field, ctrl('x')),
            ControlOutcome::Action(EditorAction::Cut("hello".into()))
        );
        assert!(field.value.is_empty());
        assert_eq!(
            input.handle_key(&mut field, ctrl('v')),
            ControlOutcome::Action(EditorAction::PasteRequest)
        );

        input.paste(&mut field, "two\nlines");
        assert_eq!(field.value, "two lines");
        assert_eq!(input.cursor(), 9);
    }

    #[test]
    fn test_choice_strip_cycles_and_clears() {
        let mut field = precedence();
        let mut input = control();
        let mut canvas = Compositor::new(40, 1);
        input.focus(&field);
        input.draw(&field, &mut canvas, Rect::new(0, 0, 40, 1), 10);
        assert!(input.showing_choices(&field));

        input.handle_key(&mut field, key(KeyCode::Right));
        assert_eq!(field.value, "PRIORITY");
        input.handle_key(&mut field, key(KeyCode::Right));
        assert_eq!(field.value, "ROUTINE");
        input.handle_key(&mut field, key(KeyCode::Right));
        assert_eq!(field.value, "");
        input.handle_key(&mut field, key(KeyCode::Left));
        assert_eq!(field.value, "ROUTINE");
        assert_eq!(input.selection(), (0, 7));

        input.handle_key(&mut field, key(KeyCode::Backspace));
        assert_eq!(field.value, "");
    }

    #[test]
    fn test_choice_strip_click() {
        let mut field = precedence();
        let mut input = control();
        let mut canvas = Compositor::new(40, 1);
        input.focus(&field);
        input.draw(&field, &mut canvas, Rect::new(0, 0, 40, 1), 10);

        // Toggle at 11..14, PRIORITY at 15..23, ROUTINE at 24..31.
        assert_eq!(canvas.content(15, 0).map(|c| c.0), Some('P'));
        assert_eq!(input.handle_click(&mut field, 25, 0), ControlOutcome::Changed);
        assert_eq!(field.value, "ROUTINE");

        input.draw(&field, &mut canvas, Rect::new(0, 0, 40, 1), 10);
        assert_eq!(canvas.content(12, 0).map(|c| c.0), Some('x'));
        assert_eq!(input.handle_click(&mut field, 12, 0), ControlOutcome::Changed);
        assert_eq!(field.value, "");
    }

    #[test]
    fn test_strip_hidden_when_too_narrow_or_typed() {
        let mut field = precedence();
        let mut input = control();
        let mut canvas = Compositor::new(30, 1);
        input.focus(&field);
        input.draw(&field, &mut canvas, Rect::new(0, 0, 30, 1), 10);
        assert!(!input.showing_choices(&field));

        let mut canvas = Compositor::new(40, 1);
        input.draw(&field, &mut canvas, Rect::new(0, 0, 40, 1), 10);
        assert!(input.showing_choices(&field));
        input.handle_key(&mut field, key(KeyCode::Char('z')));
        assert!(!input.showing_choices(&field));

        input.blur();
        input.focus(&field);
        assert!(!input.showing_choices(&field), "value no longer matches a choice");
    }

    #[test]
    fn test_stacks_under_label_when_narrow() {
        let field = EditField::new("Subject");
        let input = control();
        assert_eq!(input.rows(&field, 40, 10), 1);
        assert_eq!(input.rows(&field, 12, 10), 2);
    }

    #[test]
    fn test_horizontal_scroll_keeps_cursor_visible() {
        let field = EditField::new("Subject").with_value("abcdefghijklmnop");
        let mut input = control();
        let mut canvas = Compositor::new(20, 1);
        input.focus(&field);
        input.draw(&field, &mut canvas, Rect::new(0, 0, 20, 1), 10);

        assert_eq!(canvas.content(11, 0).map(|c| c.0), Some('i'));
        assert_eq!(canvas.content(18, 0).map(|c| c.0), Some('p'));
        assert_eq!(canvas.cursor(), Some(Position::new(19, 0)));
    }

    #[test]
    fn test_clicks() {
        let mut field = EditField::new("Subject").with_value("hello");
        let mut input = control();
        let mut canvas = Compositor::new(30, 1);
        input.focus(&field);
        input.draw(&field, &mut canvas, Rect::new(0, 0, 30, 1), 10);

        assert_eq!(input.handle_click(&mut field, 2, 0), ControlOutcome::Help);
        assert_eq!(input.handle_click(&mut field, 13, 0), ControlOutcome::Handled);
        assert_eq!(input.cursor(), 2);
        assert_eq!(input.selection(), (2, 2));
        input.handle_click(&mut field, 29, 0);
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_unfocused_empty_value_shows_hint() {
        let field = EditField::new("Subject").with_hint("one line");
        let mut input = control();
        let mut canvas = Compositor::new(30, 1);
        input.draw(&field, &mut canvas, Rect::new(0, 0, 30, 1), 10);
        assert_eq!(canvas.content(11, 0).map(|c| c.0), Some('o'));
        assert!(canvas.cursor().is_none());
    }
}
