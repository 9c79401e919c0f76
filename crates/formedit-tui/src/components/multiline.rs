//! Multi-line field control.
//!
//! An empty field stays collapsed to its label row until the user asks to
//! edit it; from then on a [`TextEditor`] holds the text, drawn under the
//! label with one blank row after it.

use super::control::{draw_label, finish_key, ControlOutcome, Finish, FocusEntry};
use super::text_editor::TextEditor;
use crate::compositor::Compositor;
use crate::surface::Surface;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formedit_forms::EditField;
use ratatui::layout::Rect;
use std::rc::Rc;

const COLLAPSED_HINT: &str = "(press Enter to edit)";
const INDENT: u16 = 2;

#[derive(Debug)]
enum MultilineState {
    Collapsed,
    Active(TextEditor),
}

#[derive(Debug)]
pub struct MultilineField {
    theme: Rc<Theme>,
    state: MultilineState,
    focused: bool,
}

impl MultilineField {
    pub fn new(theme: Rc<Theme>) -> Self {
        Self {
            theme,
            state: MultilineState::Collapsed,
            focused: false,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, MultilineState::Active(_))
    }

    /// Materialize the text area for a field that already has text.
    pub fn prepare(&mut self, field: &EditField) {
        if !self.is_active() && !field.value.is_empty() {
            self.activate(field);
        }
    }

    fn activate(&mut self, field: &EditField) {
        let editor = TextEditor::new(&field.value)
            .style(self.theme.input())
            .selection_style(self.theme.selection());
        self.state = MultilineState::Active(editor);
    }

    /// Label row, one row per line, and a blank row; 1 while collapsed.
    pub fn rows(&self) -> u16 {
        match &self.state {
            MultilineState::Collapsed => 1,
            MultilineState::Active(editor) => {
                u16::try_from(editor.line_count()).unwrap_or(u16::MAX - 2) + 2
            }
        }
    }

    pub fn cursor_row(&self) -> u16 {
        match &self.state {
            MultilineState::Collapsed => 0,
            MultilineState::Active(editor) => {
                u16::try_from(editor.cursor().row).unwrap_or(u16::MAX - 1) + 1
            }
        }
    }

    pub fn draw(&mut self, field: &EditField, canvas: &mut Compositor, area: Rect) {
        let label_len = draw_label(
            canvas,
            area.x,
            area.y,
            area.width,
            field,
            &self.theme,
            self.focused,
        );
        let hint_x = area.x + label_len + 1;
        let hint_width = area.width.saturating_sub(label_len + 1);

        match &mut self.state {
            MultilineState::Collapsed => {
                let hint = if self.focused {
                    COLLAPSED_HINT
                } else {
                    field.hint.as_str()
                };
                canvas.print(hint_x, area.y, hint, hint_width, self.theme.hint());
                if self.focused {
                    canvas.show_cursor(hint_x.min(area.right().saturating_sub(1)), area.y);
                }
            }
            MultilineState::Active(editor) => {
                let lines = u16::try_from(editor.line_count()).unwrap_or(u16::MAX);
                let text_area = Rect::new(
                    area.x + INDENT.min(area.width),
                    area.y + 1,
                    area.width.saturating_sub(INDENT),
                    lines.min(area.height.saturating_sub(2)),
                );
                editor.render(canvas, text_area, self.focused);
            }
        }
    }

    pub fn handle_key(&mut self, field: &mut EditField, key: KeyEvent) -> ControlOutcome {
        if let Some(finish) = finish_key(&key) {
            self.commit(field);
            return ControlOutcome::Finished(finish);
        }
        let plain = key.modifiers == KeyModifiers::NONE;

        let editor = match &mut self.state {
            MultilineState::Active(editor) => editor,
            MultilineState::Collapsed => {
                return match key.code {
                    KeyCode::Enter => {
                        self.activate(field);
                        ControlOutcome::Handled
                    }
                    KeyCode::Up if plain => ControlOutcome::Finished(Finish::Previous),
                    KeyCode::Down if plain => ControlOutcome::Finished(Finish::Next),
                    KeyCode::Char(_) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.activate(field);
                        self.handle_key(field, key)
                    }
                    _ => ControlOutcome::Ignored,
                };
            }
        };

        match key.code {
            KeyCode::Up if plain && editor.on_first_line() => {
                return ControlOutcome::Finished(Finish::Previous)
            }
            KeyCode::Down if plain && editor.on_last_line() => {
                return ControlOutcome::Finished(Finish::Next)
            }
            _ => {}
        }

        let action = editor.handle_key(key);
        let content = editor.content();
        let changed = content != field.value;
        if changed {
            field.value = content;
        }
        match action {
            Some(action) => ControlOutcome::Action(action),
            None if changed => ControlOutcome::Changed,
            None => ControlOutcome::Handled,
        }
    }

    pub fn handle_click(&mut self, field: &mut EditField, x: u16, y: u16) -> ControlOutcome {
        if y == 0 {
            if (x as usize) < field.label.chars().count() {
                return ControlOutcome::Help;
            }
            if !self.is_active() {
                self.activate(field);
            }
            return ControlOutcome::Handled;
        }
        if let MultilineState::Active(editor) = &mut self.state {
            editor.click(x.saturating_sub(INDENT) as usize, (y - 1) as usize);
        }
        ControlOutcome::Handled
    }

    pub fn paste(&mut self, field: &mut EditField, text: &str) {
        if !self.is_active() {
            self.activate(field);
        }
        if let MultilineState::Active(editor) = &mut self.state {
            editor.paste(text);
            field.value = editor.content();
        }
    }

    /// Forward entry starts at the top of the text, backward entry at the end.
    pub fn focus(&mut self, entry: FocusEntry) {
        self.focused = true;
        if let MultilineState::Active(editor) = &mut self.state {
            match entry {
                FocusEntry::Forward => editor.move_to_start(),
                FocusEntry::Backward => editor.move_to_end(),
                FocusEntry::Pointer => {}
            }
        }
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn commit(&self, field: &mut EditField) {
        if let MultilineState::Active(editor) = &self.state {
            field.value = editor.content();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control() -> MultilineField {
        MultilineField::new(Rc::new(Theme::default()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn row_text(canvas: &Compositor, y: u16) -> String {
        let (w, _) = canvas.size();
        (0..w).filter_map(|x| canvas.content(x, y)).map(|(c, _)| c).collect()
    }

    #[test]
    fn test_rows_follow_line_count() {
        let field = EditField::new("Body").multiline().with_value("line1\nline2");
        let mut text = control();
        assert_eq!(text.rows(), 1);
        text.prepare(&field);
        assert!(text.is_active());
        assert_eq!(text.rows(), 4);
    }

    #[test]
    fn test_empty_field_stays_collapsed_until_enter() {
        let mut field = EditField::new("Body").multiline();
        let mut text = control();
        text.prepare(&field);
        assert_eq!(text.rows(), 1);

        text.focus(FocusEntry::Forward);
        assert_eq!(text.handle_key(&mut field, key(KeyCode::Enter)), ControlOutcome::Handled);
        assert_eq!(text.rows(), 3);
        assert_eq!(text.cursor_row(), 1);
    }

    #[test]
    fn test_collapsed_arrows_leave() {
        let mut field = EditField::new("Body").multiline();
        let mut text = control();
        assert_eq!(
            text.handle_key(&mut field, key(KeyCode::Down)),
            ControlOutcome::Finished(Finish::Next)
        );
        assert_eq!(
            text.handle_key(&mut field, key(KeyCode::Up)),
            ControlOutcome::Finished(Finish::Previous)
        );
    }

    #[test]
    fn test_typing_syncs_value_and_grows() {
        let mut field = EditField::new("Body").multiline();
        let mut text = control();
        text.focus(FocusEntry::Forward);
        assert_eq!(
            text.handle_key(&mut field, key(KeyCode::Char('a'))),
            ControlOutcome::Changed
        );
        assert_eq!(field.value, "a");
        text.handle_key(&mut field, key(KeyCode::Enter));
        assert_eq!(field.value, "a\n");
        assert_eq!(text.rows(), 4);
        assert_eq!(text.cursor_row(), 2);
    }

    #[test]
    fn test_edges_leave_field() {
        let mut field = EditField::new("Body").multiline().with_value("one\ntwo\nthree");
        let mut text = control();
        text.prepare(&field);
        text.focus(FocusEntry::Forward);
        assert_eq!(text.cursor_row(), 1);
        assert_eq!(
            text.handle_key(&mut field, key(KeyCode::Up)),
            ControlOutcome::Finished(Finish::Previous)
        );

        assert_eq!(text.handle_key(&mut field, key(KeyCode::Down)), ControlOutcome::Handled);
        assert_eq!(text.cursor_row(), 2);

        text.focus(FocusEntry::Backward);
        assert_eq!(text.cursor_row(), 3);
        assert_eq!(
            text.handle_key(&mut field, key(KeyCode::Down)),
            ControlOutcome::Finished(Finish::Next)
        );
    }

    #[test]
    fn test_draw_collapsed_hint() {
        let field = EditField::new("Body").multiline().with_hint("free text");
        let mut text = control();
        let mut canvas = Compositor::new(40, 1);
        text.draw(&field, &mut canvas, Rect::new(0, 0, 40, 1));
        assert!(row_text(&canvas, 0).starts_with("Body free text"));

        text.focus(FocusEntry::Forward);
        text.draw(&field, &mut canvas, Rect::new(0, 0, 40, 1));
        assert!(row_text(&canvas, 0).starts_with("Body (press Enter to edit)"));
    }

    #[test]
    fn test_draw_active_places_cursor() {
        let field = EditField::new("Body").multiline().with_value("ab\ncd");
        let mut text = control();
        text.prepare(&field);
        text.focus(FocusEntry::Backward);
        let mut canvas = Compositor::new(20, 4);
        text.draw(&field, &mut canvas, Rect::new(0, 0, 20, 4));
        assert_eq!(row_text(&canvas, 1).trim_end(), "  ab");
        assert_eq!(row_text(&canvas, 2).trim_end(), "  cd");
        assert_eq!(canvas.cursor(), Some(ratatui::layout::Position::new(4, 2)));
    }

    #[test]
    fn test_click_label_and_text() {
        let mut field = EditField::new("Body").multiline().with_value("hello\nworld");
        let mut text = control();
        text.prepare(&field);
        let mut canvas = Compositor::new(20, 4);
        text.draw(&field, &mut canvas, Rect::new(0, 0, 20, 4));

        assert_eq!(text.handle_click(&mut field, 1, 0), ControlOutcome::Help);
        text.handle_click(&mut field, 5, 2);
        assert_eq!(text.cursor_row(), 2);
    }
}
