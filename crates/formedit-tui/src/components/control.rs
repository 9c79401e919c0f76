//! The field control abstraction shared by the panel and both control kinds.

use super::input::InputField;
use super::multiline::MultilineField;
use super::text_editor::EditorAction;
use crate::compositor::Compositor;
use crate::config::EditorConfig;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use formedit_forms::EditField;
use ratatui::layout::Rect;
use std::rc::Rc;

/// How the user left a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    /// Move to the next field.
    Next,
    /// Move to the previous field.
    Previous,
    /// Save as draft (Escape).
    Draft,
    /// Save ready to send (F10).
    Send,
}

/// Which way focus arrived at a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEntry {
    Forward,
    Backward,
    Pointer,
}

/// Result of handing an event to a control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlOutcome {
    /// Not for this control.
    Ignored,
    /// Consumed; the value is unchanged.
    Handled,
    /// Consumed and the value changed.
    Changed,
    /// The user is done with the field.
    Finished(Finish),
    /// Clipboard work for the owner.
    Action(EditorAction),
    /// Show the field's help.
    Help,
}

/// Map the keys that end editing of any field.
pub fn finish_key(key: &KeyEvent) -> Option<Finish> {
    match key.code {
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => Some(Finish::Previous),
        KeyCode::Tab => Some(Finish::Next),
        KeyCode::BackTab => Some(Finish::Previous),
        KeyCode::Esc => Some(Finish::Draft),
        KeyCode::F(10) => Some(Finish::Send),
        _ => None,
    }
}

/// Draw a field label, truncated to `width`.
pub(crate) fn draw_label(
    canvas: &mut Compositor,
    x: u16,
    y: u16,
    width: u16,
    field: &EditField,
    theme: &Theme,
    focused: bool,
) -> u16 {
    use crate::surface::Surface;
    canvas.print(
        x,
        y,
        &field.label,
        width,
        theme.label(focused, field.has_problem()),
    )
}

/// One editable field on the panel.
#[derive(Debug)]
pub enum FieldControl {
    Input(InputField),
    Multiline(MultilineField),
}

impl FieldControl {
    /// Build the control matching the field's kind.
    pub fn for_field(field: &EditField, theme: Rc<Theme>, config: &EditorConfig) -> Self {
        if field.multiline {
            FieldControl::Multiline(MultilineField::new(theme))
        } else {
            FieldControl::Input(InputField::new(theme, config))
        }
    }

    /// Per-layout preparation (lazy materialization of text areas).
    pub fn prepare(&mut self, field: &EditField) {
        if let FieldControl::Multiline(m) = self {
            m.prepare(field);
        }
    }

    /// Rows needed at `width` with labels `label_width` wide.
    pub fn rows(&self, field: &EditField, width: u16, label_width: u16) -> u16 {
        match self {
            FieldControl::Input(c) => c.rows(field, width, label_width),
            FieldControl::Multiline(c) => c.rows(),
        }
    }

    /// Draw into `area` of the canvas.
    pub fn draw(&mut self, field: &EditField, canvas: &mut Compositor, area: Rect, label_width: u16) {
        match self {
            FieldControl::Input(c) => c.draw(field, canvas, area, label_width),
            FieldControl::Multiline(c) => c.draw(field, canvas, area),
        }
    }

    pub fn handle_key(&mut self, field: &mut EditField, key: KeyEvent) -> ControlOutcome {
        match self {
            FieldControl::Input(c) => c.handle_key(field, key),
            FieldControl::Multiline(c) => c.handle_key(field, key),
        }
    }

    /// A left click at (x, y) relative to the control's first row.
    pub fn handle_click(&mut self, field: &mut EditField, x: u16, y: u16) -> ControlOutcome {
        match self {
            FieldControl::Input(c) => c.handle_click(field, x, y),
            FieldControl::Multiline(c) => c.handle_click(field, x, y),
        }
    }

    /// Paste clipboard text at the cursor.
    pub fn paste(&mut self, field: &mut EditField, text: &str) {
        match self {
            FieldControl::Input(c) => c.paste(field, text),
            FieldControl::Multiline(c) => c.paste(field, text),
        }
    }

    pub fn focus(&mut self, field: &EditField, entry: FocusEntry) {
        match self {
            FieldControl::Input(c) => c.focus(field),
            FieldControl::Multiline(c) => c.focus(entry),
        }
    }

    pub fn blur(&mut self) {
        match self {
            FieldControl::Input(c) => c.blur(),
            FieldControl::Multiline(c) => c.blur(),
        }
    }

    /// Push any value held inside the control into the field.
    pub fn commit(&self, field: &mut EditField) {
        if let FieldControl::Multiline(c) = self {
            c.commit(field);
        }
    }

    /// Row of the cursor relative to the control's first row.
    pub fn cursor_row(&self, field: &EditField, width: u16, label_width: u16) -> u16 {
        match self {
            FieldControl::Input(c) => c.cursor_row(field, width, label_width),
            FieldControl::Multiline(c) => c.cursor_row(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_keys() {
        let key = |code, mods| KeyEvent::new(code, mods);
        assert_eq!(
            finish_key(&key(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Finish::Next)
        );
        assert_eq!(
            finish_key(&key(KeyCode::Tab, KeyModifiers::SHIFT)),
            Some(Finish::Previous)
        );
        assert_eq!(
            finish_key(&key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Finish::Previous)
        );
        assert_eq!(
            finish_key(&key(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Finish::Draft)
        );
        assert_eq!(
            finish_key(&key(KeyCode::F(10), KeyModifiers::NONE)),
            Some(Finish::Send)
        );
        assert_eq!(finish_key(&key(KeyCode::Char('a'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_for_field_picks_kind() {
        let theme = Rc::new(Theme::default());
        let config = EditorConfig::default();
        let single = FieldControl::for_field(&EditField::new("A"), theme.clone(), &config);
        let multi = FieldControl::for_field(&EditField::new("B").multiline(), theme, &config);
        assert!(matches!(single, FieldControl::Input(_)));
        assert!(matches!(multi, FieldControl::Multiline(_)));
    }
}
