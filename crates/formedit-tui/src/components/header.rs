//! Title and button strip.
//!
//! A header bar draws a horizontal rule with its title on the left and its
//! buttons right-aligned. Pressing a button's key or clicking its label hands
//! the button's [`Trigger`] back to the owner, which decides what it means.

use crate::surface::Surface;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use std::ops::Range;
use std::rc::Rc;

/// What activates a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A single character, matched case-insensitively.
    Char(char),
    /// The Escape key.
    Escape,
    /// The send key (F10).
    Send,
}

impl Trigger {
    pub fn matches(&self, key: &KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match (self, key.code) {
            (Trigger::Char(c), KeyCode::Char(k)) => c.to_lowercase().eq(k.to_lowercase()),
            (Trigger::Escape, KeyCode::Esc) => true,
            (Trigger::Send, KeyCode::F(10)) => true,
            _ => false,
        }
    }

    fn key_name(&self) -> String {
        match self {
            Trigger::Char(c) => c.to_uppercase().collect(),
            Trigger::Escape => "Esc".to_string(),
            Trigger::Send => "F10".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Button {
    trigger: Trigger,
    label: String,
    enabled: bool,
    /// Columns of the last draw; empty when it did not fit.
    columns: Range<u16>,
}

impl Button {
    fn text(&self) -> String {
        format!(" {}:{} ", self.trigger.key_name(), self.label)
    }
}

#[derive(Debug, Clone)]
pub struct HeaderBar {
    theme: Rc<Theme>,
    title: String,
    buttons: Vec<Button>,
    row: u16,
}

impl HeaderBar {
    pub fn new(theme: Rc<Theme>, title: impl Into<String>) -> Self {
        Self {
            theme,
            title: title.into(),
            buttons: Vec::new(),
            row: 0,
        }
    }

    /// Add a button; buttons are laid out left to right in insertion order.
    pub fn with_button(mut self, trigger: Trigger, label: impl Into<String>) -> Self {
        self.buttons.push(Button {
            trigger,
            label: label.into(),
            enabled: true,
            columns: 0..0,
        });
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_enabled(&mut self, trigger: Trigger, enabled: bool) {
        for button in self.buttons.iter_mut().filter(|b| b.trigger == trigger) {
            button.enabled = enabled;
        }
    }

    pub fn is_enabled(&self, trigger: Trigger) -> bool {
        self.buttons
            .iter()
            .any(|b| b.trigger == trigger && b.enabled)
    }

    pub fn handle_key(&self, key: &KeyEvent) -> Option<Trigger> {
        self.buttons
            .iter()
            .find(|b| b.enabled && b.trigger.matches(key))
            .map(|b| b.trigger)
    }

    /// Hit-test a left click in surface coordinates.
    pub fn handle_click(&self, x: u16, y: u16) -> Option<Trigger> {
        if y != self.row {
            return None;
        }
        self.buttons
            .iter()
            .find(|b| b.enabled && b.columns.contains(&x))
            .map(|b| b.trigger)
    }

    /// Draw on the first row of `area`.
    pub fn draw(&mut self, surface: &mut dyn Surface, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.row = area.y;
        surface.fill(Rect::new(area.x, area.y, area.width, 1), '─', self.theme.rule());

        let title_end = if self.title.is_empty() {
            area.x
        } else {
            let title = format!(" {} ", self.title);
            let written = surface.print(
                area.x + 1,
                area.y,
                &title,
                area.width.saturating_sub(1),
                self.theme.header(),
            );
            area.x + 1 + written
        };

        let mut right = area.right().saturating_sub(1);
        for button in self.buttons.iter_mut().rev() {
            let text = button.text();
            let width = text.chars().count() as u16;
            if right < title_end + width {
                button.columns = 0..0;
                continue;
            }
            let x = right - width;
            surface.print(x, area.y, &text, width, self.theme.button(button.enabled));
            button.columns = x..right;
            right = x;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::Compositor;

    fn bar() -> HeaderBar {
        HeaderBar::new(Rc::new(Theme::default()), "Message")
            .with_button(Trigger::Escape, "Save Draft")
            .with_button(Trigger::Send, "Send")
    }

    fn row_text(canvas: &Compositor, y: u16) -> String {
        let (w, _) = canvas.size();
        (0..w).filter_map(|x| canvas.content(x, y)).map(|(c, _)| c).collect()
    }

    #[test]
    fn test_char_trigger_is_case_insensitive() {
        let header = HeaderBar::new(Rc::new(Theme::default()), "Confirm")
            .with_button(Trigger::Char('y'), "Yes");
        let upper = KeyEvent::new(KeyCode::Char('Y'), KeyModifiers::SHIFT);
        let lower = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE);
        let ctrl = KeyEvent::new(KeyCode::Char('y'), KeyModifiers::CONTROL);
        assert_eq!(header.handle_key(&upper), Some(Trigger::Char('y')));
        assert_eq!(header.handle_key(&lower), Some(Trigger::Char('y')));
        assert_eq!(header.handle_key(&ctrl), None);
    }

    #[test]
    fn test_special_keys() {
        let header = bar();
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let f10 = KeyEvent::new(KeyCode::F(10), KeyModifiers::NONE);
        assert_eq!(header.handle_key(&esc), Some(Trigger::Escape));
        assert_eq!(header.handle_key(&f10), Some(Trigger::Send));
    }

    #[test]
    fn test_draw_records_click_ranges() {
        let mut header = bar();
        let mut canvas = Compositor::new(50, 1);
        header.draw(&mut canvas, Rect::new(0, 0, 50, 1));

        let text = row_text(&canvas, 0);
        assert!(text.starts_with("─ Message ─"));
        assert!(text.ends_with(" Esc:Save Draft  F10:Send ─"));

        // " F10:Send " spans 39..49.
        assert_eq!(header.handle_click(40, 0), Some(Trigger::Send));
        assert_eq!(header.handle_click(30, 0), Some(Trigger::Escape));
        assert_eq!(header.handle_click(5, 0), None);
        assert_eq!(header.handle_click(40, 1), None);
    }

    #[test]
    fn test_disabled_button_ignores_input() {
        let mut header = bar();
        let mut canvas = Compositor::new(50, 1);
        header.set_enabled(Trigger::Send, false);
        header.draw(&mut canvas, Rect::new(0, 0, 50, 1));

        assert!(!header.is_enabled(Trigger::Send));
        let f10 = KeyEvent::new(KeyCode::F(10), KeyModifiers::NONE);
        assert_eq!(header.handle_key(&f10), None);
        assert_eq!(header.handle_click(40, 0), None);
    }

    #[test]
    fn test_buttons_dropped_when_too_narrow() {
        let mut header = bar();
        let mut canvas = Compositor::new(24, 1);
        header.draw(&mut canvas, Rect::new(0, 0, 24, 1));
        assert_eq!(header.handle_click(15, 0), Some(Trigger::Send));
        assert_eq!(header.handle_click(11, 0), None);
        assert!(!row_text(&canvas, 0).contains("Esc"));
    }
}
