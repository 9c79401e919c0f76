//! Yes/No confirmation dialog.

use super::header::{HeaderBar, Trigger};
use crate::surface::Surface;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use std::rc::Rc;

const MAX_WIDTH: u16 = 56;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Yes,
    No,
}

/// Centre a `width` × `height` box in `area`, clamped to it.
pub fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// A modal question answered with Y, N, Enter or Escape. The buttons sit in
/// the bottom border.
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    theme: Rc<Theme>,
    title: String,
    message: String,
    buttons: HeaderBar,
    area: Rect,
}

impl ConfirmDialog {
    pub fn new(theme: Rc<Theme>, title: impl Into<String>, message: impl Into<String>) -> Self {
        let buttons = HeaderBar::new(theme.clone(), "")
            .with_button(Trigger::Char('y'), "Yes")
            .with_button(Trigger::Char('n'), "No");
        Self {
            theme,
            title: title.into(),
            message: message.into(),
            buttons,
            area: Rect::default(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Enter means yes and Escape means no; other keys are swallowed.
    pub fn handle_key(&self, key: &KeyEvent) -> Option<ConfirmChoice> {
        match key.code {
            KeyCode::Enter => return Some(ConfirmChoice::Yes),
            KeyCode::Esc => return Some(ConfirmChoice::No),
            _ => {}
        }
        self.buttons.handle_key(key).and_then(Self::choice)
    }

    pub fn handle_click(&self, x: u16, y: u16) -> Option<ConfirmChoice> {
        if !self.area.contains(Position::new(x, y)) {
            return None;
        }
        self.buttons.handle_click(x, y).and_then(Self::choice)
    }

    fn choice(trigger: Trigger) -> Option<ConfirmChoice> {
        match trigger {
            Trigger::Char('y') => Some(ConfirmChoice::Yes),
            Trigger::Char('n') => Some(ConfirmChoice::No),
            _ => None,
        }
    }

    pub fn draw(&mut self, surface: &mut dyn Surface) {
        let (width, height) = surface.size();
        let viewport = Rect::new(0, 0, width, height);
        let box_width = MAX_WIDTH.min(width);
        let inner = box_width.saturating_sub(4).max(1) as usize;
        let lines = textwrap::wrap(&self.message, inner);
        let box_height = (lines.len() as u16).saturating_add(4);
        self.area = centered(box_width, box_height, viewport);

        let area = self.area;
        if area.width < 4 || area.height < 3 {
            return;
        }
        let style = self.theme.overlay_border();
        surface.fill(area, ' ', self.theme.overlay());
        let (left, right) = (area.x, area.right() - 1);
        let (top, bottom) = (area.y, area.bottom() - 1);
        for x in left + 1..right {
            surface.set_cell(x, top, '─', style);
        }
        for y in top + 1..bottom {
            surface.set_cell(left, y, '│', style);
            surface.set_cell(right, y, '│', style);
        }
        surface.set_cell(left, top, '┌', style);
        surface.set_cell(right, top, '┐', style);
        surface.set_cell(left, bottom, '└', style);
        surface.set_cell(right, bottom, '┘', style);
        surface.print(
            left + 1,
            top,
            &format!(" {} ", self.title),
            area.width - 2,
            self.theme.header(),
        );

        for (i, line) in lines.iter().take((area.height - 3) as usize).enumerate() {
            surface.print(
                left + 2,
                top + 2 + i as u16,
                line,
                area.width - 4,
                self.theme.overlay(),
            );
        }

        self.buttons
            .draw(surface, Rect::new(left + 1, bottom, area.width - 2, 1));
        surface.hide_cursor();
    }
}
