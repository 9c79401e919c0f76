//! Help overlay anchored to a field.

use crate::surface::Surface;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use std::rc::Rc;

const NO_HELP: &str = "No help is available for this field.";
/// Border plus one column of padding on each side.
const H_PADDING: u16 = 4;
/// Top and bottom border.
const V_PADDING: u16 = 2;

/// Where an overlay of `width` × `height` goes for `anchor` inside
/// `viewport`: below the anchor when that fits, else on whichever side has
/// more rows, clamped to them.
pub fn placement(anchor: Rect, viewport: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(viewport.width);
    let below = viewport.bottom().saturating_sub(anchor.bottom());
    let above = anchor.y.saturating_sub(viewport.y);

    let (y, height) = if height <= below || below >= above {
        (anchor.bottom(), height.min(below))
    } else {
        let height = height.min(above);
        (anchor.y - height, height)
    };
    let x = anchor
        .x
        .min(viewport.right().saturating_sub(width))
        .max(viewport.x);
    Rect::new(x, y, width, height)
}

/// Modal box showing a field's help text.
#[derive(Debug, Clone)]
pub struct HelpOverlay {
    theme: Rc<Theme>,
    title: String,
    text: String,
    anchor: Rect,
    preferred_width: u16,
    scroll: u16,
    /// Area of the last draw, for outside-click detection.
    area: Rect,
}

impl HelpOverlay {
    pub fn new(
        theme: Rc<Theme>,
        title: impl Into<String>,
        text: impl Into<String>,
        anchor: Rect,
        preferred_width: u16,
    ) -> Self {
        let text = text.into();
        Self {
            theme,
            title: title.into(),
            text: if text.trim().is_empty() {
                NO_HELP.to_string()
            } else {
                text
            },
            anchor,
            preferred_width,
            scroll: 0,
            area: Rect::default(),
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    fn wrapped(&self, width: u16) -> Vec<String> {
        let inner = width.saturating_sub(H_PADDING).max(1) as usize;
        self.text
            .lines()
            .flat_map(|paragraph| {
                if paragraph.is_empty() {
                    vec![String::new()]
                } else {
                    textwrap::wrap(paragraph, inner)
                        .into_iter()
                        .map(|line| line.into_owned())
                        .collect()
                }
            })
            .collect()
    }

    /// Returns true when the overlay should close. Every other key is
    /// swallowed; Up/Down scroll text that did not fit.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => true,
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                false
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                false
            }
            _ => false,
        }
    }

    /// Returns true for a click outside the overlay.
    pub fn handle_click(&self, x: u16, y: u16) -> bool {
        !self.area.contains(ratatui::layout::Position::new(x, y))
    }

    pub fn draw(&mut self, surface: &mut dyn Surface) {
        let (width, height) = surface.size();
        let viewport = Rect::new(0, 0, width, height);
        let box_width = self.preferred_width.min(viewport.width);
        let lines = self.wrapped(box_width);
        let wanted = (lines.len() as u16).saturating_add(V_PADDING);
        self.area = placement(self.anchor, viewport, box_width, wanted);

        let area = self.area;
        if area.width < 2 || area.height < 2 {
            return;
        }
        let visible = (area.height - V_PADDING) as usize;
        let max_scroll = lines.len().saturating_sub(visible) as u16;
        self.scroll = self.scroll.min(max_scroll);

        surface.fill(area, ' ', self.theme.overlay());
        self.draw_border(surface, area);

        let inner_width = area.width.saturating_sub(H_PADDING);
        for (i, line) in lines
            .iter()
            .skip(self.scroll as usize)
            .take(visible)
            .enumerate()
        {
            surface.print(
                area.x + 2,
                area.y + 1 + i as u16,
                line,
                inner_width,
                self.theme.overlay(),
            );
        }

        let border = self.theme.overlay_border();
        let right = area.right() - 1;
        if self.scroll > 0 {
            surface.set_cell(right, area.y + 1, '▲', border);
        }
        if self.scroll < max_scroll {
            surface.set_cell(right, area.bottom() - 2, '▼', border);
        }
        surface.hide_cursor();
    }

    fn draw_border(&self, surface: &mut dyn Surface, area: Rect) {
        let style = self.theme.overlay_border();
        let (left, right) = (area.x, area.right() - 1);
        let (top, bottom) = (area.y, area.bottom() - 1);
        for x in left + 1..right {
            surface.set_cell(x, top, '─', style);
            surface.set_cell(x, bottom, '─', style);
        }
        for y in top + 1..bottom {
            surface.set_cell(left, y, '│', style);
            surface.set_cell(right, y, '│', style);
        }
        surface.set_cell(left, top, '┌', style);
        surface.set_cell(right, top, '┐', style);
        surface.set_cell(left, bottom, '└', style);
        surface.set_cell(right, bottom, '┘', style);

        let title = format!(" {} ", self.title);
        surface.print(left + 1, top, &title, area.width.saturating_sub(2), style);
    }
}
