//! Minimal terminal capability used by every drawing routine.
//!
//! The editor never talks to a terminal backend directly. Anything that can
//! store a styled character per cell and remember a cursor position is a
//! [`Surface`]: the off-screen [`Compositor`](crate::compositor::Compositor)
//! and the real frame buffer ([`BufferSurface`]) alike.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
};

/// Colour support of the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    /// No colour at all; styles fall back to modifiers.
    Monochrome,
    /// The 16 standard ANSI colours.
    #[default]
    Ansi16,
    /// The 256-colour palette.
    Ansi256,
    /// 24-bit colour.
    TrueColor,
}

impl ColorDepth {
    /// Probe the environment (`NO_COLOR`, `COLORTERM`, `TERM`).
    pub fn detect() -> Self {
        Self::from_env(
            std::env::var("NO_COLOR").ok().as_deref(),
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
        )
    }

    fn from_env(no_color: Option<&str>, colorterm: Option<&str>, term: Option<&str>) -> Self {
        if no_color.is_some_and(|v| !v.is_empty()) {
            return ColorDepth::Monochrome;
        }
        if matches!(colorterm, Some("truecolor") | Some("24bit")) {
            return ColorDepth::TrueColor;
        }
        match term {
            Some("dumb") => ColorDepth::Monochrome,
            Some(t) if t.contains("256color") => ColorDepth::Ansi256,
            _ => ColorDepth::Ansi16,
        }
    }
}

/// Pass-through capability queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub mouse: bool,
    pub color_depth: ColorDepth,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            mouse: true,
            color_depth: ColorDepth::default(),
        }
    }
}

/// A grid of styled cells with a cursor.
///
/// Writes outside the surface are ignored.
pub trait Surface {
    /// Width and height in cells.
    fn size(&self) -> (u16, u16);

    /// Set one cell.
    fn set_cell(&mut self, x: u16, y: u16, symbol: char, style: Style);

    /// Read one cell back.
    fn cell(&self, x: u16, y: u16) -> Option<(char, Style)>;

    /// Place the cursor.
    fn show_cursor(&mut self, x: u16, y: u16);

    /// Hide the cursor.
    fn hide_cursor(&mut self);

    /// Capability queries.
    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    /// Print `text` from (x, y), writing at most `max_width` cells.
    ///
    /// Returns the number of cells written.
    fn print(&mut self, x: u16, y: u16, text: &str, max_width: u16, style: Style) -> u16 {
        let mut written = 0u16;
        for c in text.chars() {
            if written >= max_width {
                break;
            }
            self.set_cell(x.saturating_add(written), y, c, style);
            written += 1;
        }
        written
    }

    /// Fill a region with a character and style.
    fn fill(&mut self, area: Rect, symbol: char, style: Style) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                self.set_cell(x, y, symbol, style);
            }
        }
    }
}

/// [`Surface`] over a ratatui frame buffer.
///
/// Coordinates are relative to the buffer's own area. The cursor is only
/// recorded; the caller hands it to the frame after drawing.
pub struct BufferSurface<'a> {
    buf: &'a mut Buffer,
    cursor: Option<Position>,
    capabilities: Capabilities,
}

impl<'a> BufferSurface<'a> {
    pub fn new(buf: &'a mut Buffer, capabilities: Capabilities) -> Self {
        Self {
            buf,
            cursor: None,
            capabilities,
        }
    }

    /// Absolute cursor position, if one was shown.
    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    fn absolute(&self, x: u16, y: u16) -> Option<Position> {
        let area = self.buf.area;
        if x < area.width && y < area.height {
            Some(Position::new(area.x + x, area.y + y))
        } else {
            None
        }
    }
}

impl Surface for BufferSurface<'_> {
    fn size(&self) -> (u16, u16) {
        (self.buf.area.width, self.buf.area.height)
    }

    fn set_cell(&mut self, x: u16, y: u16, symbol: char, style: Style) {
        if let Some(pos) = self.absolute(x, y) {
            if let Some(cell) = self.buf.cell_mut(pos) {
                cell.reset();
                cell.set_char(symbol).set_style(style);
            }
        }
    }

    fn cell(&self, x: u16, y: u16) -> Option<(char, Style)> {
        let pos = self.absolute(x, y)?;
        let cell = self.buf.cell(pos)?;
        Some((cell.symbol().chars().next().unwrap_or(' '), cell.style()))
    }

    fn show_cursor(&mut self, x: u16, y: u16) {
        self.cursor = self.absolute(x, y);
    }

    fn hide_cursor(&mut self) {
        self.cursor = None;
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_color_depth_from_env() {
        assert_eq!(
            ColorDepth::from_env(Some("1"), Some("truecolor"), None),
            ColorDepth::Monochrome
        );
        assert_eq!(
            ColorDepth::from_env(None, Some("truecolor"), Some("xterm")),
            ColorDepth::TrueColor
        );
        assert_eq!(
            ColorDepth::from_env(None, None, Some("xterm-256color")),
            ColorDepth::Ansi256
        );
        assert_eq!(ColorDepth::from_env(None, None, Some("dumb")), ColorDepth::Monochrome);
        assert_eq!(ColorDepth::from_env(Some(""), None, None), ColorDepth::Ansi16);
    }

    #[test]
    fn test_buffer_surface_offsets_by_area() {
        let mut buf = Buffer::empty(Rect::new(2, 1, 10, 3));
        let mut surface = BufferSurface::new(&mut buf, Capabilities::default());
        assert_eq!(surface.size(), (10, 3));

        let style = Style::default().fg(Color::Red);
        let written = surface.print(0, 0, "Hello world", 5, style);
        assert_eq!(written, 5);
        let (symbol, cell_style) = surface.cell(4, 0).unwrap();
        assert_eq!(symbol, 'o');
        assert_eq!(cell_style.fg, Some(Color::Red));

        surface.set_cell(20, 0, 'x', style);
        assert!(surface.cell(20, 0).is_none());

        surface.show_cursor(3, 2);
        assert_eq!(surface.cursor(), Some(Position::new(5, 3)));
        surface.hide_cursor();
        assert!(surface.cursor().is_none());

        assert_eq!(buf[(2, 1)].symbol(), "H");
    }
}
