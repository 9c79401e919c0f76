//! Theme and color scheme for the editor
//!
//! A `Theme` is built once at startup (from the terminal's colour depth and
//! the config file) and handed to every component constructor.

use crate::surface::ColorDepth;
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

/// Color theme for the editor
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub fg: Color,
    pub label: Color,
    pub focus: Color,
    pub problem: Color,
    pub hint: Color,
    pub input_bg: Color,
    pub input_fg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub choice: Color,
    pub header_fg: Color,
    pub rule: Color,
    pub button: Color,
    pub disabled: Color,
    pub overlay_bg: Color,
    pub overlay_border: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    /// Render with modifiers only.
    pub monochrome: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            label: Color::Gray,
            focus: Color::Yellow,
            problem: Color::Red,
            hint: Color::DarkGray,
            input_bg: Color::Blue,
            input_fg: Color::White,
            selection_bg: Color::White,
            selection_fg: Color::Blue,
            choice: Color::Cyan,
            header_fg: Color::Cyan,
            rule: Color::DarkGray,
            button: Color::Green,
            disabled: Color::DarkGray,
            overlay_bg: Color::Black,
            overlay_border: Color::Yellow,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            monochrome: false,
        }
    }
}

impl Theme {
    /// Theme for terminals without colour.
    pub fn monochrome() -> Self {
        Self {
            fg: Color::Reset,
            label: Color::Reset,
            focus: Color::Reset,
            problem: Color::Reset,
            hint: Color::Reset,
            input_bg: Color::Reset,
            input_fg: Color::Reset,
            selection_bg: Color::Reset,
            selection_fg: Color::Reset,
            choice: Color::Reset,
            header_fg: Color::Reset,
            rule: Color::Reset,
            button: Color::Reset,
            disabled: Color::Reset,
            overlay_bg: Color::Reset,
            overlay_border: Color::Reset,
            success: Color::Reset,
            warning: Color::Reset,
            error: Color::Reset,
            monochrome: true,
        }
    }

    /// Pick the base theme for a colour depth.
    pub fn for_depth(depth: ColorDepth) -> Self {
        match depth {
            ColorDepth::Monochrome => Self::monochrome(),
            _ => Self::default(),
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn label(&self, focused: bool, problem: bool) -> Style {
        let color = match (problem, focused) {
            (true, _) => self.problem,
            (false, true) => self.focus,
            (false, false) => self.label,
        };
        let mut style = Style::default().fg(color);
        if focused {
            style = style.add_modifier(Modifier::BOLD);
        }
        if problem && self.monochrome {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.hint).add_modifier(Modifier::ITALIC)
    }

    pub fn input(&self) -> Style {
        if self.monochrome {
            Style::default().add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(self.input_fg).bg(self.input_bg)
        }
    }

    pub fn selection(&self) -> Style {
        if self.monochrome {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(self.selection_fg).bg(self.selection_bg)
        }
    }

    pub fn choice(&self, current: bool) -> Style {
        if current {
            self.selection().add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.choice)
        }
    }

    pub fn header(&self) -> Style {
        Style::default().fg(self.header_fg).add_modifier(Modifier::BOLD)
    }

    pub fn rule(&self) -> Style {
        Style::default().fg(self.rule)
    }

    pub fn button(&self, enabled: bool) -> Style {
        if enabled {
            Style::default().fg(self.button).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.disabled).add_modifier(Modifier::DIM)
        }
    }

    pub fn overlay(&self) -> Style {
        Style::default().fg(self.fg).bg(self.overlay_bg)
    }

    pub fn overlay_border(&self) -> Style {
        Style::default().fg(self.overlay_border).bg(self.overlay_bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let theme: Theme = serde_yaml::from_str("focus: magenta\ninput_bg: \"#202020\"").unwrap();
        assert_eq!(theme.focus, Color::Magenta);
        assert_eq!(theme.input_bg, Color::Rgb(0x20, 0x20, 0x20));
        assert_eq!(theme.problem, Theme::default().problem);
    }

    #[test]
    fn test_monochrome_uses_modifiers() {
        let theme = Theme::for_depth(ColorDepth::Monochrome);
        assert!(theme.selection().add_modifier.contains(Modifier::REVERSED));
        assert!(theme.label(false, true).add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(Theme::for_depth(ColorDepth::TrueColor), Theme::default());
    }
}
