//! Colors per theme. Every component takes a `Palette` instead of picking
//! colors itself, so a theme toggle recolors the whole frame.

use ratatui::style::{Color, Modifier, Style};

use crate::core::notify::Severity;
use crate::core::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub theme: Theme,
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub code_fg: Color,
    pub code_bg: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                theme,
                bg: Color::Rgb(250, 250, 247),
                fg: Color::Rgb(33, 37, 41),
                muted: Color::Rgb(120, 124, 130),
                accent: Color::Rgb(37, 99, 235),
                code_fg: Color::Rgb(33, 37, 41),
                code_bg: Color::Rgb(230, 232, 236),
                success: Color::Rgb(22, 128, 61),
                error: Color::Rgb(200, 30, 30),
                info: Color::Rgb(37, 99, 235),
            },
            Theme::Dark => Self {
                theme,
                bg: Color::Rgb(17, 24, 39),
                fg: Color::Rgb(229, 231, 235),
                muted: Color::Rgb(140, 148, 160),
                accent: Color::Rgb(96, 165, 250),
                code_fg: Color::Rgb(229, 231, 235),
                code_bg: Color::Rgb(45, 55, 72),
                success: Color::Rgb(74, 222, 128),
                error: Color::Rgb(248, 113, 113),
                info: Color::Rgb(96, 165, 250),
            },
        }
    }

    /// syntect theme used for fenced code.
    pub fn syntax_theme(&self) -> &'static str {
        match self.theme {
            Theme::Light => "InspiredGitHub",
            Theme::Dark => "base16-ocean.dark",
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Info => self.info,
            Severity::Success => self.success,
            Severity::Error => self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_themes_differ() {
        let light = Palette::for_theme(Theme::Light);
        let dark = Palette::for_theme(Theme::Dark);
        assert_ne!(light.bg, dark.bg);
        assert_ne!(light.syntax_theme(), dark.syntax_theme());
        assert_eq!(dark.severity(Severity::Error), dark.error);
    }
}
