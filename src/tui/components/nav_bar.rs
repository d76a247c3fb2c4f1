//! # NavBar Component
//!
//! Fixed header: owner name on the left, section links on the right, then
//! the theme switch. On narrow terminals (or when the links do not fit) the
//! links collapse into a menu button. The rule under the bar turns to the
//! accent color once the page is scrolled.
//!
//! ```text
//!  Alex Rivera            Home  About  Skills  Projects   ☾
//! ───────────────────────────────────────────────────────────
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::nav::NavEntry;
use crate::core::theme::Theme;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub const NAV_BAR_HEIGHT: u16 = 2;

/// What sits under a column of the bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavHit {
    Brand,
    Entry(String),
    Menu,
    Theme,
}

/// A clickable span of the bar: start column, width, target.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    x: u16,
    width: u16,
    hit: NavHit,
    label: String,
}

pub struct NavBar<'a> {
    pub brand: &'a str,
    pub entries: &'a [NavEntry],
    pub active: Option<&'a str>,
    pub compact: bool,
    pub menu_open: bool,
    pub scrolled: bool,
    pub palette: Palette,
}

impl NavBar<'_> {
    fn theme_icon(&self) -> &'static str {
        match self.palette.theme {
            Theme::Light => "☾",
            Theme::Dark => "☀",
        }
    }

    /// Slots laid out for a bar `width` columns wide.
    fn slots(&self, width: u16) -> Vec<Slot> {
        let mut slots = vec![Slot {
            x: 1,
            width: self.brand.width() as u16,
            hit: NavHit::Brand,
            label: self.brand.to_string(),
        }];

        let icon = self.theme_icon();
        let theme_x = width.saturating_sub(3);
        let theme_slot = Slot {
            x: theme_x,
            width: icon.width() as u16,
            hit: NavHit::Theme,
            label: icon.to_string(),
        };

        let brand_end = 1 + self.brand.width() as u16 + 2;
        let links_width: u16 = self
            .entries
            .iter()
            .map(|e| e.label.width() as u16 + 2)
            .sum();
        let fits = brand_end + links_width + 1 <= theme_x;

        if self.compact || !fits {
            let label = if self.menu_open { "✕ Menu" } else { "≡ Menu" };
            let w = label.width() as u16;
            slots.push(Slot {
                x: theme_x.saturating_sub(w + 2),
                width: w,
                hit: NavHit::Menu,
                label: label.to_string(),
            });
        } else {
            let mut x = theme_x.saturating_sub(links_width + 1);
            for entry in self.entries {
                let w = entry.label.width() as u16;
                slots.push(Slot {
                    x: x + 1,
                    width: w,
                    hit: NavHit::Entry(entry.id.clone()),
                    label: entry.label.clone(),
                });
                x += w + 2;
            }
        }
        slots.push(theme_slot);
        slots
    }

    /// Which slot (if any) is under `(col, row)` for a bar drawn in `area`.
    pub fn hit_test(&self, col: u16, row: u16, area: Rect) -> Option<NavHit> {
        if row != area.y || col < area.x {
            return None;
        }
        let local = col - area.x;
        self.slots(area.width)
            .into_iter()
            .find(|slot| local >= slot.x && local < slot.x + slot.width.max(1))
            .map(|slot| slot.hit)
    }
}

impl Component for NavBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let mut spans: Vec<Span> = Vec::new();
        let mut col: u16 = 0;
        for slot in self.slots(area.width) {
            if slot.x > col {
                spans.push(Span::raw(" ".repeat((slot.x - col) as usize)));
            }
            let style = match &slot.hit {
                NavHit::Brand => Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
                NavHit::Entry(id) if self.active == Some(id.as_str()) => p.highlight(),
                NavHit::Entry(_) => Style::default().fg(p.fg),
                NavHit::Menu if self.menu_open => p.highlight(),
                NavHit::Menu | NavHit::Theme => Style::default().fg(p.accent),
            };
            col = slot.x + slot.label.width() as u16;
            spans.push(Span::styled(slot.label, style));
        }

        let rule_style = if self.scrolled {
            Style::default().fg(p.accent)
        } else {
            p.dim()
        };
        let rule = "─".repeat(area.width as usize);
        let lines = vec![Line::from(spans), Line::from(Span::styled(rule, rule_style))];
        frame.render_widget(Paragraph::new(lines).style(p.base()), area);
    }
}
