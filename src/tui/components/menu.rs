//! # Menu Component
//!
//! Drop-down list of sections shown under the nav bar on narrow terminals.
//! `MenuState` keeps the keyboard selection between frames; `Menu` is the
//! per-frame render wrapper.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};
use unicode_width::UnicodeWidthStr;

use crate::core::nav::NavEntry;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

#[derive(Debug, Default)]
pub struct MenuState {
    pub list_state: ListState,
    len: usize,
}

pub enum MenuEvent {
    Navigate(usize),
    Dismiss,
}

impl MenuState {
    /// Reset the selection when the menu opens.
    pub fn open(&mut self, len: usize, active: Option<usize>) {
        self.len = len;
        self.list_state.select(if len == 0 { None } else { Some(active.unwrap_or(0)) });
    }
}

impl EventHandler for MenuState {
    type Event = MenuEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<MenuEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::InputChar('m') => Some(MenuEvent::Dismiss),
            TuiEvent::Up | TuiEvent::BackTab => {
                if self.len > 0 {
                    let i = self.list_state.selected().unwrap_or(0);
                    self.list_state.select(Some(i.saturating_sub(1)));
                }
                None
            }
            TuiEvent::Down | TuiEvent::Tab => {
                if self.len > 0 {
                    let i = self.list_state.selected().map_or(0, |i| i + 1);
                    self.list_state.select(Some(i.min(self.len - 1)));
                }
                None
            }
            TuiEvent::Submit => self.list_state.selected().map(MenuEvent::Navigate),
            _ => None,
        }
    }
}

pub struct Menu<'a> {
    pub state: &'a mut MenuState,
    pub entries: &'a [NavEntry],
    pub active: Option<&'a str>,
    pub palette: Palette,
}

impl Menu<'_> {
    /// Area the drop-down occupies below a nav bar spanning `page`.
    pub fn area(entries: &[NavEntry], page: Rect) -> Rect {
        let widest = entries.iter().map(|e| e.label.width()).max().unwrap_or(0) as u16;
        let width = (widest + 6).min(page.width);
        let height = (entries.len() as u16 + 2).min(page.height);
        Rect::new(page.right().saturating_sub(width + 1), page.y, width, height)
    }

    /// Entry index under `(col, row)` if the click lands on a list row.
    pub fn hit_test(entries: &[NavEntry], page: Rect, col: u16, row: u16) -> Option<usize> {
        let area = Self::area(entries, page);
        let inside = col > area.x && col + 1 < area.right() && row > area.y && row + 1 < area.bottom();
        inside.then(|| (row - area.y - 1) as usize)
    }

    pub fn render(&mut self, frame: &mut Frame, page: Rect) {
        let p = self.palette;
        let area = Self::area(self.entries, page);
        frame.render_widget(Clear, area);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let marker = if self.active == Some(entry.id.as_str()) { "● " } else { "  " };
                ListItem::new(Line::from(format!("{marker}{}", entry.label)))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(p.accent)),
            )
            .style(p.base())
            .highlight_style(p.highlight());
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
