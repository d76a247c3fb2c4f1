//! # Links Overlay
//!
//! Lists the links of the active section, numbered like the `[n]` markers
//! in the page text. Opened with `o`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `LinksState` lives in `TuiState`
//! - `LinksView` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::core::content::Link;
use crate::tui::component::EventHandler;
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

#[derive(Debug, Default)]
pub struct LinksState {
    pub links: Vec<Link>,
    pub list_state: ListState,
}

pub enum LinksEvent {
    Open(String),
    Dismiss,
}

impl LinksState {
    /// Replace the listed links and select the first.
    pub fn show(&mut self, links: Vec<Link>) {
        self.list_state
            .select(if links.is_empty() { None } else { Some(0) });
        self.links = links;
    }
}

impl EventHandler for LinksState {
    type Event = LinksEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<LinksEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::InputChar('o') | TuiEvent::InputChar('q') => {
                Some(LinksEvent::Dismiss)
            }
            TuiEvent::Up | TuiEvent::BackTab => {
                if !self.links.is_empty() {
                    let i = self.list_state.selected().unwrap_or(0);
                    self.list_state.select(Some(i.saturating_sub(1)));
                }
                None
            }
            TuiEvent::Down | TuiEvent::Tab => {
                if !self.links.is_empty() {
                    let i = self.list_state.selected().map_or(0, |i| i + 1);
                    self.list_state.select(Some(i.min(self.links.len() - 1)));
                }
                None
            }
            // Digits jump straight to the numbered link
            TuiEvent::InputChar(c) if c.is_ascii_digit() => {
                let n = c.to_digit(10)? as usize;
                let link = self.links.get(n.checked_sub(1)?)?;
                Some(LinksEvent::Open(link.target.clone()))
            }
            TuiEvent::Submit => self
                .list_state
                .selected()
                .and_then(|i| self.links.get(i))
                .map(|link| LinksEvent::Open(link.target.clone())),
            _ => None,
        }
    }
}

/// Placeholder targets open the owner's profile.
fn display_target(target: &str) -> &str {
    if target.is_empty() || target == "#" {
        "(profile)"
    } else {
        target
    }
}

pub struct LinksView<'a> {
    pub state: &'a mut LinksState,
    pub section_title: &'a str,
    pub palette: Palette,
}

impl LinksView<'_> {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let overlay = centered_rect(70, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .title(format!(" Links in {} ", self.section_title))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Open  1-9 Jump  Esc Back ").centered())
            .padding(Padding::horizontal(1))
            .style(p.base());

        if self.state.links.is_empty() {
            let empty = Paragraph::new("No links in this section.")
                .style(p.dim())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .links
            .iter()
            .enumerate()
            .map(|(i, link)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("[{}] ", i + 1), Style::default().fg(p.accent)),
                    Span::raw(link.label.clone()),
                    Span::styled(format!("  {}", display_target(&link.target)), p.dim()),
                ]))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(p.highlight());
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}
