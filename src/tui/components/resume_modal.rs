//! # Resume Modal
//!
//! Preview of what the resume export will contain, with a download key.

use std::path::Path;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::content::{Document, HOME_ID};
use crate::tui::component::Component;
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

pub enum ResumeEvent {
    Download,
    Dismiss,
}

/// The modal has no state of its own; keys map straight to events.
pub fn handle_event(event: &TuiEvent) -> Option<ResumeEvent> {
    match event {
        TuiEvent::Submit | TuiEvent::InputChar('d') => Some(ResumeEvent::Download),
        TuiEvent::Escape | TuiEvent::InputChar('q') | TuiEvent::InputChar('r') => {
            Some(ResumeEvent::Dismiss)
        }
        _ => None,
    }
}

pub struct ResumeModal<'a> {
    pub document: &'a Document,
    pub download_dir: &'a Path,
    pub palette: Palette,
}

impl Component for ResumeModal<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let overlay = centered_rect(60, 60, area);
        frame.render_widget(Clear, overlay);

        let owner = if self.document.title.is_empty() {
            "Portfolio"
        } else {
            &self.document.title
        };

        let mut lines = vec![
            Line::from(Span::styled(
                owner.to_string(),
                Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled("Includes:", p.dim())),
        ];
        lines.extend(
            self.document
                .sections
                .iter()
                .filter(|s| s.id != HOME_ID)
                .map(|s| Line::from(format!("  • {}", s.title))),
        );
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Saves to ", p.dim()),
            Span::raw(self.download_dir.display().to_string()),
        ]));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .title(" Resume ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" d Download  Esc Close ").centered())
            .padding(Padding::horizontal(1))
            .style(p.base());

        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
            overlay,
        );
    }
}
