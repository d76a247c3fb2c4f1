//! # Contact Form Component
//!
//! Overlay with four fields. Tab moves between them, Enter on the message
//! field sends, Ctrl+J adds a line break to the message.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ContactFormState` lives in `TuiState` so a draft survives closing
//! - `ContactFormView` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::contact::ContactForm;
use crate::tui::component::EventHandler;
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;
use crate::tui::palette::Palette;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }
}

#[derive(Debug, Default)]
pub struct ContactFormState {
    pub form: ContactForm,
    pub focus: Field,
}

pub enum ContactEvent {
    Submit(ContactForm),
    Dismiss,
}

impl ContactFormState {
    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.form.name,
            Field::Email => &mut self.form.email,
            Field::Subject => &mut self.form.subject,
            Field::Message => &mut self.form.message,
        }
    }

    fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.form.name,
            Field::Email => &self.form.email,
            Field::Subject => &self.form.subject,
            Field::Message => &self.form.message,
        }
    }

    /// Clear the draft after it has been handed off.
    pub fn reset(&mut self) {
        self.form.reset();
        self.focus = Field::Name;
    }
}

impl EventHandler for ContactFormState {
    type Event = ContactEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ContactEvent> {
        match event {
            TuiEvent::Escape => return Some(ContactEvent::Dismiss),
            TuiEvent::Tab | TuiEvent::Down => self.focus = self.focus.next(),
            TuiEvent::BackTab | TuiEvent::Up => self.focus = self.focus.prev(),
            TuiEvent::Submit if self.focus == Field::Message => {
                return Some(ContactEvent::Submit(self.form.clone()));
            }
            TuiEvent::Submit => self.focus = self.focus.next(),
            TuiEvent::Newline if self.focus == Field::Message => self.form.message.push('\n'),
            TuiEvent::InputChar(c) => self.field_mut().push(*c),
            TuiEvent::Backspace => {
                self.field_mut().pop();
            }
            _ => {}
        }
        None
    }
}

pub struct ContactFormView<'a> {
    pub state: &'a ContactFormState,
    pub recipient: &'a str,
    pub palette: Palette,
}

impl ContactFormView<'_> {
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let overlay = centered_rect(70, 80, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.accent))
            .title(format!(" Message to {} ", self.recipient))
            .title_bottom(
                Line::from(" Tab Next  Enter Send (in message)  Ctrl+J New line  Esc Close ")
                    .centered(),
            )
            .padding(Padding::horizontal(1))
            .style(p.base());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let rows = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(inner);

        for (field, rect) in Field::ALL.into_iter().zip(rows.iter().copied()) {
            let focused = self.state.focus == field;
            let border = if focused {
                Style::default().fg(p.accent)
            } else {
                p.dim()
            };
            let value = self.state.value(field);
            let input = Paragraph::new(value.to_string())
                .wrap(Wrap { trim: false })
                .style(p.base())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border)
                        .title(field.label()),
                );
            frame.render_widget(input, rect);

            if focused {
                let field_inner = Rect::new(
                    rect.x + 1,
                    rect.y + 1,
                    rect.width.saturating_sub(2),
                    rect.height.saturating_sub(2),
                );
                frame.set_cursor_position(cursor_at_end(value, field_inner));
            }
        }
    }
}

/// Screen position just after the last character of `value` wrapped into `area`.
fn cursor_at_end(value: &str, area: Rect) -> Position {
    let width = area.width.max(1) as usize;
    let mut row: u16 = 0;
    let mut col: u16 = 0;
    for (i, line) in value.split('\n').enumerate() {
        if i > 0 {
            row += 1;
        }
        let wrapped = textwrap::wrap(line, width);
        row += wrapped.len().saturating_sub(1) as u16;
        col = wrapped.last().map_or(0, |l| l.width() as u16);
    }
    if col >= area.width {
        row += 1;
        col = 0;
    }
    Position {
        x: area.x + col,
        y: area.y + row.min(area.height.saturating_sub(1)),
    }
}
