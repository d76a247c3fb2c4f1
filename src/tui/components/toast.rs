//! # Toast Component
//!
//! Draws the live notification in the top-right corner of the page. The
//! core queue owns timing; this only maps the phase to a look:
//! `Entering` is not drawn yet, `Leaving` is dimmed. The bottom border
//! shows when the toast was raised.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::core::notify::{Notification, Severity, ToastPhase};
use crate::tui::component::Component;
use crate::tui::palette::Palette;

const MAX_WIDTH: u16 = 48;

pub struct Toast<'a> {
    pub notification: &'a Notification,
    pub palette: Palette,
}

fn icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "ℹ",
        Severity::Success => "✔",
        Severity::Error => "✖",
    }
}

impl Toast<'_> {
    /// Wrapped message lines for a box `width` columns wide (borders included).
    fn lines(&self, width: u16) -> Vec<String> {
        let inner = width.saturating_sub(4).max(1) as usize;
        let text = format!("{} {}", icon(self.notification.severity), self.notification.message);
        textwrap::wrap(&text, inner)
            .into_iter()
            .map(|line| line.into_owned())
            .collect()
    }

    /// Box placed in the top-right corner of `page`.
    pub fn area(&self, page: Rect) -> Rect {
        let width = MAX_WIDTH.min(page.width.saturating_sub(2));
        let height = (self.lines(width).len() as u16 + 2).min(page.height);
        Rect::new(page.right().saturating_sub(width + 1), page.y, width, height)
    }
}

impl Component for Toast<'_> {
    fn render(&mut self, frame: &mut Frame, page: Rect) {
        if self.notification.phase == ToastPhase::Entering {
            return;
        }
        let p = self.palette;
        let area = self.area(page);
        if area.width < 5 || area.height < 3 {
            return;
        }

        let color = p.severity(self.notification.severity);
        let mut style = p.base();
        let mut border = Style::default().fg(color);
        if self.notification.phase == ToastPhase::Leaving {
            style = style.add_modifier(Modifier::DIM);
            border = border.add_modifier(Modifier::DIM);
        }

        let lines: Vec<Line> = self.lines(area.width).into_iter().map(Line::from).collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", self.notification.severity.label()))
            .title_bottom(Line::from(format!(" {} ", self.notification.time_label())).right_aligned());

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(lines).style(style).block(block),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::{NotificationQueue, ToastTimings};
    use crate::core::theme::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(queue: &NotificationQueue) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|f| {
                if let Some(n) = queue.live() {
                    Toast {
                        notification: n,
                        palette: Palette::for_theme(Theme::Light),
                    }
                    .render(f, f.area());
                }
            })
            .unwrap();
        screen(&terminal)
    }

    #[test]
    fn test_hidden_while_entering_then_shown() {
        let mut queue = NotificationQueue::new(ToastTimings::default());
        queue.notify("Switched to dark mode", Severity::Success, 0);
        assert!(!draw(&queue).contains("Switched"));

        queue.advance(100);
        let shown = draw(&queue);
        assert!(shown.contains("Switched to dark mode"));
        assert!(shown.contains("success"));
        assert!(shown.contains(&queue.live().unwrap().time_label()), "creation time on the border");
    }

    #[test]
    fn test_long_message_wraps() {
        let mut queue = NotificationQueue::new(ToastTimings::default());
        queue.notify("word ".repeat(30), Severity::Info, 0);
        queue.advance(100);
        let n = queue.live().unwrap();
        let toast = Toast {
            notification: n,
            palette: Palette::for_theme(Theme::Dark),
        };
        let area = toast.area(Rect::new(0, 0, 60, 20));
        assert_eq!(area.width, MAX_WIDTH);
        assert!(area.height > 3);
    }
}
