//! # PageView Component
//!
//! The scrolling page: every section as a heading plus its rendered
//! markdown, stacked in one `ScrollView`.
//!
//! ## Layout reporting
//!
//! The core tracks section positions in rows but never measures anything.
//! Each render measures the sections at the current width; when the
//! measurements differ from what was last reported, `take_layout_change()`
//! hands back an `Action::Layout` for the event loop to dispatch.
//!
//! ## Caching
//!
//! Markdown rendering and syntax highlighting are the expensive part, so
//! rendered bodies and their heights are cached per (width, theme).
//! Stat counters and skill bars are drawn fresh every frame under the body;
//! their row count depends only on the content.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::action::Action;
use crate::core::content::{Document, Section};
use crate::core::nav::SectionBounds;
use crate::core::reveal::{Reveal, SkillLevel};
use crate::core::theme::Theme;
use crate::tui::component::Component;
use crate::tui::markdown;
use crate::tui::palette::Palette;

/// Columns left blank on each side of the text.
const MARGIN: u16 = 2;
/// Heading row plus the blank row under it.
const HEADING_ROWS: u16 = 2;
/// Blank row after each section.
const GAP_ROWS: u16 = 1;
/// Widest a skill bar gets.
const BAR_CELLS: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetrics {
    pub sections: Vec<SectionBounds>,
    pub content_height: u32,
    pub viewport_height: u32,
}

struct BodyCache {
    width: u16,
    theme: Theme,
    bodies: Vec<Text<'static>>,
    heights: Vec<u16>,
}

#[derive(Default)]
pub struct PageViewState {
    pub scroll_state: ScrollViewState,
    cache: Option<BodyCache>,
    /// Measured on the latest render.
    metrics: Option<PageMetrics>,
    /// Last value handed out by `take_layout_change`.
    reported: Option<PageMetrics>,
}

impl PageViewState {
    /// An `Action::Layout` if the page measured differently since the last call.
    pub fn take_layout_change(&mut self) -> Option<Action> {
        let metrics = self.metrics.as_ref()?;
        if self.reported.as_ref() == Some(metrics) {
            return None;
        }
        self.reported = Some(metrics.clone());
        Some(Action::Layout {
            sections: metrics.sections.clone(),
            content_height: metrics.content_height,
            viewport_height: metrics.viewport_height,
            // The nav bar sits above the page area, not over it
            header_height: 0,
        })
    }

    fn ensure_cache(&mut self, document: &Document, width: u16, palette: &Palette) {
        let fresh = self
            .cache
            .as_ref()
            .is_some_and(|c| c.width == width && c.theme == palette.theme);
        if fresh {
            return;
        }
        let bodies: Vec<Text<'static>> = document
            .sections
            .iter()
            .map(|s| markdown::render(&s.body, palette))
            .collect();
        let heights = bodies
            .iter()
            .map(|text| {
                let lines = Paragraph::new(text.clone())
                    .wrap(Wrap { trim: false })
                    .line_count(width);
                lines.min(u16::MAX as usize) as u16
            })
            .collect();
        log::debug!("Page measured at width {} ({} theme)", width, palette.theme);
        self.cache = Some(BodyCache {
            width,
            theme: palette.theme,
            bodies,
            heights,
        });
    }
}

pub struct PageView<'a> {
    pub state: &'a mut PageViewState,
    pub document: &'a Document,
    pub reveal: &'a Reveal,
    pub offset: u32,
    pub active: Option<&'a str>,
    pub palette: Palette,
}

impl PageView<'_> {
    /// Counter texts for a section: live for the animated block, final otherwise.
    fn counters<'s>(&'s self, section: &'s Section) -> Vec<(String, &'s str)> {
        if self.reveal.counters_section() == Some(section.id.as_str()) {
            self.reveal
                .counters()
                .map(|(stat, text)| (text, stat.label.as_str()))
                .collect()
        } else {
            section
                .stats
                .iter()
                .map(|stat| (format!("{}+", stat.target), stat.label.as_str()))
                .collect()
        }
    }

    fn bars<'s>(&'s self, section: &'s Section) -> Vec<(&'s SkillLevel, u8)> {
        if self.reveal.bars_section() == Some(section.id.as_str()) {
            self.reveal.bars().collect()
        } else {
            section.skills.iter().map(|skill| (skill, skill.percent)).collect()
        }
    }
}

/// Rows below the body: a blank row, the stats row, one row per skill.
fn reveal_rows(section: &Section) -> u16 {
    let skills = u16::try_from(section.skills.len()).unwrap_or(u16::MAX);
    let rows = skills.saturating_add(u16::from(!section.stats.is_empty()));
    if rows == 0 { 0 } else { rows.saturating_add(1) }
}

fn stats_line(counters: &[(String, &str)], p: &Palette) -> Line<'static> {
    let mut spans = Vec::with_capacity(counters.len() * 3);
    for (i, (value, label)) in counters.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            value.clone(),
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {label}"), p.dim()));
    }
    Line::from(spans)
}

fn skill_line(skill: &SkillLevel, shown: u8, label_width: usize, bar_width: usize, p: &Palette) -> Line<'static> {
    let full = bar_width * usize::from(shown) / 100;
    Line::from(vec![
        Span::styled(format!("{:<label_width$} ", skill.label), p.base()),
        Span::styled("█".repeat(full), Style::default().fg(p.accent)),
        Span::styled("░".repeat(bar_width - full), p.dim()),
        Span::styled(format!(" {shown:>3}%"), p.dim()),
    ])
}

impl Component for PageView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        // -1 for the scrollbar
        let canvas_width = area.width.saturating_sub(1);
        let text_width = canvas_width.saturating_sub(MARGIN * 2).max(1);
        self.state.ensure_cache(self.document, text_width, &p);
        let Some(cache) = self.state.cache.as_ref() else {
            return;
        };

        let mut sections = Vec::with_capacity(self.document.sections.len());
        let mut top: u16 = 0;
        for (section, body_height) in self.document.sections.iter().zip(&cache.heights) {
            let height = HEADING_ROWS
                .saturating_add(*body_height)
                .saturating_add(reveal_rows(section))
                .saturating_add(GAP_ROWS);
            sections.push(SectionBounds::new(section.id.clone(), top as u32, height as u32));
            top = top.saturating_add(height);
        }

        // Pad the end so the last section can scroll up to the top. The
        // padding belongs to the last section: at the bottom of the page the
        // view shows nothing else.
        let tail = sections
            .last()
            .map_or(0, |s| area.height.saturating_sub(s.height as u16));
        if let Some(last) = sections.last_mut() {
            last.height += u32::from(tail);
        }
        let canvas_height = top.saturating_add(tail);

        self.state.metrics = Some(PageMetrics {
            sections: sections.clone(),
            content_height: canvas_height as u32,
            viewport_height: area.height as u32,
        });

        let mut scroll_view = ScrollView::new(Size::new(canvas_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new("").style(p.base()),
            Rect::new(0, 0, canvas_width, canvas_height),
        );

        for (((section, bounds), body), body_height) in self
            .document
            .sections
            .iter()
            .zip(&sections)
            .zip(&cache.bodies)
            .zip(&cache.heights)
        {
            let y = bounds.top as u16;
            let marker = if self.active == Some(section.id.as_str()) {
                Span::styled("▍", Style::default().fg(p.accent))
            } else {
                Span::raw(" ")
            };
            let mut heading = markdown::section_heading(&section.title, &p);
            heading.spans.insert(0, marker);
            scroll_view.render_widget(
                Paragraph::new(heading).style(p.base()),
                Rect::new(MARGIN - 1, y, text_width + 1, 1),
            );

            let body_height = *body_height;
            if body_height > 0 {
                scroll_view.render_widget(
                    Paragraph::new(body.clone())
                        .wrap(Wrap { trim: false })
                        .style(p.base()),
                    Rect::new(MARGIN, y + HEADING_ROWS, text_width, body_height),
                );
            }

            // Skip the blank row that separates the body
            let mut row = y + HEADING_ROWS + body_height + 1;
            let counters = self.counters(section);
            if !counters.is_empty() {
                scroll_view.render_widget(
                    Paragraph::new(stats_line(&counters, &p)).style(p.base()),
                    Rect::new(MARGIN, row, text_width, 1),
                );
                row = row.saturating_add(1);
            }
            let bars = self.bars(section);
            let label_width = bars
                .iter()
                .map(|(skill, _)| skill.label.chars().count())
                .max()
                .unwrap_or(0);
            let bar_width = usize::from(text_width)
                .saturating_sub(label_width + 6)
                .min(BAR_CELLS);
            for (skill, shown) in bars {
                scroll_view.render_widget(
                    Paragraph::new(skill_line(skill, shown, label_width, bar_width, &p)).style(p.base()),
                    Rect::new(MARGIN, row, text_width, 1),
                );
                row = row.saturating_add(1);
            }
        }

        let offset = self.offset.min(u16::MAX as u32) as u16;
        self.state.scroll_state.set_offset(Position { x: 0, y: offset });
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
