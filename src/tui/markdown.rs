//! Markdown → ratatui `Text` renderer for section bodies.
//!
//! Walks `pulldown_cmark` events and builds styled lines in the active
//! palette. Links are shown as their label followed by a `[n]` marker; the
//! numbers match the order of `Section::links()`, which is what the links
//! overlay lists.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::tui::palette::Palette;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Render `content` in `palette`. Owned output, independent of the input lifetime.
pub fn render(content: &str, palette: &Palette) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut writer = Writer::new(*palette);
    for event in Parser::new_ext(content, opts) {
        writer.handle(event);
    }
    writer.finish()
}

/// Heading line for a section, styled like an H2.
pub fn section_heading(title: &str, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(title.to_string(), heading_style(palette, HeadingLevel::H2)))
}

struct Writer {
    palette: Palette,
    lines: Vec<Line<'static>>,
    /// Inline styles; each entry already includes its parents.
    styles: Vec<Style>,
    /// Prefix spans repeated on every line (quote bars, code gutter).
    gutter: Vec<Span<'static>>,
    /// One entry per open list: next ordinal, or None for bullets.
    lists: Vec<Option<u64>>,
    code: Option<CodeBlock>,
    links_seen: usize,
    blank_pending: bool,
}

enum CodeBlock {
    Highlighted(HighlightLines<'static>),
    Plain,
}

impl Writer {
    fn new(palette: Palette) -> Self {
        Self {
            palette,
            lines: Vec::new(),
            styles: Vec::new(),
            gutter: Vec::new(),
            lists: Vec::new(),
            code: None,
            links_seen: 0,
            blank_pending: false,
        }
    }

    fn finish(self) -> Text<'static> {
        Text::from(self.lines)
    }

    fn current(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.palette.fg))
    }

    fn push_style(&mut self, style: Style) {
        let merged = self.current().patch(style);
        self.styles.push(merged);
    }

    fn new_line(&mut self) {
        self.lines.push(Line::from(self.gutter.clone()));
    }

    fn new_block(&mut self) {
        if self.blank_pending && !self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.blank_pending = false;
    }

    fn append(&mut self, span: Span<'static>) {
        if self.lines.is_empty() {
            self.new_line();
        }
        if let Some(line) = self.lines.last_mut() {
            line.push_span(span);
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                let style = Style::default()
                    .fg(self.palette.code_fg)
                    .bg(self.palette.code_bg);
                self.append(Span::styled(format!(" {code} "), style));
            }
            Event::SoftBreak => self.append(Span::raw(" ")),
            Event::HardBreak => self.new_line(),
            Event::Rule => {
                self.new_block();
                let rule = Span::styled("─".repeat(32), self.palette.dim());
                self.lines.push(Line::from(rule));
                self.blank_pending = true;
            }
            Event::TaskListMarker(done) => {
                self.append(Span::raw(if done { "☑ " } else { "☐ " }));
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // Paragraphs inside list items continue the item line
                if self.lists.is_empty() {
                    self.new_block();
                    self.new_line();
                }
            }
            Tag::Heading { level, .. } => {
                self.new_block();
                self.new_line();
                self.push_style(heading_style(&self.palette, level));
            }
            Tag::BlockQuote(_) => {
                self.new_block();
                self.gutter
                    .push(Span::styled("▎ ", Style::default().fg(self.palette.accent)));
                self.push_style(Style::default().fg(self.palette.muted).add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => self.start_code(kind),
            Tag::List(first) => {
                if self.lists.is_empty() {
                    self.new_block();
                }
                self.lists.push(first);
            }
            Tag::Item => {
                self.new_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}• "),
                };
                self.append(Span::styled(marker, Style::default().fg(self.palette.accent)));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { .. } => {
                self.push_style(
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn start_code(&mut self, kind: CodeBlockKind<'_>) {
        self.new_block();
        let lang = match &kind {
            CodeBlockKind::Fenced(lang) => lang.split_whitespace().next().unwrap_or(""),
            CodeBlockKind::Indented => "",
        };
        let label = if lang.is_empty() { "code" } else { lang };
        self.lines.push(Line::from(Span::styled(
            format!("┌ {label}"),
            self.palette.dim(),
        )));
        self.gutter.push(Span::styled("│ ", self.palette.dim()));

        let syntax = (!lang.is_empty())
            .then(|| SYNTAX_SET.find_syntax_by_token(lang))
            .flatten();
        let theme = THEME_SET.themes.get(self.palette.syntax_theme());
        self.code = match (syntax, theme) {
            (Some(syntax), Some(theme)) => Some(CodeBlock::Highlighted(HighlightLines::new(syntax, theme))),
            _ => Some(CodeBlock::Plain),
        };
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    self.blank_pending = true;
                }
            }
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.blank_pending = true;
            }
            TagEnd::BlockQuote(_) => {
                self.gutter.pop();
                self.styles.pop();
                self.blank_pending = true;
            }
            TagEnd::CodeBlock => {
                self.code = None;
                self.gutter.pop();
                self.lines.push(Line::from(Span::styled("└", self.palette.dim())));
                self.blank_pending = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.blank_pending = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                self.links_seen += 1;
                let marker = format!("[{}]", self.links_seen);
                self.append(Span::styled(marker, self.palette.dim()));
            }
            _ => {}
        }
    }

    fn text(&mut self, raw: &str) {
        // ratatui draws tabs as zero width
        let text = raw.replace('\t', "    ");
        match self.code.take() {
            Some(CodeBlock::Highlighted(mut highlighter)) => {
                for line in LinesWithEndings::from(&text) {
                    let spans = match highlighter.highlight_line(line, &SYNTAX_SET) {
                        Ok(ranges) => ranges
                            .into_iter()
                            .map(|(style, frag)| {
                                let fg = style.foreground;
                                Span::styled(
                                    frag.trim_end_matches('\n').to_string(),
                                    Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                                )
                            })
                            .filter(|span| !span.content.is_empty())
                            .collect(),
                        Err(_) => vec![Span::raw(line.trim_end_matches('\n').to_string())],
                    };
                    self.new_line();
                    for span in spans {
                        self.append(span);
                    }
                }
                self.code = Some(CodeBlock::Highlighted(highlighter));
            }
            Some(CodeBlock::Plain) => {
                let style = Style::default().fg(self.palette.code_fg);
                for line in text.lines() {
                    self.new_line();
                    self.append(Span::styled(line.to_string(), style));
                }
                self.code = Some(CodeBlock::Plain);
            }
            None => {
                let style = self.current();
                self.append(Span::styled(text, style));
            }
        }
    }
}

fn heading_style(palette: &Palette, level: HeadingLevel) -> Style {
    let base = Style::default().fg(palette.accent).add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 => base.add_modifier(Modifier::UNDERLINED),
        HeadingLevel::H2 => base,
        _ => Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
    }
}
