//! # Portfolio Content
//!
//! The page markup: a markdown document split into sections.
//!
//! ```text
//! # Jane Doe                  -> document title (owner)
//! Intro text...               -> section "home"
//! ## About Me                 -> section "about-me"
//! ## Work {#projects}         -> section "projects" (explicit id)
//! ```
//!
//! Section ids are unique: a repeated id gets a numeric suffix.
//!
//! Fenced blocks tagged `stats` or `skills` are taken out of the body and
//! kept as data for the reveal animations.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::core::nav::NavEntry;
use crate::core::reveal::{SkillLevel, Stat};

pub const HOME_ID: &str = "home";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub title: String,
    /// Markdown body, heading excluded.
    pub body: String,
    pub stats: Vec<Stat>,
    pub skills: Vec<SkillLevel>,
}

/// An inline markdown link found in a section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub target: String,
}

impl Section {
    fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: String::new(),
            stats: Vec::new(),
            skills: Vec::new(),
        }
    }

    /// Links in reading order. Labels fall back to the target.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::new();
        let mut open: Option<(String, String)> = None;
        for event in Parser::new(&self.body) {
            match event {
                Event::Start(Tag::Link { dest_url, .. }) => {
                    open = Some((dest_url.to_string(), String::new()));
                }
                Event::Text(t) | Event::Code(t) => {
                    if let Some((_, label)) = open.as_mut() {
                        label.push_str(&t);
                    }
                }
                Event::End(TagEnd::Link) => {
                    if let Some((target, label)) = open.take() {
                        let label = if label.trim().is_empty() { target.clone() } else { label };
                        links.push(Link { label, target });
                    }
                }
                _ => {}
            }
        }
        links
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug)]
pub enum ContentError {
    Io(io::Error),
    Empty,
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Io(e) => write!(f, "content I/O error: {e}"),
            ContentError::Empty => write!(f, "content has no sections"),
        }
    }
}

impl std::error::Error for ContentError {}

impl Document {
    pub fn parse(markdown: &str) -> Result<Self, ContentError> {
        let mut title = String::new();
        let mut sections: Vec<Section> = Vec::new();
        let mut current = Section::new(HOME_ID, "Home");
        let mut in_fence = false;
        let mut data_block: Option<DataBlock> = None;

        for line in markdown.lines() {
            let trimmed = line.trim_start();
            let fence = trimmed.starts_with("```") || trimmed.starts_with("~~~");

            if let Some(block) = data_block {
                if fence {
                    data_block = None;
                } else if !line.trim().is_empty() {
                    block.push(line, &mut current);
                }
                continue;
            }

            if fence {
                if !in_fence && let Some(block) = DataBlock::from_info(&trimmed[3..]) {
                    data_block = Some(block);
                    continue;
                }
                in_fence = !in_fence;
            }

            if !in_fence && let Some(heading) = trimmed.strip_prefix("## ") {
                push_section(&mut sections, current);
                let (heading, explicit_id) = split_anchor(heading);
                let id = explicit_id.unwrap_or_else(|| slugify(&heading));
                current = Section::new(id, heading);
                continue;
            }

            if !in_fence && title.is_empty() && let Some(heading) = trimmed.strip_prefix("# ") {
                title = split_anchor(heading).0;
                continue;
            }

            current.body.push_str(line);
            current.body.push('\n');
        }
        push_section(&mut sections, current);

        if sections.is_empty() {
            return Err(ContentError::Empty);
        }
        Ok(Self { title, sections })
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let markdown = fs::read_to_string(path).map_err(ContentError::Io)?;
        let doc = Self::parse(&markdown)?;
        info!(
            "Loaded {} sections from {}",
            doc.sections.len(),
            path.display()
        );
        Ok(doc)
    }

    /// Built-in page used when no content file is configured.
    pub fn sample() -> Self {
        // The sample has sections, so parsing cannot come back empty
        Self::parse(SAMPLE).unwrap_or_else(|_| Self {
            title: String::new(),
            sections: vec![],
        })
    }

    /// One navigation entry per section, in page order.
    pub fn nav_entries(&self) -> Vec<NavEntry> {
        self.sections
            .iter()
            .map(|s| NavEntry::new(s.id.clone(), s.title.clone()))
            .collect()
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}

/// Fenced block holding reveal data instead of code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataBlock {
    Stats,
    Skills,
}

impl DataBlock {
    fn from_info(info: &str) -> Option<Self> {
        match info.split_whitespace().next()? {
            "stats" => Some(DataBlock::Stats),
            "skills" => Some(DataBlock::Skills),
            _ => None,
        }
    }

    fn push(self, line: &str, section: &mut Section) {
        match self {
            DataBlock::Stats => match Stat::parse(line) {
                Some(stat) => section.stats.push(stat),
                None => warn!("Unreadable stat in '{}': {}", section.id, line.trim()),
            },
            DataBlock::Skills => match SkillLevel::parse(line) {
                Some(skill) => section.skills.push(skill),
                None => warn!("Unreadable skill level in '{}': {}", section.id, line.trim()),
            },
        }
    }
}

/// Skip a leading section that holds nothing at all, and make ids unique.
fn push_section(sections: &mut Vec<Section>, mut section: Section) {
    let blank = section.body.trim().is_empty() && section.stats.is_empty() && section.skills.is_empty();
    if sections.is_empty() && section.id == HOME_ID && blank {
        return;
    }
    section.body = section.body.trim().to_string();

    let base = section.id.clone();
    let mut n = 2;
    while sections.iter().any(|s| s.id == section.id) {
        section.id = format!("{base}-{n}");
        n += 1;
    }
    if section.id != base {
        warn!("Duplicate section id '{}' renamed to '{}'", base, section.id);
    }
    sections.push(section);
}

/// `"Work {#projects}"` -> `("Work", Some("projects"))`.
fn split_anchor(heading: &str) -> (String, Option<String>) {
    let heading = heading.trim();
    if let Some(start) = heading.rfind("{#")
        && heading.ends_with('}')
    {
        let id = heading[start + 2..heading.len() - 1].trim();
        if !id.is_empty() {
            return (heading[..start].trim().to_string(), Some(id.to_string()));
        }
    }
    (heading.to_string(), None)
}

/// Lowercase alphanumerics joined by single dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}

/// Markdown reduced to plain text: formatting dropped, block structure kept.
pub fn plain_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => out.push_str("• "),
            Event::End(TagEnd::Paragraph | TagEnd::Item | TagEnd::Heading(_)) => out.push('\n'),
            Event::End(TagEnd::CodeBlock) => {}
            Event::End(TagEnd::List(_)) => out.push('\n'),
            _ => {}
        }
    }
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

const SAMPLE: &str = r#"# Alex Rivera

Full Stack Developer | Data Analyst | Problem Solver

Building reliable software and finding the story in data.
Press `Tab` to move between sections, `t` to switch theme.

## About {#about}

I am an engineering student who enjoys building things end to end:
APIs, dashboards, and the small tools that glue them together.

- **Location:** Somewhere with good coffee
- **Focus:** Web platforms, analytics, developer tooling

```stats
20 Projects shipped
3 Years of coding
15 Technologies
```

## Skills {#skills}

- **Languages:** Rust, Python, JavaScript, SQL
- **Frontend:** React, HTML5, CSS3
- **Backend:** Node.js, Flask, REST APIs
- **Data:** Pandas, NumPy, Power BI

```skills
Rust 80%
Python 90%
JavaScript 85%
SQL 75%
```

## Projects {#projects}

### E-Commerce Platform
Responsive storefront with authentication and payments.
Technologies: MongoDB, Express.js, React, Node.js
[Live demo](#) · [Source](https://github.com/alexrivera/shop)

### Sales Analytics Dashboard
Real-time dashboard tracking 15+ KPIs with automated ETL.
Technologies: Power BI, SQL, Python
[Source](#)

```rust
fn main() {
    println!("Hello from the portfolio!");
}
```

## Experience {#experience}

**Coordinator**, Student Society (2023 - Present)
Led a team of 50+ students organizing 10+ events.

**Volunteer**, Community Foundation (2022 - Present)
Built data collection tools to measure program impact.

## Contact {#contact}

Press `c` to write a message, or `r` to download the resume.
Press `o` to see the links in the current section.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_sections() {
        let doc = Document::parse("# Jane\nintro\n## About Me\nhello\n## Work {#projects}\nstuff\n").unwrap();
        assert_eq!(doc.title, "Jane");
        let ids: Vec<&str> = doc.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["home", "about-me", "projects"]);
        assert_eq!(doc.sections[0].body, "intro");
        assert_eq!(doc.sections[2].title, "Work");
    }

    #[test]
    fn test_empty_intro_is_dropped() {
        let doc = Document::parse("# Jane\n\n## About\nhi\n").unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].id, "about");
    }

    #[test]
    fn test_duplicate_ids_get_suffix() {
        let doc = Document::parse("## Notes\na\n## Notes\nb\n## Notes\nc\n").unwrap();
        let ids: Vec<&str> = doc.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["notes", "notes-2", "notes-3"]);
    }

    #[test]
    fn test_headings_inside_code_fences_are_body() {
        let doc = Document::parse("## Code\n```md\n## not a section\n```\n").unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections[0].body.contains("## not a section"));
    }

    #[test]
    fn test_empty_document_is_an_error() {
        assert!(matches!(Document::parse("   \n"), Err(ContentError::Empty)));
    }

    #[test]
    fn test_data_blocks_leave_the_body() {
        let doc = Document::parse(
            "## About\nHi.\n```stats\n20 Projects\nlots of tea\n```\n```rust\nlet x = 1;\n```\n## Skills\n~~~skills\nRust 80%\n~~~\n",
        )
        .unwrap();
        let about = doc.section("about").unwrap();
        assert_eq!(about.stats, vec![Stat { label: "Projects".into(), target: 20 }]);
        assert!(!about.body.contains("Projects"));
        assert!(about.body.contains("let x = 1;"), "ordinary fences stay");
        assert_eq!(doc.section("skills").unwrap().skills.len(), 1);
        assert!(doc.section("skills").unwrap().body.is_empty());
    }

    #[test]
    fn test_sample_carries_reveal_data() {
        let doc = Document::sample();
        assert_eq!(doc.section("about").unwrap().stats.len(), 3);
        assert_eq!(doc.section("skills").unwrap().skills.len(), 4);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("About Me"), "about-me");
        assert_eq!(slugify("  C++ & Rust!  "), "c-rust");
        assert_eq!(slugify("???"), "section");
    }

    #[test]
    fn test_sample_has_home_first() {
        let doc = Document::sample();
        assert_eq!(doc.sections[0].id, HOME_ID);
        assert!(doc.section("projects").is_some());
        assert_eq!(doc.nav_entries().len(), doc.sections.len());
    }

    #[test]
    fn test_section_links() {
        let doc = Document::parse("## Work\n[Demo](#) and [`repo`](https://example.com/r) [](https://x.dev)\n").unwrap();
        let links = doc.sections[0].links();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0], Link { label: "Demo".into(), target: "#".into() });
        assert_eq!(links[1].label, "repo");
        assert_eq!(links[2].label, "https://x.dev");
        assert!(Document::sample().section("projects").unwrap().links().len() >= 2);
    }

    #[test]
    fn test_plain_text_strips_formatting() {
        let text = plain_text("Some **bold** and `code`.\n\n- one\n- two\n");
        assert!(text.contains("Some bold and code."));
        assert!(text.contains("• one"));
        assert!(!text.contains("**"));
    }
}
