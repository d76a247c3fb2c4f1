//! # Resume Export
//!
//! Plain-text resume generated from the page content. The TUI hands the
//! result to `handoff::save_download`.

use chrono::{Datelike, Utc};

use crate::core::content::{Document, HOME_ID, plain_text};

/// A generated text file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub contents: String,
}

/// Render the whole document as a text resume.
pub fn generate(doc: &Document, contact_email: Option<&str>) -> ResumeFile {
    let owner = if doc.title.trim().is_empty() {
        "Portfolio"
    } else {
        doc.title.trim()
    };

    let mut contents = String::new();
    contents.push_str(&owner.to_uppercase());
    contents.push('\n');

    if let Some(email) = contact_email {
        contents.push_str(&format!("Email: {email}\n"));
    }

    for section in &doc.sections {
        contents.push('\n');
        if section.id != HOME_ID {
            contents.push_str(&section.title.to_uppercase());
            contents.push('\n');
        }
        let text = plain_text(&section.body);
        if !text.trim().is_empty() {
            contents.push_str(text.trim_end());
            contents.push('\n');
        }
        for stat in &section.stats {
            contents.push_str(&format!("• {}+ {}\n", stat.target, stat.label));
        }
        for skill in &section.skills {
            contents.push_str(&format!("• {} ({}%)\n", skill.label, skill.percent));
        }
    }

    ResumeFile {
        file_name: file_name(owner, Utc::now().year()),
        contents,
    }
}

/// `Alex Rivera` -> `Alex_Rivera_Resume_2025.txt`.
fn file_name(owner: &str, year: i32) -> String {
    let stem: Vec<&str> = owner
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect();
    format!("{}_Resume_{}.txt", stem.join("_"), year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("Alex Rivera", 2025), "Alex_Rivera_Resume_2025.txt");
        assert_eq!(file_name("J. R. Smith-Jones", 2026), "J_R_Smith_Jones_Resume_2026.txt");
    }

    #[test]
    fn test_generate_includes_sections_as_plain_text() {
        let doc = Document::parse(
            "# Sam Lee\nDeveloper\n## Skills\n- **Rust**\n- SQL\n```skills\nGo 60%\n```\n## Contact\nSay hi\n",
        )
        .unwrap();
        let resume = generate(&doc, Some("sam@example.com"));

        assert!(resume.contents.starts_with("SAM LEE\nEmail: sam@example.com\n"));
        assert!(resume.contents.contains("Developer"));
        assert!(resume.contents.contains("SKILLS\n• Rust"));
        assert!(resume.contents.contains("• Go (60%)\n"));
        assert!(resume.contents.contains("CONTACT\nSay hi"));
        assert!(!resume.contents.contains("**"));
        assert!(resume.file_name.starts_with("Sam_Lee_Resume_"));
    }

    #[test]
    fn test_untitled_document() {
        let doc = Document::parse("## Only\ntext\n").unwrap();
        let resume = generate(&doc, None);
        assert!(resume.contents.starts_with("PORTFOLIO\n"));
        assert!(resume.file_name.starts_with("Portfolio_Resume_"));
    }
}
