//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::action::{Action, update};
use crate::core::content::Document;
use crate::core::nav::{SectionBounds, TrackerConfig};
use crate::core::prefs::MemoryStore;
use crate::core::state::{Portfolio, Settings};
use crate::core::theme::Theme;
use crate::handoff::{HandoffError, Opener};

/// Height of every section in `laid_out_app`.
pub const PAGE_SECTION_HEIGHT: u32 = 800;

/// Web-sized thresholds and no smooth scrolling, so offsets land at once.
pub fn test_settings() -> Settings {
    Settings {
        default_theme: Theme::Light,
        contact_email: Some("alex@example.com".to_string()),
        profile_url: Some("https://github.com/alexrivera".to_string()),
        download_dir: PathBuf::from("."),
        tracker: TrackerConfig::default(),
        scrolled_threshold: 50,
        mobile_breakpoint: 80,
        smooth_scroll_ms: 0,
        scroll_throttle_ms: 100,
    }
}

/// Creates a test Portfolio over the sample document with an in-memory store.
pub fn test_app() -> Portfolio {
    Portfolio::new(
        Document::sample(),
        Box::new(MemoryStore::new()),
        test_settings(),
    )
}

/// `test_app` after a layout pass: sections stacked at 800 rows each,
/// a 600-row viewport and no overlaid header.
pub fn laid_out_app() -> Portfolio {
    let mut app = test_app();
    let sections: Vec<SectionBounds> = app
        .document
        .sections
        .iter()
        .enumerate()
        .map(|(i, s)| SectionBounds::new(s.id.clone(), i as u32 * PAGE_SECTION_HEIGHT, PAGE_SECTION_HEIGHT))
        .collect();
    let content_height = sections.len() as u32 * PAGE_SECTION_HEIGHT;
    update(
        &mut app,
        Action::Layout {
            sections,
            content_height,
            viewport_height: 600,
            header_height: 0,
        },
    );
    app
}

/// Opener that records targets instead of launching anything.
#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl Opener for RecordingOpener {
    fn name(&self) -> &str {
        "recording"
    }

    async fn open(&self, target: &str) -> Result<(), HandoffError> {
        if self.fail {
            return Err(HandoffError::Launch(format!("refused {target}")));
        }
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(target.to_string());
        }
        Ok(())
    }
}
