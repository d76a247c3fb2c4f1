//! # Navigation Highlight
//!
//! Keeps exactly one navigation entry marked active.
//!
//! Two inputs mutate the active entry:
//!
//! - **Explicit intent** (`navigate_to`): the user picked a section. The entry
//!   becomes active immediately, before the view has moved.
//! - **Scroll inference** (`on_scroll`): the section under the probe line
//!   `offset + scroll_probe` wins, with a tolerance band at each boundary.
//!
//! Whichever fires last wins. The one exception: right after `navigate_to`,
//! a scroll report at the unchanged pre-navigation offset does not override
//! the intent. The scroll position has to actually move first.
//!
//! ```text
//!  offset ─┬──────────────────────────
//!          │ header
//!  probe ──┼─ offset + 100 ───────────  <- lands in [top - 50, bottom - 50)
//!          │
//! ```

use std::fmt;

use log::{debug, info, warn};

/// A link in the navigation bar. Order is visual order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub id: String,
    pub label: String,
}

impl NavEntry {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Vertical extent of a rendered section, in content rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBounds {
    pub id: String,
    pub top: u32,
    pub height: u32,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// Offsets used when mapping between scroll position and sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Gap left between the header and a section scrolled into place.
    pub header_margin: u32,
    /// Distance below the scroll offset that decides the current section.
    pub scroll_probe: u32,
    /// Sections count as starting (and ending) this much earlier.
    pub boundary_tolerance: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            header_margin: 20,
            scroll_probe: 100,
            boundary_tolerance: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// No section carries the requested identifier.
    MissingTarget(String),
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::MissingTarget(id) => write!(f, "target section not found: {id}"),
        }
    }
}

impl std::error::Error for NavError {}

#[derive(Debug, Clone)]
pub struct NavHighlightTracker {
    entries: Vec<NavEntry>,
    active: Option<String>,
    /// Scroll offset at the moment of the last explicit navigation.
    intent_anchor: Option<u32>,
    config: TrackerConfig,
}

impl NavHighlightTracker {
    /// Build from the navigation markup. Duplicate ids keep the first entry.
    pub fn new(entries: Vec<NavEntry>, config: TrackerConfig) -> Self {
        let mut unique: Vec<NavEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().any(|e| e.id == entry.id) {
                warn!("Duplicate navigation id '{}' ignored", entry.id);
                continue;
            }
            unique.push(entry);
        }
        info!("Navigation initialized with {} entries", unique.len());
        Self {
            entries: unique,
            active: None,
            intent_anchor: None,
            config,
        }
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_index(&self) -> Option<usize> {
        let active = self.active.as_deref()?;
        self.entries.iter().position(|e| e.id == active)
    }

    fn has_entry(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Mark `id` active without scrolling (initial state on load).
    pub fn set_active(&mut self, id: &str) -> Result<(), NavError> {
        if !self.has_entry(id) {
            return Err(NavError::MissingTarget(id.to_string()));
        }
        self.active = Some(id.to_string());
        Ok(())
    }

    /// Explicit navigation. Returns the scroll offset that puts the section
    /// just below the header.
    ///
    /// `current_offset` is the position before scrolling; a scroll report at
    /// that same offset will not override this choice.
    pub fn navigate_to(
        &mut self,
        id: &str,
        current_offset: u32,
        header_height: u32,
        sections: &[SectionBounds],
    ) -> Result<u32, NavError> {
        let Some(section) = sections.iter().find(|s| s.id == id) else {
            warn!("Target section not found: {}", id);
            return Err(NavError::MissingTarget(id.to_string()));
        };
        if !self.has_entry(id) {
            warn!("Section '{}' has no navigation entry", id);
            return Err(NavError::MissingTarget(id.to_string()));
        }

        let target = section
            .top
            .saturating_sub(header_height)
            .saturating_sub(self.config.header_margin);

        debug!("Navigating to '{}' (offset {} -> {})", id, current_offset, target);
        self.active = Some(id.to_string());
        self.intent_anchor = Some(current_offset);
        Ok(target)
    }

    /// Recompute the active entry from the scroll position.
    ///
    /// Idempotent: repeating the call at the same offset with the same layout
    /// never changes the result.
    pub fn on_scroll(&mut self, offset: u32, sections: &[SectionBounds]) -> Option<&str> {
        if self.entries.is_empty() {
            debug!("Scroll ignored: no navigation entries");
            return None;
        }

        match self.intent_anchor {
            Some(anchor) if anchor == offset && self.active.is_some() => {
                return self.active.as_deref();
            }
            _ => self.intent_anchor = None,
        }

        let detected = self.detect(offset, sections).to_string();
        if self.active.as_deref() != Some(detected.as_str()) {
            debug!("Active section -> {}", detected);
            self.active = Some(detected);
        }
        self.active.as_deref()
    }

    /// The section under the probe line, or the first entry if none match.
    ///
    /// Sections without a navigation entry are skipped so the result always
    /// names an entry.
    fn detect(&self, offset: u32, sections: &[SectionBounds]) -> &str {
        let probe = i64::from(offset) + i64::from(self.config.scroll_probe);
        let tolerance = i64::from(self.config.boundary_tolerance);

        let mut current = self.entries[0].id.as_str();
        for section in sections {
            let top = i64::from(section.top);
            let bottom = top + i64::from(section.height);
            if probe >= top - tolerance && probe < bottom - tolerance {
                if let Some(entry) = self.entries.iter().find(|e| e.id == section.id) {
                    current = entry.id.as_str();
                }
            }
        }
        current
    }
}
