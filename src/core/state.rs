//! # Portfolio State
//!
//! All page state in one place. No terminal types live here; the TUI reads
//! this struct to draw and feeds `Action`s back through `update()`.
//!
//! ```text
//! Portfolio
//! ├── document: Document            // sections from the content file
//! ├── nav: NavHighlightTracker      // active navigation entry
//! ├── toasts: NotificationQueue     // at most one live toast
//! ├── theme: ThemeState             // light/dark, persisted via prefs
//! ├── scroll: PageScroll            // offset + smooth-scroll animation
//! ├── scroll_throttle: Throttle     // 100ms leading/trailing gate for scroll handling
//! ├── sections: Vec<SectionBounds>  // last layout reported by the TUI
//! ├── navbar_scrolled: bool         // emphasis once the page leaves the top
//! ├── menu: MobileMenu              // collapsed navigation on narrow terminals
//! ├── overlay: Overlay              // resume modal / contact form / links
//! ├── reveal: Reveal                // stat counters and skill bars
//! ├── counters_animated: bool       // counters played; never again
//! ├── bars_animated: bool           // skill bars played; never again
//! └── now: Millis                   // virtual time of the last Tick
//! ```

use std::path::PathBuf;

use crate::core::config::ResolvedConfig;
use crate::core::content::Document;
use crate::core::nav::{NavHighlightTracker, SectionBounds, TrackerConfig};
use crate::core::notify::{NotificationQueue, Severity, ToastTimings};
use crate::core::prefs::PreferenceStore;
use crate::core::reveal::Reveal;
use crate::core::schedule::Millis;
use crate::core::scroll::PageScroll;
use crate::core::startup;
use crate::core::theme::{Theme, ThemeState};
use crate::core::throttle::Throttle;

/// Frame interval while a smooth scroll is running.
pub const FRAME_MS: Millis = 16;

/// Navigation menu shown in place of the link bar on narrow terminals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        log::debug!("Mobile menu {}", if self.open { "opened" } else { "closed" });
        self.open
    }

    /// Returns true if the menu was open.
    pub fn close(&mut self) -> bool {
        std::mem::take(&mut self.open)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    None,
    Resume,
    Contact,
    /// Links of the active section.
    Links,
}

/// Settings the reducer consults; resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub default_theme: Theme,
    pub contact_email: Option<String>,
    pub profile_url: Option<String>,
    pub download_dir: PathBuf,
    pub tracker: TrackerConfig,
    pub scrolled_threshold: u32,
    pub mobile_breakpoint: u16,
    pub smooth_scroll_ms: Millis,
    pub scroll_throttle_ms: Millis,
}

impl Settings {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            default_theme: config.default_theme,
            contact_email: config.contact_email.clone(),
            profile_url: config.profile_url.clone(),
            download_dir: config.download_dir.clone(),
            tracker: config.tracker,
            scrolled_threshold: config.scrolled_threshold,
            mobile_breakpoint: config.mobile_breakpoint,
            smooth_scroll_ms: config.smooth_scroll_ms,
            scroll_throttle_ms: config.scroll_throttle_ms,
        }
    }
}

pub struct Portfolio {
    pub document: Document,
    pub nav: NavHighlightTracker,
    pub toasts: NotificationQueue,
    pub theme: ThemeState,
    pub prefs: Box<dyn PreferenceStore>,
    pub scroll: PageScroll,
    pub scroll_throttle: Throttle<u32>,
    pub sections: Vec<SectionBounds>,
    pub header_height: u32,
    pub navbar_scrolled: bool,
    pub menu: MobileMenu,
    pub overlay: Overlay,
    pub reveal: Reveal,
    /// Set the first time the counters' section enters the view.
    pub counters_animated: bool,
    /// Set the first time the skill bars' section enters the view.
    pub bars_animated: bool,
    /// False when the contact step failed at startup (no recipient).
    pub contact_enabled: bool,
    pub viewport_width: u16,
    pub settings: Settings,
    pub now: Millis,
}

impl Portfolio {
    /// Build the page state and run the startup plan.
    pub fn new(document: Document, prefs: Box<dyn PreferenceStore>, settings: Settings) -> Self {
        let mut app = Self {
            document,
            nav: NavHighlightTracker::new(Vec::new(), settings.tracker),
            toasts: NotificationQueue::new(ToastTimings::default()),
            theme: ThemeState::new(settings.default_theme),
            prefs,
            scroll: PageScroll::default(),
            scroll_throttle: Throttle::new(settings.scroll_throttle_ms),
            sections: Vec::new(),
            header_height: 0,
            navbar_scrolled: false,
            menu: MobileMenu::default(),
            overlay: Overlay::None,
            reveal: Reveal::default(),
            counters_animated: false,
            bars_animated: false,
            contact_enabled: false,
            viewport_width: 0,
            settings,
            now: 0,
        };
        startup::run(&startup::default_plan(), &mut app);
        app
    }

    pub fn from_config(
        document: Document,
        prefs: Box<dyn PreferenceStore>,
        config: &ResolvedConfig,
    ) -> Self {
        Self::new(document, prefs, Settings::from_config(config))
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        self.toasts.notify(message, severity, self.now)
    }

    /// Whether the link bar should collapse into the menu.
    pub fn is_compact(&self) -> bool {
        self.viewport_width > 0 && self.viewport_width <= self.settings.mobile_breakpoint
    }

    /// Scroll handlers: active-section tracking, navbar emphasis and reveals.
    pub fn run_scroll_handlers(&mut self, offset: u32) {
        self.nav.on_scroll(offset, &self.sections);
        self.navbar_scrolled = offset > self.settings.scrolled_threshold;
        self.reveal_in_view(offset);
    }

    /// Start each reveal the first time its section shows any row in the view.
    pub fn reveal_in_view(&mut self, offset: u32) {
        let viewport = self.scroll.viewport_height();
        let visible = |id: Option<&str>| {
            id.is_some_and(|id| {
                self.sections.iter().any(|s| {
                    s.id == id && s.top < offset.saturating_add(viewport) && offset < s.top + s.height
                })
            })
        };
        let counters = !self.counters_animated && visible(self.reveal.counters_section());
        let bars = !self.bars_animated && visible(self.reveal.bars_section());

        if counters {
            self.counters_animated = true;
            self.reveal.start_counters(self.now);
        }
        if bars {
            self.bars_animated = true;
            self.reveal.start_bars(self.now);
        }
    }

    /// Report a scroll position change through the throttle.
    pub fn scrolled(&mut self) {
        let offset = self.scroll.offset();
        if let Some(offset) = self.scroll_throttle.call(self.now, offset) {
            self.run_scroll_handlers(offset);
        }
    }

    /// Earliest virtual time at which a `Tick` has work to do.
    pub fn next_deadline(&self) -> Option<Millis> {
        let frame = self
            .scroll
            .is_animating()
            .then(|| self.now + FRAME_MS);
        [
            self.toasts.next_due(),
            self.scroll_throttle.deadline(),
            self.reveal.next_due(),
            frame,
        ]
            .into_iter()
            .flatten()
            .min()
    }
}
