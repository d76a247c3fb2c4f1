use folio::core::action::{Action, Effect, update};
use folio::core::config::{self, CliOverrides, FolioConfig};
use folio::core::content::Document;
use folio::core::nav::{NavEntry, NavHighlightTracker, SectionBounds, TrackerConfig};
use folio::core::notify::{NotificationQueue, Severity, ToastPhase, ToastTimings};
use folio::core::prefs::{MemoryStore, PreferenceStore};
use folio::core::state::{Portfolio, Settings};
use folio::core::theme::{THEME_KEY, Theme, ThemeState};

// ============================================================================
// Helper Functions
// ============================================================================

/// The three-section page used throughout: 800px per section.
fn sections() -> Vec<SectionBounds> {
    vec![
        SectionBounds::new("home", 0, 800),
        SectionBounds::new("about", 800, 800),
        SectionBounds::new("projects", 1600, 800),
    ]
}

fn tracker() -> NavHighlightTracker {
    let entries = vec![
        NavEntry::new("home", "Home"),
        NavEntry::new("about", "About"),
        NavEntry::new("projects", "Projects"),
    ];
    NavHighlightTracker::new(entries, TrackerConfig::default())
}

fn settings() -> Settings {
    Settings {
        default_theme: Theme::Light,
        contact_email: Some("owner@example.com".to_string()),
        profile_url: None,
        download_dir: std::env::temp_dir(),
        tracker: TrackerConfig::default(),
        scrolled_threshold: 50,
        mobile_breakpoint: 80,
        smooth_scroll_ms: 0,
        scroll_throttle_ms: 100,
    }
}

const PAGE: &str = "# Owner\n\nHello.\n\n## About {#about}\n\nMe.\n\n## Projects {#projects}\n\nWork.\n";

/// A page whose layout matches `sections()`, viewport 600.
fn portfolio() -> Portfolio {
    let doc = Document::parse(PAGE).unwrap();
    let mut app = Portfolio::new(doc, Box::new(MemoryStore::new()), settings());
    update(
        &mut app,
        Action::Layout {
            sections: sections(),
            content_height: 2400,
            viewport_height: 600,
            header_height: 0,
        },
    );
    app
}

// ============================================================================
// Active section detection
// ============================================================================

#[test]
fn every_offset_selects_exactly_one_entry() {
    let mut nav = tracker();
    for offset in (0..3000).step_by(7) {
        let active = nav.on_scroll(offset, &sections()).map(str::to_string);
        let active = active.expect("always one active entry");
        assert!(["home", "about", "projects"].contains(&active.as_str()));
        assert_eq!(nav.entries().iter().filter(|e| nav.active() == Some(e.id.as_str())).count(), 1);
    }
}

#[test]
fn scroll_900_selects_about() {
    let mut nav = tracker();
    assert_eq!(nav.on_scroll(900, &sections()), Some("about"));
}

#[test]
fn repeated_scroll_at_same_offset_is_stable() {
    let mut nav = tracker();
    let first = nav.on_scroll(1480, &sections()).map(str::to_string);
    for _ in 0..5 {
        assert_eq!(nav.on_scroll(1480, &sections()).map(str::to_string), first);
    }
}

#[test]
fn navigation_intent_survives_scroll_at_old_position() {
    let mut nav = tracker();
    nav.on_scroll(0, &sections());
    nav.navigate_to("projects", 0, 0, &sections()).unwrap();

    assert_eq!(nav.on_scroll(0, &sections()), Some("projects"));
    // Once the page moves, detection takes over again
    assert_eq!(nav.on_scroll(900, &sections()), Some("about"));
}

#[test]
fn missing_target_leaves_state_untouched() {
    let mut nav = tracker();
    nav.on_scroll(900, &sections());
    assert!(nav.navigate_to("blog", 900, 0, &sections()).is_err());
    assert_eq!(nav.active(), Some("about"));
}

// ============================================================================
// Mixed section heights (terminal rows)
// ============================================================================

/// Terminal thresholds as shipped.
fn row_tracker() -> NavHighlightTracker {
    let resolved = config::resolve_with(&FolioConfig::default(), &CliOverrides::default(), |_| None);
    let entries = ["home", "stats", "about", "projects", "contact"]
        .into_iter()
        .map(|id| NavEntry::new(id, id))
        .collect();
    NavHighlightTracker::new(entries, resolved.tracker)
}

/// Uneven rows with a 30-row view: `stats` is two rows, shorter than
/// the scroll_probe plus boundary_tolerance band; `contact` carries the end-of-page padding.
fn row_sections() -> Vec<SectionBounds> {
    vec![
        SectionBounds::new("home", 0, 10),
        SectionBounds::new("stats", 10, 2),
        SectionBounds::new("about", 12, 4),
        SectionBounds::new("projects", 16, 40),
        SectionBounds::new("contact", 56, 30),
    ]
}

#[test]
fn mixed_heights_select_one_entry_in_page_order() {
    let mut nav = row_tracker();
    let mut seen: Vec<String> = Vec::new();
    // content 86 rows, view 30: the last offset is 56
    for offset in 0..=56 {
        let active = nav.on_scroll(offset, &row_sections()).expect("one active entry").to_string();
        assert_eq!(nav.entries().iter().filter(|e| nav.active() == Some(e.id.as_str())).count(), 1);
        if seen.last() != Some(&active) {
            seen.push(active);
        }
    }
    assert_eq!(seen, vec!["home", "stats", "about", "projects", "contact"]);
}

#[test]
fn section_shorter_than_detection_band_is_still_reachable() {
    let mut nav = row_tracker();
    let hits: Vec<u32> = (0..=56)
        .filter(|&offset| nav.on_scroll(offset, &row_sections()) == Some("stats"))
        .collect();
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|&offset| offset < 10), "reached while its rows sit below the top");
}

#[test]
fn navigating_to_each_measured_section_keeps_it_active() {
    let mut nav = row_tracker();
    nav.on_scroll(0, &row_sections());
    for id in ["about", "projects", "contact", "home"] {
        let from = 0;
        let target = nav.navigate_to(id, from, 0, &row_sections()).unwrap();
        assert_eq!(nav.on_scroll(from, &row_sections()), Some(id), "before the view moves");
        assert_eq!(nav.on_scroll(target.min(56), &row_sections()), Some(id), "once it lands");
    }
}

#[test]
fn end_of_page_reports_the_last_section() {
    let mut nav = row_tracker();
    assert_eq!(nav.on_scroll(56, &row_sections()), Some("contact"));
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn rapid_notifications_show_only_the_latest() {
    let mut queue = NotificationQueue::new(ToastTimings::default());
    queue.notify("Switched to dark mode", Severity::Success, 0);
    queue.notify("Using fallback avatar", Severity::Info, 0);

    for now in [0, 50, 100, 200, 1000, 3999] {
        queue.advance(now);
        let live = queue.live().expect("one live toast");
        assert_eq!(live.message, "Using fallback avatar");
        assert_eq!(live.severity, Severity::Info);
    }
}

#[test]
fn toast_leaves_after_hold() {
    let mut queue = NotificationQueue::new(ToastTimings::default());
    queue.notify("Saved", Severity::Success, 1000);
    queue.advance(1100);
    assert_eq!(queue.live().unwrap().phase, ToastPhase::Visible);
    queue.advance(5000);
    assert_eq!(queue.live().unwrap().phase, ToastPhase::Leaving);
    queue.advance(5300);
    assert!(queue.live().is_none());
}

#[test]
fn replaced_toast_timers_do_not_touch_the_new_one() {
    let mut queue = NotificationQueue::new(ToastTimings::default());
    queue.notify("first", Severity::Info, 0);
    queue.notify("second", Severity::Info, 3000);
    // The first toast would have started leaving at 4000
    queue.advance(4500);
    assert_eq!(queue.live().unwrap().message, "second");
    assert_eq!(queue.live().unwrap().phase, ToastPhase::Visible);
}

// ============================================================================
// Theme
// ============================================================================

#[test]
fn theme_toggle_twice_restores_persisted_value() {
    let mut store = MemoryStore::new();
    store.set(THEME_KEY, "dark").unwrap();
    let mut theme = ThemeState::load(&store, Theme::Light);
    assert_eq!(theme.current(), Theme::Dark);

    theme.toggle(&mut store);
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    theme.toggle(&mut store);
    assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    assert_eq!(theme.current(), Theme::Dark);
}

// ============================================================================
// Whole page through update()
// ============================================================================

#[test]
fn scrolling_updates_highlight_through_throttle() {
    let mut app = portfolio();
    update(&mut app, Action::Tick(1000));
    update(&mut app, Action::ScrollTo(900));
    assert_eq!(app.nav.active(), Some("about"), "leading call runs at once");

    update(&mut app, Action::Tick(1020));
    update(&mut app, Action::ScrollTo(1700));
    assert_eq!(app.nav.active(), Some("about"), "trailing call waits for the window");

    update(&mut app, Action::Tick(1100));
    assert_eq!(app.nav.active(), Some("projects"));
}

#[test]
fn theme_toggle_notifies_and_replaces() {
    let mut app = portfolio();
    update(&mut app, Action::ToggleTheme);
    update(&mut app, Action::Notify {
        message: "Using fallback avatar".to_string(),
        severity: Severity::Info,
    });
    update(&mut app, Action::Tick(200));
    let live = app.toasts.live().unwrap();
    assert_eq!(live.message, "Using fallback avatar");
    assert_eq!(app.theme.current(), Theme::Dark);
}

#[test]
fn contact_submit_builds_mailto() {
    let mut app = portfolio();
    update(&mut app, Action::OpenContact);
    let mut form = folio::core::contact::ContactForm::default();
    form.name = "Sam".into();
    form.email = "sam@example.com".into();
    form.message = "Hi & bye".into();

    let Effect::Open(link) = update(&mut app, Action::SubmitContact(form)) else {
        panic!("expected a mailto handoff");
    };
    assert!(link.starts_with("mailto:owner@example.com?subject="));
    assert!(link.contains("Hi%20%26%20bye"));
}
