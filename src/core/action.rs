//! # Actions
//!
//! Everything that can happen on the page becomes an `Action`.
//! User presses Tab? That's `Action::NextSection`.
//! The browser handoff finished? That's `Action::Opened(target)`.
//!
//! `update()` applies an action to `Portfolio` and returns an `Effect`:
//! the I/O the adapter should perform. No I/O happens here.
//!
//! ```text
//! Portfolio + Action  →  update()  →  Portfolio' + Effect
//! ```

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::core::contact::ContactForm;
use crate::core::nav::SectionBounds;
use crate::core::notify::Severity;
use crate::core::resume::{self, ResumeFile};
use crate::core::schedule::Millis;
use crate::core::state::{Overlay, Portfolio};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Virtual clock advanced to this instant.
    Tick(Millis),
    /// The adapter measured the page.
    Layout {
        sections: Vec<SectionBounds>,
        content_height: u32,
        viewport_height: u32,
        header_height: u32,
    },
    Resized { width: u16 },
    ScrollBy(i64),
    ScrollTo(u32),
    NavigateTo(String),
    NextSection,
    PrevSection,
    ToggleTheme,
    ToggleMenu,
    /// Any click on the page outside the menu toggle.
    PageClicked,
    OpenResume,
    DownloadResume,
    OpenContact,
    SubmitContact(ContactForm),
    OpenLinks,
    OpenLink(String),
    CloseOverlay,
    Notify { message: String, severity: Severity },
    DismissToast,
    /// An external handoff completed.
    Opened(String),
    Saved(PathBuf),
    HandoffFailed(String),
    Quit,
}

/// I/O requested by `update()`, performed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Hand a URL (web or mailto) to the system opener.
    Open(String),
    Save(ResumeFile),
}

pub const RESUME_SAVED: &str = "Resume downloaded successfully!";
pub const CONTACT_SENT: &str = "Thank you! Your email client should open now.";

pub fn update(app: &mut Portfolio, action: Action) -> Effect {
    match action {
        Action::Tick(now) => {
            tick(app, now);
            Effect::None
        }
        Action::Layout {
            sections,
            content_height,
            viewport_height,
            header_height,
        } => {
            app.sections = sections;
            app.header_height = header_height;
            let before = app.scroll.offset();
            app.scroll.resize(content_height, viewport_height);
            if app.scroll.offset() != before {
                app.scrolled();
            }
            // A section may be in view without any scrolling
            app.reveal_in_view(app.scroll.offset());
            Effect::None
        }
        Action::Resized { width } => {
            app.viewport_width = width;
            if !app.is_compact() && app.menu.close() {
                debug!("Mobile menu closed: viewport wider than breakpoint");
            }
            Effect::None
        }
        Action::ScrollBy(delta) => {
            if !app.scroll.is_locked() {
                let before = app.scroll.offset();
                if app.scroll.scroll_by(delta) != before {
                    app.scrolled();
                }
            }
            Effect::None
        }
        Action::ScrollTo(offset) => {
            if !app.scroll.is_locked() {
                let before = app.scroll.offset();
                if app.scroll.jump_to(offset) != before {
                    app.scrolled();
                }
            }
            Effect::None
        }
        Action::NavigateTo(id) => {
            navigate(app, &id);
            Effect::None
        }
        Action::NextSection => {
            if let Some(id) = neighbor(app, 1) {
                navigate(app, &id);
            }
            Effect::None
        }
        Action::PrevSection => {
            if let Some(id) = neighbor(app, -1) {
                navigate(app, &id);
            }
            Effect::None
        }
        Action::ToggleTheme => {
            let theme = app.theme.toggle(app.prefs.as_mut());
            app.notify(format!("Switched to {theme} mode"), Severity::Success);
            Effect::None
        }
        Action::ToggleMenu => {
            app.menu.toggle();
            Effect::None
        }
        Action::PageClicked => {
            if app.menu.close() {
                debug!("Mobile menu closed by outside click");
            }
            Effect::None
        }
        Action::OpenResume => {
            open_overlay(app, Overlay::Resume);
            Effect::None
        }
        Action::DownloadResume => {
            let file = resume::generate(&app.document, app.settings.contact_email.as_deref());
            info!("Generated resume {}", file.file_name);
            close_overlay(app);
            Effect::Save(file)
        }
        Action::OpenContact => {
            if app.contact_enabled {
                open_overlay(app, Overlay::Contact);
            } else {
                app.notify("No contact address is configured", Severity::Error);
            }
            Effect::None
        }
        Action::SubmitContact(form) => submit_contact(app, &form),
        Action::OpenLinks => {
            open_overlay(app, Overlay::Links);
            Effect::None
        }
        Action::OpenLink(target) => {
            close_overlay(app);
            open_link(app, &target)
        }
        Action::CloseOverlay => {
            close_overlay(app);
            Effect::None
        }
        Action::Notify { message, severity } => {
            app.notify(message, severity);
            Effect::None
        }
        Action::DismissToast => {
            app.toasts.dismiss();
            Effect::None
        }
        Action::Opened(target) => {
            if target.starts_with("mailto:") {
                app.notify(CONTACT_SENT, Severity::Success);
            } else {
                info!("Opened {}", target);
            }
            Effect::None
        }
        Action::Saved(path) => {
            info!("Resume written to {}", path.display());
            app.notify(RESUME_SAVED, Severity::Success);
            Effect::None
        }
        Action::HandoffFailed(message) => {
            warn!("Handoff failed: {}", message);
            app.notify(message, Severity::Error);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn tick(app: &mut Portfolio, now: Millis) {
    // The clock never runs backwards
    app.now = app.now.max(now);
    let now = app.now;

    app.toasts.advance(now);
    app.reveal.advance(now);
    if app.scroll.step(now).is_some() {
        app.scrolled();
    }
    if let Some(offset) = app.scroll_throttle.poll(now) {
        app.run_scroll_handlers(offset);
    }
}

fn navigate(app: &mut Portfolio, id: &str) {
    app.menu.close();
    let from = app.scroll.offset();
    let Ok(target) = app
        .nav
        .navigate_to(id, from, app.header_height, &app.sections)
    else {
        return;
    };
    app.scroll
        .animate_to(target, app.now, app.settings.smooth_scroll_ms);
    if !app.scroll.is_animating() && app.scroll.offset() != from {
        app.scrolled();
    }
}

/// The entry `step` places away from the active one, clamped to the ends.
fn neighbor(app: &Portfolio, step: isize) -> Option<String> {
    let entries = app.nav.entries();
    let last = entries.len().checked_sub(1)?;
    let current = app.nav.active_index().unwrap_or(0);
    let next = current.saturating_add_signed(step).min(last);
    (next != current).then(|| entries[next].id.clone())
}

fn open_overlay(app: &mut Portfolio, overlay: Overlay) {
    app.menu.close();
    app.overlay = overlay;
    app.scroll.set_locked(true);
}

fn close_overlay(app: &mut Portfolio) {
    app.overlay = Overlay::None;
    app.scroll.set_locked(false);
}

fn submit_contact(app: &mut Portfolio, form: &ContactForm) -> Effect {
    let missing = form.missing_fields();
    if !missing.is_empty() {
        app.notify(
            format!("Please fill in: {}", missing.join(", ")),
            Severity::Error,
        );
        return Effect::None;
    }
    let Some(recipient) = app.settings.contact_email.clone() else {
        app.notify("No contact address is configured", Severity::Error);
        return Effect::None;
    };
    close_overlay(app);
    Effect::Open(form.mailto_link(&recipient))
}

/// Placeholder targets (`#` or empty) go to the profile page instead.
fn open_link(app: &mut Portfolio, target: &str) -> Effect {
    let target = target.trim();
    if !target.is_empty() && target != "#" {
        return Effect::Open(target.to_string());
    }
    match app.settings.profile_url.clone() {
        Some(url) => Effect::Open(url),
        None => {
            app.notify("This project has no public link yet", Severity::Info);
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notify::ToastPhase;
    use crate::core::prefs::PreferenceStore;
    use crate::core::reveal::{BAR_STAGGER_MS, COUNTER_DURATION_MS};
    use crate::core::theme::{THEME_KEY, Theme};
    use crate::test_support::{PAGE_SECTION_HEIGHT, laid_out_app, test_app};

    fn contact() -> ContactForm {
        ContactForm {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            subject: "Hi".into(),
            message: "Hello there".into(),
        }
    }

    #[test]
    fn test_navigate_jumps_and_highlights() {
        let mut app = laid_out_app();
        update(&mut app, Action::NavigateTo("about".into()));
        assert_eq!(app.nav.active(), Some("about"));
        // top 800, header 0, margin 20
        assert_eq!(app.scroll.offset(), PAGE_SECTION_HEIGHT - 20);
    }

    #[test]
    fn test_navigate_unknown_is_ignored() {
        let mut app = laid_out_app();
        update(&mut app, Action::NavigateTo("nowhere".into()));
        assert_eq!(app.nav.active(), Some("home"));
        assert_eq!(app.scroll.offset(), 0);
    }

    #[test]
    fn test_navigate_closes_menu() {
        let mut app = laid_out_app();
        update(&mut app, Action::ToggleMenu);
        update(&mut app, Action::NavigateTo("skills".into()));
        assert!(!app.menu.is_open());
    }

    #[test]
    fn test_smooth_navigation_keeps_intent_until_scroll_moves() {
        let mut app = laid_out_app();
        app.settings.smooth_scroll_ms = 300;
        update(&mut app, Action::NavigateTo("projects".into()));
        assert!(app.scroll.is_animating());

        // A scroll report at the pre-navigation offset keeps the intent
        app.run_scroll_handlers(0);
        assert_eq!(app.nav.active(), Some("projects"));

        for t in (0..=400).step_by(16) {
            update(&mut app, Action::Tick(t));
        }
        update(&mut app, Action::Tick(1_000));
        assert!(!app.scroll.is_animating());
        assert_eq!(app.scroll.offset(), 3 * PAGE_SECTION_HEIGHT - 20);
        assert_eq!(app.nav.active(), Some("projects"));
    }

    #[test]
    fn test_scroll_updates_active_through_throttle() {
        let mut app = laid_out_app();
        update(&mut app, Action::Tick(1_000));
        update(&mut app, Action::ScrollTo(900));
        assert_eq!(app.nav.active(), Some("about"), "leading call runs at once");

        update(&mut app, Action::Tick(1_010));
        update(&mut app, Action::ScrollTo(1_700));
        assert_eq!(app.nav.active(), Some("about"), "parked inside the window");

        update(&mut app, Action::Tick(1_100));
        assert_eq!(app.nav.active(), Some("skills"));
    }

    #[test]
    fn test_counters_fast_forward_and_play_once() {
        let mut app = laid_out_app();
        update(&mut app, Action::Tick(1_000));
        update(&mut app, Action::ScrollTo(PAGE_SECTION_HEIGHT));
        assert!(app.counters_animated);
        assert!(!app.bars_animated, "skills still below the view");

        update(&mut app, Action::Tick(1_000 + COUNTER_DURATION_MS));
        let done = |app: &Portfolio| {
            app.reveal
                .counters()
                .all(|(stat, text)| text == format!("{}+", stat.target))
        };
        assert!(done(&app));
        assert_eq!(app.reveal.next_due(), None);

        // Leave and come back: nothing replays
        update(&mut app, Action::Tick(4_000));
        update(&mut app, Action::ScrollTo(0));
        update(&mut app, Action::Tick(5_000));
        update(&mut app, Action::ScrollTo(PAGE_SECTION_HEIGHT));
        assert!(done(&app));
        assert_eq!(app.next_deadline(), None);
    }

    #[test]
    fn test_skill_bars_fill_after_navigation() {
        let mut app = laid_out_app();
        update(&mut app, Action::Tick(1_000));
        update(&mut app, Action::NavigateTo("skills".into()));
        assert!(app.bars_animated);
        let filled = |app: &Portfolio| app.reveal.bars().filter(|(_, shown)| *shown > 0).count();
        assert_eq!(filled(&app), 1);

        update(&mut app, Action::Tick(1_000 + BAR_STAGGER_MS));
        assert_eq!(filled(&app), 2);
        update(&mut app, Action::Tick(3_000));
        assert_eq!(filled(&app), app.reveal.bars().count());
        assert_eq!(app.reveal.next_due(), None);
    }

    #[test]
    fn test_navbar_scrolled_threshold() {
        let mut app = laid_out_app();
        update(&mut app, Action::ScrollTo(50));
        assert!(!app.navbar_scrolled);
        update(&mut app, Action::Tick(500));
        update(&mut app, Action::ScrollTo(51));
        assert!(app.navbar_scrolled);
    }

    #[test]
    fn test_next_and_prev_section() {
        let mut app = laid_out_app();
        update(&mut app, Action::PrevSection);
        assert_eq!(app.nav.active(), Some("home"));
        update(&mut app, Action::NextSection);
        assert_eq!(app.nav.active(), Some("about"));
        update(&mut app, Action::NextSection);
        update(&mut app, Action::PrevSection);
        assert_eq!(app.nav.active(), Some("about"));
    }

    #[test]
    fn test_toggle_theme_persists_and_notifies() {
        let mut app = test_app();
        update(&mut app, Action::ToggleTheme);
        assert_eq!(app.theme.current(), Theme::Dark);
        assert_eq!(app.prefs.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        let toast = app.toasts.live().unwrap();
        assert_eq!(toast.message, "Switched to dark mode");
        assert_eq!(toast.severity, Severity::Success);

        update(&mut app, Action::ToggleTheme);
        assert_eq!(app.prefs.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_rapid_notifications_show_only_latest() {
        let mut app = test_app();
        update(&mut app, Action::Tick(0));
        update(&mut app, Action::ToggleTheme);
        update(
            &mut app,
            Action::Notify {
                message: "Using fallback avatar".into(),
                severity: Severity::parse("info"),
            },
        );
        update(&mut app, Action::Tick(200));
        let toast = app.toasts.live().unwrap();
        assert_eq!(toast.message, "Using fallback avatar");
        assert_eq!(toast.phase, ToastPhase::Visible);

        update(&mut app, Action::Tick(4_300));
        assert!(app.toasts.live().is_none());
    }

    #[test]
    fn test_resume_modal_locks_scroll() {
        let mut app = laid_out_app();
        update(&mut app, Action::OpenResume);
        assert_eq!(app.overlay, Overlay::Resume);
        update(&mut app, Action::ScrollBy(300));
        assert_eq!(app.scroll.offset(), 0);

        update(&mut app, Action::CloseOverlay);
        update(&mut app, Action::ScrollBy(300));
        assert_eq!(app.scroll.offset(), 300);
    }

    #[test]
    fn test_download_resume_closes_modal_and_saves() {
        let mut app = test_app();
        update(&mut app, Action::OpenResume);
        let effect = update(&mut app, Action::DownloadResume);
        let Effect::Save(file) = effect else {
            panic!("expected a save effect, got {effect:?}");
        };
        assert!(file.file_name.starts_with("Alex_Rivera_Resume_"));
        assert_eq!(app.overlay, Overlay::None);
        assert!(!app.scroll.is_locked());

        update(&mut app, Action::Saved(PathBuf::from("/tmp/x.txt")));
        assert_eq!(app.toasts.live().unwrap().message, RESUME_SAVED);
    }

    #[test]
    fn test_submit_contact_opens_mail_draft() {
        let mut app = test_app();
        update(&mut app, Action::OpenContact);
        assert_eq!(app.overlay, Overlay::Contact);

        let effect = update(&mut app, Action::SubmitContact(contact()));
        let Effect::Open(link) = effect else {
            panic!("expected an open effect, got {effect:?}");
        };
        assert!(link.starts_with("mailto:"));
        assert_eq!(app.overlay, Overlay::None);

        update(&mut app, Action::Opened(link));
        assert_eq!(app.toasts.live().unwrap().message, CONTACT_SENT);
    }

    #[test]
    fn test_incomplete_contact_is_rejected() {
        let mut app = test_app();
        update(&mut app, Action::OpenContact);
        let form = ContactForm {
            message: String::new(),
            ..contact()
        };
        assert_eq!(update(&mut app, Action::SubmitContact(form)), Effect::None);
        assert_eq!(app.overlay, Overlay::Contact);
        assert_eq!(app.toasts.live().unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_contact_disabled_without_recipient() {
        let mut app = test_app();
        app.contact_enabled = false;
        update(&mut app, Action::OpenContact);
        assert_eq!(app.overlay, Overlay::None);
        assert_eq!(app.toasts.live().unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_placeholder_link_falls_back_to_profile() {
        let mut app = test_app();
        let profile = app.settings.profile_url.clone().unwrap();
        assert_eq!(update(&mut app, Action::OpenLink("#".into())), Effect::Open(profile));
        assert_eq!(
            update(&mut app, Action::OpenLink("https://x.dev".into())),
            Effect::Open("https://x.dev".into())
        );

        app.settings.profile_url = None;
        assert_eq!(update(&mut app, Action::OpenLink(String::new())), Effect::None);
    }

    #[test]
    fn test_menu_closes_on_outside_click_and_wide_resize() {
        let mut app = test_app();
        update(&mut app, Action::Resized { width: 60 });
        update(&mut app, Action::ToggleMenu);
        update(&mut app, Action::PageClicked);
        assert!(!app.menu.is_open());

        update(&mut app, Action::ToggleMenu);
        update(&mut app, Action::Resized { width: 70 });
        assert!(app.menu.is_open(), "still compact");
        update(&mut app, Action::Resized { width: 120 });
        assert!(!app.menu.is_open());
    }

    #[test]
    fn test_handoff_failure_shows_error() {
        let mut app = test_app();
        update(&mut app, Action::HandoffFailed("no browser".into()));
        let toast = app.toasts.live().unwrap();
        assert_eq!(toast.message, "no browser");
        assert_eq!(toast.severity, Severity::Error);
    }

    #[test]
    fn test_layout_shrink_clamps_and_rescans() {
        let mut app = laid_out_app();
        update(&mut app, Action::ScrollTo(2_000));
        update(&mut app, Action::Tick(1_000));
        let sections = app.sections.clone();
        update(
            &mut app,
            Action::Layout {
                sections,
                content_height: 1_000,
                viewport_height: 500,
                header_height: 0,
            },
        );
        assert_eq!(app.scroll.offset(), 500);
        assert_eq!(app.nav.active(), Some("home"));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
