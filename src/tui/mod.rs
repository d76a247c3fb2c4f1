//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the page,
//! and translates terminal events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Clock
//!
//! The core runs on virtual milliseconds. The loop maps wall time since
//! startup onto that clock and sends an `Action::Tick` every iteration.
//!
//! ## Redraw Strategy
//!
//! The loop sleeps until the core's next deadline (toast phase change,
//! trailing scroll report, animation frame) or 500ms, whichever is first,
//! and only redraws when an event, a background action or a deadline fired.

mod component;
mod components;
mod event;
pub mod markdown;
pub mod palette;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use log::{debug, info, warn};

use crate::core::action::{Action, Effect, update};
use crate::core::notify::Severity;
use crate::core::resume::ResumeFile;
use crate::core::schedule::Millis;
use crate::core::state::{Overlay, Portfolio};
use crate::handoff::{self, Opener};
use crate::tui::component::EventHandler;
use crate::tui::components::resume_modal::{self, ResumeEvent};
use crate::tui::components::{
    ContactEvent, ContactFormState, LinksEvent, LinksState, MenuEvent, MenuState, NavHit,
    PageViewState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::Click;

/// Longest the loop sleeps when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core page state)
#[derive(Default)]
pub struct TuiState {
    pub page: PageViewState,
    pub menu: MenuState,
    pub contact: ContactFormState,
    pub links: LinksState,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(mut app: Portfolio, opener: Arc<dyn Opener>) -> std::io::Result<()> {
    let mut tui = TuiState::default();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start = Instant::now();
    let clock = || start.elapsed().as_millis() as Millis;

    let width = terminal.size()?.width;
    update(&mut app, Action::Resized { width });

    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    while !should_quit {
        let now = clock();
        if app.next_deadline().is_some_and(|due| due <= now) {
            needs_redraw = true;
        }
        update(&mut app, Action::Tick(now));

        // Handle background task actions (handoff results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit |= dispatch(&mut app, &mut tui, action, &opener, &tx);
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;

            // A new measurement can move the offset; draw again with it
            if let Some(layout) = tui.page.take_layout_change() {
                debug!("Page layout changed");
                update(&mut app, layout);
                needs_redraw = true;
                continue;
            }
        }

        let timeout = app
            .next_deadline()
            .map_or(IDLE_POLL, |due| {
                Duration::from_millis(due.saturating_sub(clock())).min(IDLE_POLL)
            });
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let frame_area = terminal.get_frame().area();
            if let Some(action) = route_event(&event, &app, &mut tui, frame_area) {
                should_quit |= dispatch(&mut app, &mut tui, action, &opener, &tx);
            }
            if should_quit {
                break;
            }
        }
    }

    info!("Folio shutting down");
    ratatui::restore();
    Ok(())
}

/// Apply an action and carry out the effect. Returns true on quit.
fn dispatch(
    app: &mut Portfolio,
    tui: &mut TuiState,
    action: Action,
    opener: &Arc<dyn Opener>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    let submitted = matches!(action, Action::SubmitContact(_));
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Open(target) => {
            if submitted {
                tui.contact.reset();
            }
            spawn_open(opener, target, tx.clone());
            false
        }
        Effect::Save(file) => {
            spawn_save(app.settings.download_dir.clone(), file, tx.clone());
            false
        }
    }
}

/// Translate a terminal event into at most one action for the current mode.
fn route_event(
    event: &TuiEvent,
    app: &Portfolio,
    tui: &mut TuiState,
    frame_area: ratatui::layout::Rect,
) -> Option<Action> {
    // Global events
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize(width, _) => return Some(Action::Resized { width: *width }),
        _ => {}
    }

    match app.overlay {
        Overlay::Resume => {
            return resume_modal::handle_event(event).map(|e| match e {
                ResumeEvent::Download => Action::DownloadResume,
                ResumeEvent::Dismiss => Action::CloseOverlay,
            });
        }
        Overlay::Contact => {
            return tui.contact.handle_event(event).map(|e| match e {
                ContactEvent::Submit(form) => Action::SubmitContact(form),
                ContactEvent::Dismiss => Action::CloseOverlay,
            });
        }
        Overlay::Links => {
            return tui.links.handle_event(event).map(|e| match e {
                LinksEvent::Open(target) => Action::OpenLink(target),
                LinksEvent::Dismiss => Action::CloseOverlay,
            });
        }
        Overlay::None => {}
    }

    if let TuiEvent::MouseClick(col, row) = *event {
        return Some(match ui::hit_test(app, frame_area, col, row) {
            Click::MenuRow(i) => navigate_to_index(app, i)?,
            Click::Nav(NavHit::Entry(id)) => Action::NavigateTo(id),
            Click::Nav(NavHit::Brand) => Action::ScrollTo(0),
            Click::Nav(NavHit::Menu) => toggle_menu(app, tui),
            Click::Nav(NavHit::Theme) => Action::ToggleTheme,
            Click::Page => Action::PageClicked,
        });
    }

    // Menu keys go to the menu while it is open
    if app.menu.is_open()
        && matches!(
            event,
            TuiEvent::Escape
                | TuiEvent::InputChar('m')
                | TuiEvent::Up
                | TuiEvent::Down
                | TuiEvent::Tab
                | TuiEvent::BackTab
                | TuiEvent::Submit
        )
    {
        return match tui.menu.handle_event(event)? {
            MenuEvent::Navigate(i) => navigate_to_index(app, i),
            MenuEvent::Dismiss => Some(Action::ToggleMenu),
        };
    }

    page_action(event, app, tui)
}

fn page_action(event: &TuiEvent, app: &Portfolio, tui: &mut TuiState) -> Option<Action> {
    let page = app.scroll.viewport_height().max(1) as i64;
    let action = match event {
        TuiEvent::InputChar('q') => Action::Quit,
        TuiEvent::Up => Action::ScrollBy(-1),
        TuiEvent::Down => Action::ScrollBy(1),
        TuiEvent::WheelUp => Action::ScrollBy(-3),
        TuiEvent::WheelDown => Action::ScrollBy(3),
        TuiEvent::PageUp => Action::ScrollBy(-page),
        TuiEvent::PageDown => Action::ScrollBy(page),
        TuiEvent::Home => Action::ScrollTo(0),
        TuiEvent::End => Action::ScrollTo(app.scroll.max_offset()),
        TuiEvent::Tab => Action::NextSection,
        TuiEvent::BackTab => Action::PrevSection,
        TuiEvent::InputChar(c @ '1'..='9') => {
            let n = c.to_digit(10)? as usize;
            return navigate_to_index(app, n - 1);
        }
        TuiEvent::InputChar('t') => Action::ToggleTheme,
        TuiEvent::InputChar('m') => toggle_menu(app, tui),
        TuiEvent::InputChar('r') => Action::OpenResume,
        TuiEvent::InputChar('c') => Action::OpenContact,
        TuiEvent::InputChar('o') => open_links(app, tui),
        TuiEvent::Escape => Action::DismissToast,
        _ => return None,
    };
    Some(action)
}

fn navigate_to_index(app: &Portfolio, index: usize) -> Option<Action> {
    let entry = app.nav.entries().get(index)?;
    Some(Action::NavigateTo(entry.id.clone()))
}

fn toggle_menu(app: &Portfolio, tui: &mut TuiState) -> Action {
    if !app.menu.is_open() {
        tui.menu
            .open(app.nav.entries().len(), app.nav.active_index());
    }
    Action::ToggleMenu
}

fn open_links(app: &Portfolio, tui: &mut TuiState) -> Action {
    let links = app
        .nav
        .active()
        .and_then(|id| app.document.section(id))
        .map(|s| s.links())
        .unwrap_or_default();
    if links.is_empty() {
        return Action::Notify {
            message: "No links in this section".to_string(),
            severity: Severity::Info,
        };
    }
    tui.links.show(links);
    Action::OpenLinks
}

fn spawn_open(opener: &Arc<dyn Opener>, target: String, tx: mpsc::Sender<Action>) {
    info!("Handing {} to {}", target, opener.name());
    let opener = Arc::clone(opener);
    tokio::spawn(async move {
        let action = match opener.open(&target).await {
            Ok(()) => Action::Opened(target),
            Err(e) => Action::HandoffFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send open result: receiver dropped");
        }
    });
}

fn spawn_save(dir: std::path::PathBuf, file: ResumeFile, tx: mpsc::Sender<Action>) {
    info!("Saving {} to {}", file.file_name, dir.display());
    tokio::spawn(async move {
        let action = match handoff::save_download(&dir, &file.file_name, &file.contents).await {
            Ok(path) => Action::Saved(path),
            Err(e) => Action::HandoffFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send save result: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingOpener, laid_out_app, test_app};
    use ratatui::layout::Rect;

    const AREA: Rect = Rect::new(0, 0, 120, 30);

    fn route(app: &Portfolio, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
        route_event(&event, app, tui, AREA)
    }

    #[test]
    fn test_page_keys() {
        let app = laid_out_app();
        let mut tui = TuiState::default();
        assert_eq!(route(&app, &mut tui, TuiEvent::Down), Some(Action::ScrollBy(1)));
        assert_eq!(route(&app, &mut tui, TuiEvent::WheelUp), Some(Action::ScrollBy(-3)));
        assert_eq!(route(&app, &mut tui, TuiEvent::PageDown), Some(Action::ScrollBy(600)));
        assert_eq!(route(&app, &mut tui, TuiEvent::Tab), Some(Action::NextSection));
        assert_eq!(
            route(&app, &mut tui, TuiEvent::InputChar('2')),
            Some(Action::NavigateTo("about".into()))
        );
        assert_eq!(route(&app, &mut tui, TuiEvent::InputChar('9')), None);
        assert_eq!(route(&app, &mut tui, TuiEvent::ForceQuit), Some(Action::Quit));
    }

    #[test]
    fn test_overlay_captures_keys() {
        let mut app = test_app();
        update(&mut app, Action::OpenContact);
        let mut tui = TuiState::default();
        // 'q' is text inside the form, not quit
        assert_eq!(route(&app, &mut tui, TuiEvent::InputChar('q')), None);
        assert_eq!(tui.contact.form.name, "q");
        assert_eq!(route(&app, &mut tui, TuiEvent::Escape), Some(Action::CloseOverlay));
    }

    #[test]
    fn test_menu_routing() {
        let mut app = test_app();
        app.viewport_width = 60;
        let mut tui = TuiState::default();
        let open = route(&app, &mut tui, TuiEvent::InputChar('m'));
        assert_eq!(open, Some(Action::ToggleMenu));
        update(&mut app, Action::ToggleMenu);

        route(&app, &mut tui, TuiEvent::Down);
        assert_eq!(
            route(&app, &mut tui, TuiEvent::Submit),
            Some(Action::NavigateTo("about".into()))
        );
        assert_eq!(route(&app, &mut tui, TuiEvent::Escape), Some(Action::ToggleMenu));
    }

    #[test]
    fn test_links_key_without_links_notifies() {
        let app = test_app();
        let mut tui = TuiState::default();
        assert!(matches!(
            route(&app, &mut tui, TuiEvent::InputChar('o')),
            Some(Action::Notify { severity: Severity::Info, .. })
        ));
    }

    #[test]
    fn test_links_key_lists_active_section() {
        let mut app = test_app();
        app.nav.set_active("projects").unwrap();
        let mut tui = TuiState::default();
        assert_eq!(route(&app, &mut tui, TuiEvent::InputChar('o')), Some(Action::OpenLinks));
        assert!(!tui.links.links.is_empty());
    }

    #[test]
    fn test_click_theme_icon() {
        let app = test_app();
        let mut tui = TuiState::default();
        assert_eq!(
            route(&app, &mut tui, TuiEvent::MouseClick(117, 0)),
            Some(Action::ToggleTheme)
        );
        assert_eq!(
            route(&app, &mut tui, TuiEvent::MouseClick(10, 10)),
            Some(Action::PageClicked)
        );
    }

    #[tokio::test]
    async fn test_submit_hands_off_and_resets_form() {
        let mut app = test_app();
        let mut tui = TuiState::default();
        let opener = Arc::new(RecordingOpener::default());
        let dyn_opener: Arc<dyn Opener> = opener.clone();
        let (tx, rx) = mpsc::channel();

        update(&mut app, Action::OpenContact);
        tui.contact.form.name = "Sam".into();
        tui.contact.form.email = "sam@example.com".into();
        tui.contact.form.message = "Hello".into();
        let form = tui.contact.form.clone();

        assert!(!dispatch(&mut app, &mut tui, Action::SubmitContact(form), &dyn_opener, &tx));
        assert_eq!(tui.contact.form.name, "");

        // Let the spawned handoff run
        let mut received = None;
        for _ in 0..50 {
            tokio::task::yield_now().await;
            if let Ok(action) = rx.try_recv() {
                received = Some(action);
                break;
            }
        }
        let Some(Action::Opened(target)) = received else {
            panic!("expected Opened, got {received:?}");
        };
        assert!(target.starts_with("mailto:alex@example.com"));
        assert_eq!(opener.opened.lock().unwrap().len(), 1);
    }
}
