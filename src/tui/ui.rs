use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::core::state::{Overlay, Portfolio};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ContactFormView, LinksView, Menu, NAV_BAR_HEIGHT, NavBar, NavHit, PageView, ResumeModal,
    Toast,
};
use crate::tui::palette::Palette;

/// Screen split: nav bar, page, help line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub nav: Rect,
    pub page: Rect,
    pub help: Rect,
}

pub fn areas(frame_area: Rect) -> Areas {
    use Constraint::{Length, Min};
    let [nav, page, help] =
        Layout::vertical([Length(NAV_BAR_HEIGHT), Min(0), Length(1)]).areas(frame_area);
    Areas { nav, page, help }
}

/// What a left click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Click {
    Nav(NavHit),
    MenuRow(usize),
    Page,
}

fn nav_bar(app: &Portfolio, palette: Palette) -> NavBar<'_> {
    NavBar {
        brand: &app.document.title,
        entries: app.nav.entries(),
        active: app.nav.active(),
        compact: app.is_compact(),
        menu_open: app.menu.is_open(),
        scrolled: app.navbar_scrolled,
        palette,
    }
}

pub fn hit_test(app: &Portfolio, frame_area: Rect, col: u16, row: u16) -> Click {
    let areas = areas(frame_area);
    if app.menu.is_open()
        && let Some(i) = Menu::hit_test(app.nav.entries(), areas.page, col, row)
    {
        return Click::MenuRow(i);
    }
    let palette = Palette::for_theme(app.theme.current());
    nav_bar(app, palette)
        .hit_test(col, row, areas.nav)
        .map_or(Click::Page, Click::Nav)
}

fn help_text(app: &Portfolio) -> &'static str {
    match app.overlay {
        Overlay::None if app.menu.is_open() => " ↑↓ Select  Enter Go  Esc Close ",
        Overlay::None => {
            " ↑↓ Scroll  Tab Section  1-9 Jump  t Theme  m Menu  r Resume  c Contact  o Links  q Quit "
        }
        Overlay::Resume => " d Download  Esc Close ",
        Overlay::Contact => " Tab Next field  Enter Send  Esc Close ",
        Overlay::Links => " Enter Open  Esc Back ",
    }
}

pub fn draw_ui(frame: &mut Frame, app: &Portfolio, tui: &mut TuiState) {
    let palette = Palette::for_theme(app.theme.current());
    frame.render_widget(Block::default().style(palette.base()), frame.area());
    let areas = areas(frame.area());

    nav_bar(app, palette).render(frame, areas.nav);

    PageView {
        state: &mut tui.page,
        document: &app.document,
        reveal: &app.reveal,
        offset: app.scroll.offset(),
        active: app.nav.active(),
        palette,
    }
    .render(frame, areas.page);

    if app.menu.is_open() {
        Menu {
            state: &mut tui.menu,
            entries: app.nav.entries(),
            active: app.nav.active(),
            palette,
        }
        .render(frame, areas.page);
    }

    match app.overlay {
        Overlay::None => {}
        Overlay::Resume => ResumeModal {
            document: &app.document,
            download_dir: &app.settings.download_dir,
            palette,
        }
        .render(frame, areas.page),
        Overlay::Contact => ContactFormView {
            state: &tui.contact,
            recipient: app.settings.contact_email.as_deref().unwrap_or_default(),
            palette,
        }
        .render(frame, areas.page),
        Overlay::Links => {
            let title = app
                .nav
                .active()
                .and_then(|id| app.document.section(id))
                .map_or("this section", |s| s.title.as_str());
            LinksView {
                state: &mut tui.links,
                section_title: title,
                palette,
            }
            .render(frame, areas.page)
        }
    }

    if let Some(notification) = app.toasts.live() {
        Toast {
            notification,
            palette,
        }
        .render(frame, areas.page);
    }

    frame.render_widget(
        Paragraph::new(Line::from(help_text(app))).style(palette.dim().bg(palette.bg)),
        areas.help,
    );
}
