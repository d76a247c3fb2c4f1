//! # TUI Components
//!
//! ## Component Architecture
//!
//! Components follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built each frame from borrowed core state plus the palette:
//! - `NavBar`: header with section links, menu button and theme switch
//! - `Toast`: the live notification
//! - `ResumeModal`: export preview
//!
//! ### Stateful Components (Event-Driven)
//!
//! A persistent `*State` lives in `TuiState` and implements `EventHandler`;
//! a transient wrapper borrows it to render:
//! - `PageViewState` / `PageView`: scrolling page and layout measurement
//! - `MenuState` / `Menu`: collapsed navigation on narrow terminals
//! - `ContactFormState` / `ContactFormView`: message composer
//! - `LinksState` / `LinksView`: links of the active section
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── nav_bar.rs       (Header bar)
//! ├── page_view.rs     (Scrollable sections)
//! ├── menu.rs          (Drop-down navigation)
//! ├── toast.rs         (Notification)
//! ├── resume_modal.rs  (Resume overlay)
//! ├── contact_form.rs  (Contact overlay)
//! └── links.rs         (Links overlay)
//! ```

use ratatui::layout::{Constraint, Layout, Rect};

pub mod contact_form;
pub mod links;
pub mod menu;
pub mod nav_bar;
pub mod page_view;
pub mod resume_modal;
pub mod toast;

pub use contact_form::{ContactEvent, ContactFormState, ContactFormView};
pub use links::{LinksEvent, LinksState, LinksView};
pub use menu::{Menu, MenuEvent, MenuState};
pub use nav_bar::{NAV_BAR_HEIGHT, NavBar, NavHit};
pub use page_view::{PageView, PageViewState};
pub use resume_modal::ResumeModal;
pub use toast::Toast;

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
