//! # Core Page Logic
//!
//! This module contains Folio's page behavior.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Portfolio (state)    │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Time is │
//!                    │  passed in as Millis.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  handoff   │
//!     │  Adapter   │                          │ (open URL, │
//!     │ (ratatui)  │                          │ save file) │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `Portfolio`, all page state in one place
//! - [`action`]: `Action`, `Effect` and `update()`
//! - [`nav`]: which navigation entry is active
//! - [`notify`]: the single live toast and its phase timers
//! - [`theme`] / [`prefs`]: light/dark flag and where it is stored
//! - [`schedule`] / [`throttle`]: virtual-time timers
//! - [`reveal`]: stat counters and skill bars played once on first view
//! - [`startup`]: ordered initialization steps

pub mod action;
pub mod config;
pub mod contact;
pub mod content;
pub mod nav;
pub mod notify;
pub mod prefs;
pub mod resume;
pub mod reveal;
pub mod schedule;
pub mod scroll;
pub mod startup;
pub mod state;
pub mod theme;
pub mod throttle;
