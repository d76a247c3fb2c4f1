//! # Startup Plan
//!
//! Page initialization as an explicit, ordered list of steps. Each step is a
//! plain function over `Portfolio`, so it can be run and tested on its own.
//! A failing step is logged and skipped; the remaining steps still run.

use std::fmt;

use log::{info, warn};

use crate::core::nav::NavHighlightTracker;
use crate::core::reveal::Reveal;
use crate::core::state::Portfolio;
use crate::core::theme::ThemeState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    /// Something the step needs is absent from the content or config.
    Missing(&'static str),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Missing(what) => write!(f, "missing {what}"),
        }
    }
}

impl std::error::Error for StartupError {}

pub type StepFn = fn(&mut Portfolio) -> Result<(), StartupError>;

#[derive(Clone, Copy)]
pub struct StartupStep {
    pub name: &'static str,
    pub run: StepFn,
}

/// Theme first so anything drawn during later steps uses it.
pub fn default_plan() -> Vec<StartupStep> {
    vec![
        StartupStep { name: "theme", run: init_theme },
        StartupStep { name: "navigation", run: init_navigation },
        StartupStep { name: "reveal", run: init_reveal },
        StartupStep { name: "contact", run: init_contact },
    ]
}

/// Run every step in order. Returns the steps that failed.
pub fn run(plan: &[StartupStep], app: &mut Portfolio) -> Vec<(&'static str, StartupError)> {
    let mut failed = Vec::new();
    for step in plan {
        match (step.run)(app) {
            Ok(()) => info!("Startup step '{}' done", step.name),
            Err(e) => {
                warn!("Startup step '{}' skipped: {}", step.name, e);
                failed.push((step.name, e));
            }
        }
    }
    failed
}

pub fn init_theme(app: &mut Portfolio) -> Result<(), StartupError> {
    app.theme = ThemeState::load(app.prefs.as_ref(), app.settings.default_theme);
    Ok(())
}

/// Build navigation from the document and mark the first entry active.
pub fn init_navigation(app: &mut Portfolio) -> Result<(), StartupError> {
    let entries = app.document.nav_entries();
    info!(
        "Navigation initialized with {} links and {} sections",
        entries.len(),
        app.document.sections.len()
    );
    app.nav = NavHighlightTracker::new(entries, app.settings.tracker);
    let first = app
        .nav
        .entries()
        .first()
        .map(|e| e.id.clone())
        .ok_or(StartupError::Missing("navigation entries"))?;
    app.nav
        .set_active(&first)
        .map_err(|_| StartupError::Missing("navigation entries"))
}

/// Pick up stat counters and skill bars. Neither has played yet.
pub fn init_reveal(app: &mut Portfolio) -> Result<(), StartupError> {
    app.reveal = Reveal::from_document(&app.document);
    app.counters_animated = false;
    app.bars_animated = false;
    if app.reveal.is_empty() {
        return Err(StartupError::Missing("stats or skill levels"));
    }
    Ok(())
}

pub fn init_contact(app: &mut Portfolio) -> Result<(), StartupError> {
    let has_recipient = app
        .settings
        .contact_email
        .as_deref()
        .is_some_and(|e| !e.trim().is_empty());
    app.contact_enabled = has_recipient;
    if has_recipient {
        Ok(())
    } else {
        Err(StartupError::Missing("contact email"))
    }
}
