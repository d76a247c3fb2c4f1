//! # Theme
//!
//! Light/dark flag. Read once at startup, written on every toggle. The
//! applied value and the stored value match after `load` and `toggle`
//! unless the store itself fails, which is logged.

use std::fmt;
use std::str::FromStr;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::prefs::PreferenceStore;

/// Key under which the theme is persisted.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    applied: Theme,
}

impl ThemeState {
    pub fn new(applied: Theme) -> Self {
        Self { applied }
    }

    /// Read the stored theme, falling back to `default` when nothing valid
    /// is stored.
    pub fn load(store: &dyn PreferenceStore, default: Theme) -> Self {
        let applied = match store.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {}", e);
                default
            }),
            Ok(None) => default,
            Err(e) => {
                warn!("Could not read theme preference: {}", e);
                default
            }
        };
        info!("Theme initialized, current theme: {}", applied);
        Self { applied }
    }

    pub fn current(&self) -> Theme {
        self.applied
    }

    /// Flip and persist. Returns the new theme.
    pub fn toggle(&mut self, store: &mut dyn PreferenceStore) -> Theme {
        let next = self.applied.toggled();
        info!("Switching theme from {} to {}", self.applied, next);
        self.applied = next;
        if let Err(e) = store.set(THEME_KEY, next.as_str()) {
            warn!("Failed to persist theme: {}", e);
        }
        next
    }
}
