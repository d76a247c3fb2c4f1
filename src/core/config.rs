//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.folio/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::nav::TrackerConfig;
use crate::core::schedule::Millis;
use crate::core::theme::Theme;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub content_file: Option<String>,
    pub default_theme: Option<Theme>,
    pub download_dir: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ContactConfig {
    pub email: Option<String>,
    pub profile_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LayoutConfig {
    pub header_offset: Option<u32>,
    pub scroll_probe: Option<u32>,
    pub boundary_tolerance: Option<u32>,
    pub scrolled_threshold: Option<u32>,
    pub mobile_breakpoint: Option<u16>,
    pub smooth_scroll_ms: Option<Millis>,
    pub scroll_throttle_ms: Option<Millis>,
}

// ============================================================================
// Defaults (terminal rows/columns)
// ============================================================================

// A navigated section sits `header_offset` rows below the view top, so the
// probe lands `scroll_probe - header_offset` rows into it. That has to stay
// inside the shortest section the page view draws (heading plus gap, 3 rows)
// once the tolerance is taken off its bottom.
pub const DEFAULT_HEADER_OFFSET: u32 = 1;
pub const DEFAULT_SCROLL_PROBE: u32 = 2;
pub const DEFAULT_BOUNDARY_TOLERANCE: u32 = 1;
pub const DEFAULT_SCROLLED_THRESHOLD: u32 = 2;
pub const DEFAULT_MOBILE_BREAKPOINT: u16 = 80;
pub const DEFAULT_SMOOTH_SCROLL_MS: Millis = 300;
pub const DEFAULT_SCROLL_THROTTLE_MS: Millis = 100;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// None means the built-in sample document.
    pub content_file: Option<PathBuf>,
    pub default_theme: Theme,
    pub download_dir: PathBuf,
    pub log_level: String,
    pub contact_email: Option<String>,
    pub profile_url: Option<String>,
    pub tracker: TrackerConfig,
    pub scrolled_threshold: u32,
    pub mobile_breakpoint: u16,
    pub smooth_scroll_ms: Millis,
    pub scroll_throttle_ms: Millis,
}

/// Values given on the command line. `None` means not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub content_file: Option<PathBuf>,
    pub theme: Option<Theme>,
    pub log_level: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.folio`.
pub fn folio_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".folio"))
}

/// Returns the path to `~/.folio/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    folio_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.folio/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FolioConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FolioConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FolioConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<FolioConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(FolioConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: FolioConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r#"# Folio Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# content_file = "portfolio.md"     # Relative to ~/.folio/ or absolute. Or FOLIO_CONTENT
# default_theme = "light"           # "light" or "dark". Or FOLIO_THEME
# download_dir = "~/Downloads"      # Where the resume is saved. Or FOLIO_DOWNLOAD_DIR
# log_level = "info"                # "error", "warn", "info", "debug", "trace"

# [contact]
# email = "me@example.com"          # Or FOLIO_CONTACT_EMAIL
# profile_url = "https://github.com/me"

# [layout]                          # Rows and columns
# header_offset = 1
# scroll_probe = 2
# boundary_tolerance = 1
# scrolled_threshold = 2
# mobile_breakpoint = 80
# smooth_scroll_ms = 300            # 0 disables the animation
# scroll_throttle_ms = 100
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FolioConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable env lookup.
pub fn resolve_with(
    config: &FolioConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Content: CLI → env → config → built-in sample
    let content_file = cli
        .content_file
        .clone()
        .or_else(|| env("FOLIO_CONTENT").map(PathBuf::from))
        .or_else(|| config.general.content_file.as_deref().map(expand_path));

    // Theme: CLI → env → config → light
    let default_theme = cli
        .theme
        .or_else(|| {
            env("FOLIO_THEME").and_then(|v| match v.parse() {
                Ok(theme) => Some(theme),
                Err(e) => {
                    warn!("Ignoring FOLIO_THEME: {}", e);
                    None
                }
            })
        })
        .or(config.general.default_theme)
        .unwrap_or_default();

    let download_dir = env("FOLIO_DOWNLOAD_DIR")
        .map(PathBuf::from)
        .or_else(|| config.general.download_dir.as_deref().map(expand_path))
        .or_else(dirs::download_dir)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env("FOLIO_LOG_LEVEL"))
        .or_else(|| config.general.log_level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    let contact_email = env("FOLIO_CONTACT_EMAIL")
        .or_else(|| config.contact.email.clone())
        .filter(|e| !e.trim().is_empty());

    let layout = &config.layout;
    ResolvedConfig {
        content_file,
        default_theme,
        download_dir,
        log_level,
        contact_email,
        profile_url: config.contact.profile_url.clone(),
        tracker: TrackerConfig {
            header_margin: layout.header_offset.unwrap_or(DEFAULT_HEADER_OFFSET),
            scroll_probe: layout.scroll_probe.unwrap_or(DEFAULT_SCROLL_PROBE),
            boundary_tolerance: layout
                .boundary_tolerance
                .unwrap_or(DEFAULT_BOUNDARY_TOLERANCE),
        },
        scrolled_threshold: layout
            .scrolled_threshold
            .unwrap_or(DEFAULT_SCROLLED_THRESHOLD),
        mobile_breakpoint: layout.mobile_breakpoint.unwrap_or(DEFAULT_MOBILE_BREAKPOINT),
        smooth_scroll_ms: layout.smooth_scroll_ms.unwrap_or(DEFAULT_SMOOTH_SCROLL_MS),
        scroll_throttle_ms: layout
            .scroll_throttle_ms
            .unwrap_or(DEFAULT_SCROLL_THROTTLE_MS),
    }
}

/// `~/x` expands to the home directory; relative paths resolve against `~/.folio/`.
fn expand_path(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        return path;
    }
    match folio_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}
