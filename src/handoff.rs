//! # External Handoffs
//!
//! The two places the page leaves the process: opening a URL (web links and
//! `mailto:` drafts) and writing the generated resume to disk. Both run on
//! the tokio runtime; the TUI turns their results back into `Action`s.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info};
use tokio::process::Command;

#[derive(Debug)]
pub enum HandoffError {
    /// The opener could not be started or exited unsuccessfully.
    Launch(String),
    /// Writing the download failed.
    Io(std::io::Error),
}

impl fmt::Display for HandoffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandoffError::Launch(msg) => write!(f, "could not open link: {msg}"),
            HandoffError::Io(e) => write!(f, "could not save file: {e}"),
        }
    }
}

impl std::error::Error for HandoffError {}

impl From<std::io::Error> for HandoffError {
    fn from(e: std::io::Error) -> Self {
        HandoffError::Io(e)
    }
}

#[async_trait]
pub trait Opener: Send + Sync {
    /// Returns the name of the opener.
    fn name(&self) -> &str;

    /// Hands `target` (a URL or `mailto:` link) to something that can show it.
    async fn open(&self, target: &str) -> Result<(), HandoffError>;
}

/// Delegates to the platform's default handler.
pub struct SystemOpener;

impl SystemOpener {
    fn command(target: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("open");
            cmd.arg(target);
            cmd
        } else if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            // The empty string is the window title `start` expects first
            cmd.args(["/C", "start", "", target]);
            cmd
        } else {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(target);
            cmd
        }
    }
}

#[async_trait]
impl Opener for SystemOpener {
    fn name(&self) -> &str {
        "system"
    }

    async fn open(&self, target: &str) -> Result<(), HandoffError> {
        debug!("Opening {}", target);
        let status = Self::command(target)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await
            .map_err(|e| HandoffError::Launch(e.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(HandoffError::Launch(format!("opener exited with {status}")))
        }
    }
}

/// Write `contents` to `dir/name`, creating `dir` if needed. Returns the path.
pub async fn save_download(dir: &Path, name: &str, contents: &str) -> Result<PathBuf, HandoffError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(name);
    tokio::fs::write(&path, contents).await?;
    info!("Saved {} ({} bytes)", path.display(), contents.len());
    Ok(path)
}
