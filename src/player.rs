//! Local player - hands lesson media to mpv (or a configured player)

use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::{info, warn};

/// Errors from local player operations
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Player '{0}' not found. Install it first.")]
    NotFound(String),
    #[error("Failed to start player: {0}")]
    StartFailed(#[from] std::io::Error),
}

/// Local media player launcher
#[derive(Debug, Clone)]
pub struct LocalPlayer {
    command: String,
    args: Vec<String>,
}

impl LocalPlayer {
    /// Create a launcher for `command` (a binary name or a path)
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Create an mpv launcher
    pub fn mpv() -> Self {
        Self::new("mpv", Vec::new())
    }

    /// Get the player command
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Resolve the player binary, searching `PATH` for bare names
    pub fn locate(&self) -> Option<PathBuf> {
        let path = Path::new(&self.command);
        if path.components().count() > 1 {
            return path.is_file().then(|| path.to_path_buf());
        }

        let search = std::env::var_os("PATH")?;
        std::env::split_paths(&search)
            .map(|dir| dir.join(&self.command))
            .find(|candidate| candidate.is_file())
    }

    /// Start the player on `media_url` without waiting for it
    pub fn play(&self, media_url: &str) -> Result<Child, PlayerError> {
        let binary = self
            .locate()
            .ok_or_else(|| PlayerError::NotFound(self.command.clone()))?;

        let mut cmd = Command::new(binary);
        cmd.args(&self.args).arg(media_url);

        // The TUI owns the terminal
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());

        let child = cmd.spawn()?;
        info!(player = %self.command, url = media_url, "player started");
        Ok(child)
    }

    /// Start the player and swallow any failure.
    ///
    /// A missing player is only logged, the interactive session keeps going.
    pub fn play_detached(&self, media_url: &str) {
        if let Err(e) = self.play(media_url) {
            warn!(error = %e, "could not start player");
        }
    }
}

impl Default for LocalPlayer {
    fn default() -> Self {
        Self::mpv()
    }
}
