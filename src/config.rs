//! Configuration management for coursehunt
//!
//! Config is stored at ~/.config/coursehunt/config.toml next to the session
//! file. Every field is optional; a missing file means defaults.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::session::Session;

/// Catalog site used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "https://coursehunter.net";

/// Player binary looked up on `PATH` by default
pub const DEFAULT_PLAYER: &str = "mpv";

/// Environment variable overriding the catalog base URL
pub const BASE_URL_ENV: &str = "COURSEHUNT_BASE_URL";

const CONFIG_FILE: &str = "config.toml";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog base URL
    pub base_url: Option<String>,
    /// Player binary name or path
    pub player: Option<String>,
    /// Extra arguments passed to the player before the media URL
    pub player_args: Option<Vec<String>>,
}

impl Config {
    /// Default config directory (~/.config/coursehunt)
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("coursehunt"))
    }

    /// Config file inside `dir`
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// Load config from `dir`, or defaults if the file does not exist.
    /// A file that exists but does not parse is an error.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = Self::path_in(dir);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };

        toml::from_str(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Save config into `dir`
    pub fn save_to(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let toml = toml::to_string_pretty(self)?;
        std::fs::write(Self::path_in(dir), toml)?;
        Ok(())
    }

    /// Base URL with fallback chain:
    /// 1. Environment variable COURSEHUNT_BASE_URL
    /// 2. `base_url` from the config file
    /// 3. DEFAULT_BASE_URL
    pub fn base_url(&self) -> String {
        self.base_url_with(std::env::var(BASE_URL_ENV).ok())
    }

    /// Base URL given the value of the override variable, if any
    fn base_url_with(&self, env_url: Option<String>) -> String {
        let url = env_url
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url.trim_end_matches('/').to_string()
    }

    /// Player binary name
    pub fn player(&self) -> &str {
        self.player.as_deref().unwrap_or(DEFAULT_PLAYER)
    }

    /// Extra player arguments
    pub fn player_args(&self) -> &[String] {
        self.player_args.as_deref().unwrap_or(&[])
    }
}

// =============================================================================
// Runtime context
// =============================================================================

/// Everything an authenticated run needs, built once at startup and handed to
/// the collaborators instead of living in globals.
#[derive(Debug, Clone)]
pub struct Context {
    pub config_dir: PathBuf,
    pub config: Config,
    pub base_url: String,
    pub session: Session,
}

impl Context {
    /// Resolve the config directory from an optional override
    pub fn resolve_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
        match override_dir {
            Some(dir) => Ok(dir.to_path_buf()),
            None => Config::default_dir().context("Could not determine config directory"),
        }
    }

    /// Load config and session from `config_dir`
    pub fn load(config_dir: PathBuf) -> Result<Self> {
        let config = Config::load_from(&config_dir)?;
        let session = Session::load_from(&Session::path_in(&config_dir))?;
        let base_url = config.base_url();
        Ok(Self {
            config_dir,
            config,
            base_url,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.base_url.is_none());
        assert_eq!(config.player(), "mpv");
        assert!(config.player_args().is_empty());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(Config::path_in(dir.path()), "player = [").unwrap();
        assert!(Config::load_from(dir.path()).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            base_url: Some("http://localhost:8080/".into()),
            player: Some("vlc".into()),
            player_args: Some(vec!["--fullscreen".into()]),
        };
        config.save_to(dir.path()).unwrap();

        let loaded = Config::load_from(dir.path()).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.player(), "vlc");
        assert_eq!(loaded.player_args(), ["--fullscreen".to_string()]);
    }

    #[test]
    fn test_base_url_fallback_chain() {
        let config = Config {
            base_url: Some("http://localhost:8080/".into()),
            ..Config::default()
        };
        assert_eq!(config.base_url_with(None), "http://localhost:8080");
        assert_eq!(config.base_url_with(Some("  ".into())), "http://localhost:8080");
        assert_eq!(
            config.base_url_with(Some("http://mirror.test/".into())),
            "http://mirror.test"
        );
        assert_eq!(Config::default().base_url_with(None), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_context_requires_session() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Context::load(dir.path().to_path_buf()).is_err());
    }
}
