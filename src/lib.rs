//! coursehunt - terminal browser for an online course catalog
//!
//! Search courses, open one to list its lessons and play a lesson in mpv.
//!
//! # Modules
//!
//! - `models` - Course and lesson records
//! - `session` - Persisted login and token expiry
//! - `config` - Config file and runtime context
//! - `api` - Sign-in and catalog clients, HTML scraping
//! - `player` - External media player launcher
//! - `app` - Interactive state machine
//! - `runtime` - Event queue and effect execution
//! - `ui` - TUI rendering
//! - `cli` / `commands` - Command line surface

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod player;
pub mod runtime;
pub mod session;
pub mod ui;

// Re-export commonly used types
pub use api::{AuthClient, AuthError, CatalogClient, FetchError};
pub use app::{App, AppEvent, Effect, FetchPayload, Focus, PendingFetch, Screen};
pub use config::{Config, Context};
pub use models::{Course, Lesson};
pub use player::{LocalPlayer, PlayerError};
pub use runtime::Runtime;
pub use session::{Session, SessionError};
