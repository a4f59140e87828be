//! CLI - Command Line Interface for coursehunt
//!
//! Without a subcommand the interactive browser starts. The subcommands cover
//! login plus scriptable search/lesson listing.
//!
//! # Examples
//!
//! ```bash
//! coursehunt login -u me@example.com -p hunter2
//! coursehunt                       # interactive mode
//! coursehunt search golang --json
//! coursehunt lessons https://coursehunter.net/course/go-complete
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error (config, I/O)
    Error = 1,
    /// Invalid arguments (matches clap usage errors)
    InvalidArgs = 2,
    /// Network or parse error
    NetworkError = 3,
    /// Session missing, malformed or expired
    AuthError = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// coursehunt - browse the course catalog and play lessons in mpv
///
/// Run without arguments to launch the interactive browser.
#[derive(Parser, Debug)]
#[command(
    name = "coursehunt",
    version,
    about = "Browse the course catalog and play lessons in mpv",
    long_about = "Search the course catalog, list a course's lessons and \
                  play them in mpv.\n\n\
                  Run `coursehunt login` once, then run without arguments \
                  to launch the interactive browser.",
    after_help = "EXAMPLES:\n\
                  coursehunt login -u me@example.com -p secret   Sign in\n\
                  coursehunt                                     Interactive browser\n\
                  coursehunt search golang --json                Scriptable search"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Debug-level logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Directory holding config.toml and session.toml
    #[arg(long, short = 'c', global = true)]
    pub config_dir: Option<PathBuf>,

    /// Subcommand to run (omit for interactive mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session
    Login(LoginCmd),

    /// Forget the stored session
    Logout,

    /// Search courses by title
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// List the lessons of a course
    #[command(visible_alias = "l")]
    Lessons(LessonsCmd),
}

/// Sign in with email and password
#[derive(Args, Debug)]
pub struct LoginCmd {
    /// Account email
    #[arg(long, short = 'u')]
    pub email: Option<String>,

    /// Account password
    #[arg(long, short = 'p')]
    pub password: Option<String>,
}

impl LoginCmd {
    /// Both credentials, if given and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let email = self.email.as_deref().filter(|s| !s.is_empty())?;
        let password = self.password.as_deref().filter(|s| !s.is_empty())?;
        Some((email, password))
    }
}

/// Search the catalog
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Course title or keywords
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

/// List lessons of a course page
#[derive(Args, Debug)]
pub struct LessonsCmd {
    /// Course page URL (absolute or site-relative)
    #[arg(required = true)]
    pub url: String,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON, or as lines from `human` otherwise
    pub fn print<T: Serialize>(
        &self,
        data: T,
        human: impl FnOnce(&T) -> Vec<String>,
    ) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&JsonOutput::success(data))?);
        } else {
            for line in human(&data) {
                println!("{}", line);
            }
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else {
            // Shown even with --quiet
            eprintln!("{}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
