//! Integration tests for coursehunt
//!
//! Tests are organized by component:
//! - auth_test: sign-in exchange and cookie capture
//! - catalog_test: search scraping and lesson listing
//! - session_test: session and config persistence
//! - cli_test: argument parsing and command handlers
//! - ui_test: rendering into a TestBackend
//! - e2e_test: state machine driven through the runtime (search -> lessons -> play)

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
