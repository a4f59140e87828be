//! Color palette and style helpers for the TUI
//!
//! Mint accent on a dark background, purple header badges.

use ratatui::style::{Color, Modifier, Style};

/// Color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #0d0d12
    pub const BACKGROUND: Color = Color::Rgb(0x0d, 0x0d, 0x12);

    /// Accent: #78e2a0 (mint)
    pub const ACCENT: Color = Color::Rgb(0x78, 0xe2, 0xa0);

    /// Header badge background: #5840a7 (purple)
    pub const HEADER: Color = Color::Rgb(0x58, 0x40, 0xa7);

    /// Foreground: #ffffff
    pub const FOREGROUND: Color = Color::Rgb(0xff, 0xff, 0xff);

    /// Text: #e0e0e0
    pub const TEXT: Color = Color::Rgb(0xe0, 0xe0, 0xe0);

    /// Dim: #8a8a9a
    pub const DIM: Color = Color::Rgb(0x8a, 0x8a, 0x9a);

    /// Border when unfocused: #3a3a4a
    pub const BORDER: Color = Color::Rgb(0x3a, 0x3a, 0x4a);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT)
    }

    /// Purple header badge
    pub fn header() -> Style {
        Style::default()
            .fg(Self::FOREGROUND)
            .bg(Self::HEADER)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected list item
    pub fn selected() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    /// Dimmed/muted text
    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Normal/unfocused border
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Focused border
    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Field label in the course detail panel
    pub fn label() -> Style {
        Style::default().fg(Self::DIM).add_modifier(Modifier::BOLD)
    }

    /// Keybinding hint style
    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().fg(Self::DIM).bg(Self::BACKGROUND)
    }

    /// Busy spinner
    pub fn loading() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }
}
