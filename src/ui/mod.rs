//! Terminal UI components
//!
//! Built with ratatui. Rendering reads `App` and never mutates it.

pub mod lessons;
pub mod search;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::{App, Focus, Screen};

/// Main render function - dispatches to the screen renderer
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Theme::text().bg(Theme::BACKGROUND)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    match app.screen {
        Screen::Search => search::render(frame, chunks[0], app),
        Screen::LessonList => lessons::render(frame, chunks[0], app),
    }
    render_status_bar(frame, chunks[1], app);
}

/// Bottom line: spinner while busy, key hints otherwise
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(pending) = &app.pending {
        Line::from(vec![
            Span::styled(format!(" {} ", app.spinner.frame()), Theme::loading()),
            Span::styled(pending.label(), Theme::text()),
        ])
    } else {
        let hints: &[(&str, &str)] = match (app.screen, app.focus) {
            (Screen::Search, Focus::SearchBox) => {
                &[("enter", "search"), ("tab", "results"), ("ctrl+c", "quit")]
            }
            (Screen::Search, Focus::CourseList) => &[
                ("↑↓", "move"),
                ("enter", "lessons"),
                ("tab", "search box"),
                ("q", "quit"),
            ],
            (Screen::LessonList, _) => &[
                ("↑↓", "move"),
                ("enter", "play"),
                ("esc", "back"),
                ("q", "quit"),
            ],
        };

        let mut spans = vec![Span::raw(" ")];
        for (key, desc) in hints {
            spans.push(Span::styled(*key, Theme::keybind()));
            spans.push(Span::styled(format!(" {}  ", desc), Theme::dimmed()));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
}
