//! Lesson list screen

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::Theme;
use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let title = app
        .active_course
        .as_ref()
        .map(|c| c.title.as_str())
        .unwrap_or("Lessons");

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(format!(" {} ", title), Theme::header()))
        .title_bottom(Span::styled(
            format!(" {} lessons ", app.lessons.len()),
            Theme::dimmed(),
        ));

    if app.lessons.is_empty() {
        let empty = Paragraph::new("This course has no lessons")
            .style(Theme::dimmed())
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .lessons
        .iter()
        .enumerate()
        .map(|(i, lesson)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>3}. ", i + 1), Theme::dimmed()),
                Span::styled(lesson.title.as_str(), Theme::text()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Theme::selected())
        .highlight_symbol("> ");

    // The widget scrolls the selection into view on its own
    let mut state = ListState::default().with_selected(app.lesson_list.selected);
    frame.render_stateful_widget(list, area, &mut state);
}
