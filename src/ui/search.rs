//! Search screen
//!
//! Search box on top, results on the left and the selected course's details
//! on the right while the result list is focused.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::Theme;
use crate::app::{App, Focus};
use crate::models::Course;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    render_search_box(frame, rows[0], app);

    let show_detail = app.focus == Focus::CourseList && app.selected_course().is_some();
    if show_detail {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);
        render_results(frame, cols[0], app);
        if let Some(course) = app.selected_course() {
            render_course_detail(frame, cols[1], course);
        }
    } else {
        render_results(frame, rows[1], app);
    }
}

fn render_search_box(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::SearchBox && !app.is_busy();

    let text = if focused {
        let (before, after) = app.search.split_at_cursor();
        format!("⌕ {}│{}", before, after)
    } else if app.search.query.is_empty() {
        "⌕ Search courses...".to_string()
    } else {
        format!("⌕ {}", app.search.query)
    };

    let search_box = Paragraph::new(text)
        .style(if focused { Theme::text() } else { Theme::dimmed() })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if focused {
                    Theme::border_focused()
                } else {
                    Theme::border()
                })
                .title(Span::styled(" Search ", Theme::header())),
        );
    frame.render_widget(search_box, area);
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::CourseList;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(
            format!(" Search results ({}) ", app.courses.len()),
            Theme::header(),
        ));

    if app.courses.is_empty() {
        let hint = if app.search.query.is_empty() {
            "Type a course title and press enter"
        } else {
            "No courses"
        };
        frame.render_widget(Paragraph::new(hint).style(Theme::dimmed()).block(block), area);
        return;
    }

    let items: Vec<ListItem> = app
        .courses
        .iter()
        .enumerate()
        .map(|(i, course)| {
            let is_cursor = focused && app.course_list.selected == Some(i);
            let marker = if is_cursor { "> " } else { "  " };
            let style = if is_cursor { Theme::selected() } else { Theme::text() };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(course.title.as_str(), style),
            ]))
        })
        .collect();

    let mut state = ListState::default().with_selected(app.course_list.selected);
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

/// Field lines for the detail panel; books skip duration and lessons
pub fn course_detail_lines(course: &Course) -> Vec<Line<'_>> {
    let field = |label: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{:<10}", label), Theme::label()),
            Span::styled(value.to_string(), Theme::text()),
        ])
    };

    let mut lines = vec![
        field("Title:", &course.title),
        field("Source:", &course.source),
        field("Language:", &course.language),
    ];
    if !course.duration.is_empty() {
        lines.push(field("Duration:", &course.duration));
    }
    if !course.lesson_count.is_empty() {
        lines.push(field("Lessons:", &course.lesson_count));
    }
    lines
}

fn render_course_detail(frame: &mut Frame, area: Rect, course: &Course) {
    let detail = Paragraph::new(course_detail_lines(course))
        .wrap(ratatui::widgets::Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border())
                .title(Span::styled(" Selected course ", Theme::header())),
        );
    frame.render_widget(detail, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_detail_skips_empty_fields() {
        let book = Course {
            title: "Learning Go".into(),
            language: "English".into(),
            source: "oreilly".into(),
            ..Course::default()
        };
        assert_eq!(course_detail_lines(&book).len(), 3);

        let video = Course {
            duration: "3h".into(),
            lesson_count: "20".into(),
            ..book
        };
        assert_eq!(course_detail_lines(&video).len(), 5);
    }
}
