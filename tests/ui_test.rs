//! UI rendering tests
//!
//! Renders each screen into a TestBackend and checks what ends up on it.

use coursehunt::app::{App, AppEvent, FetchPayload, Focus, PendingFetch, Screen};
use coursehunt::models::{Course, Lesson};
use coursehunt::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

/// Helper to create a test terminal with given size
fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

fn draw(app: &App) -> String {
    let mut terminal = test_terminal(100, 30);
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn course(title: &str) -> Course {
    Course {
        title: title.into(),
        language: "English".into(),
        duration: "2h 5m".into(),
        lesson_count: "14 lessons".into(),
        source: "udemy".into(),
        url: format!("/course/{}", title.to_lowercase().replace(' ', "-")),
    }
}

fn app_with_results() -> App {
    let mut app = App::new();
    for c in "go".chars() {
        app.update(AppEvent::Input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)));
    }
    app.update(AppEvent::Input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    app.update(AppEvent::FetchCompleted(Ok(FetchPayload::Courses(vec![
        course("Go Basics"),
        course("Go Web"),
    ]))));
    app
}

#[test]
fn test_empty_search_screen() {
    let screen = draw(&App::new());
    assert!(screen.contains("Search"));
    assert!(screen.contains("Type a course title and press enter"));
    assert!(screen.contains("enter"));
}

#[test]
fn test_results_with_detail_panel() {
    let app = app_with_results();
    assert_eq!(app.focus, Focus::CourseList);

    let screen = draw(&app);
    assert!(screen.contains("Search results (2)"));
    assert!(screen.contains("> Go Basics"));
    assert!(screen.contains("Selected course"));
    assert!(screen.contains("14 lessons"));
}

#[test]
fn test_busy_status_shows_pending_label() {
    let mut app = App::new();
    app.pending = Some(PendingFetch::Searching("golang".into()));

    let screen = draw(&app);
    assert!(screen.contains("Searching for \"golang\"..."));
}

#[test]
fn test_lesson_screen() {
    let mut app = app_with_results();
    app.update(AppEvent::Input(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    app.update(AppEvent::FetchCompleted(Ok(FetchPayload::Lessons(vec![
        Lesson {
            id: "1".into(),
            title: "Hello, world".into(),
            file: "https://cdn.example/1.mp4".into(),
        },
        Lesson {
            id: "2".into(),
            title: "Slices".into(),
            file: "https://cdn.example/2.mp4".into(),
        },
    ]))));
    assert_eq!(app.screen, Screen::LessonList);

    let screen = draw(&app);
    assert!(screen.contains("Go Basics"));
    assert!(screen.contains("1. Hello, world"));
    assert!(screen.contains("2 lessons"));
    assert!(screen.contains("play"));
}

#[test]
fn test_renders_in_small_terminal() {
    let app = app_with_results();
    let mut terminal = test_terminal(20, 5);
    terminal.draw(|frame| ui::render(frame, &app)).unwrap();
}
