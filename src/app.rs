//! App state and the interaction state machine
//!
//! `App::update` is a reducer: it consumes one `AppEvent` at a time, mutates
//! the state and returns the `Effect`s the runtime has to carry out (start a
//! fetch, launch the player). It never performs I/O itself.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::api::FetchError;
use crate::models::{Course, Lesson};

// =============================================================================
// Screens and Focus
// =============================================================================

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Search box plus course results
    #[default]
    Search,
    /// Lessons of the activated course
    LessonList,
}

/// Focused pane on the search screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    SearchBox,
    CourseList,
}

impl Focus {
    const ORDER: [Focus; 2] = [Focus::SearchBox, Focus::CourseList];

    /// Position in the tab order
    pub fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next pane, wrapping around
    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }
}

// =============================================================================
// Events and Effects
// =============================================================================

/// The single in-flight fetch
#[derive(Debug, Clone, PartialEq)]
pub enum PendingFetch {
    Searching(String),
    LoadingLessons(Course),
}

impl PendingFetch {
    /// Busy indicator text
    pub fn label(&self) -> String {
        match self {
            PendingFetch::Searching(query) => format!("Searching for \"{}\"...", query),
            PendingFetch::LoadingLessons(course) => {
                format!("Loading lessons of {}...", course.title)
            }
        }
    }
}

/// Successful fetch result
#[derive(Debug, Clone, PartialEq)]
pub enum FetchPayload {
    Courses(Vec<Course>),
    Lessons(Vec<Lesson>),
}

/// Everything the state machine reacts to, delivered through one queue
#[derive(Debug)]
pub enum AppEvent {
    /// Key press from the terminal
    Input(KeyEvent),
    /// A fetch task finished
    FetchCompleted(Result<FetchPayload, FetchError>),
    /// Spinner animation tick
    Tick,
    /// Shut down (signal or closed input)
    Quit,
}

/// Work the runtime performs on behalf of the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Search the catalog
    Search(String),
    /// Resolve and fetch the lessons of a course
    LoadLessons(Course),
    /// Hand a media reference to the player
    Play(String),
}

// =============================================================================
// List Cursor
// =============================================================================

/// Wrapping selection over a list of `len` items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCursor {
    /// Selected index, `None` iff the list is empty
    pub selected: Option<usize>,
    /// Total number of items
    pub len: usize,
}

impl ListCursor {
    /// Cursor over `len` items with the first one selected
    pub fn new(len: usize) -> Self {
        Self {
            selected: (len > 0).then_some(0),
            len,
        }
    }

    /// Move selection down, wrapping to the top
    pub fn next(&mut self) {
        if let Some(i) = self.selected {
            self.selected = Some((i + 1) % self.len);
        }
    }

    /// Move selection up, wrapping to the bottom
    pub fn previous(&mut self) {
        if let Some(i) = self.selected {
            self.selected = Some(if i == 0 { self.len - 1 } else { i - 1 });
        }
    }
}

// =============================================================================
// Search Input
// =============================================================================

/// Search box contents with a character cursor
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    pub query: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl SearchInput {
    fn byte_index(&self) -> usize {
        self.query
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.query.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.query.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index();
            self.query.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Text before and after the cursor
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_index())
    }
}

// =============================================================================
// Spinner
// =============================================================================

/// Busy indicator animation
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    const FRAMES: [&'static str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % Self::FRAMES.len();
    }

    pub fn frame(&self) -> &'static str {
        Self::FRAMES[self.frame]
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Interaction state, one per interactive session
#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub focus: Focus,
    pub search: SearchInput,
    pub courses: Vec<Course>,
    pub course_list: ListCursor,
    /// Course whose lessons are shown
    pub active_course: Option<Course>,
    pub lessons: Vec<Lesson>,
    pub lesson_list: ListCursor,
    pub pending: Option<PendingFetch>,
    /// Cause of the fetch failure that ended the session
    pub last_error: Option<String>,
    pub spinner: Spinner,
    pub running: bool,
}

impl Default for App {
    fn default() -> Self {
        Self {
            screen: Screen::Search,
            focus: Focus::SearchBox,
            search: SearchInput::default(),
            courses: Vec::new(),
            course_list: ListCursor::default(),
            active_course: None,
            lessons: Vec::new(),
            lesson_list: ListCursor::default(),
            pending: None,
            last_error: None,
            spinner: Spinner::default(),
            running: true,
        }
    }
}

impl App {
    /// Create a new App instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn selected_course(&self) -> Option<&Course> {
        self.course_list.selected.and_then(|i| self.courses.get(i))
    }

    pub fn selected_lesson(&self) -> Option<&Lesson> {
        self.lesson_list.selected.and_then(|i| self.lessons.get(i))
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Apply one event and return the effects to run
    pub fn update(&mut self, event: AppEvent) -> Vec<Effect> {
        if !self.running {
            return Vec::new();
        }

        match event {
            AppEvent::Input(key) => self.handle_key(key).into_iter().collect(),
            AppEvent::FetchCompleted(result) => {
                self.handle_fetch(result);
                Vec::new()
            }
            AppEvent::Tick => {
                self.spinner.tick();
                Vec::new()
            }
            AppEvent::Quit => {
                self.quit();
                Vec::new()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Fetch completion
    // -------------------------------------------------------------------------

    fn handle_fetch(&mut self, result: Result<FetchPayload, FetchError>) {
        let Some(pending) = self.pending.take() else {
            debug!("fetch completion without a pending fetch, ignored");
            return;
        };

        match (pending, result) {
            (_, Err(e)) => {
                // Any fetch failure ends the session
                self.last_error = Some(e.to_string());
                self.quit();
            }
            (PendingFetch::Searching(query), Ok(FetchPayload::Courses(courses))) => {
                debug!(%query, count = courses.len(), "search results");
                self.course_list = ListCursor::new(courses.len());
                self.courses = courses;
                if !self.courses.is_empty() {
                    self.focus = Focus::CourseList;
                }
            }
            (PendingFetch::LoadingLessons(course), Ok(FetchPayload::Lessons(lessons))) => {
                debug!(course = %course.title, count = lessons.len(), "lessons");
                self.lesson_list = ListCursor::new(lessons.len());
                self.lessons = lessons;
                self.active_course = Some(course);
                self.screen = Screen::LessonList;
            }
            (pending, Ok(_)) => {
                debug!(?pending, "fetch payload does not match pending fetch, ignored");
                self.pending = Some(pending);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    fn is_quit_key(&self, key: &KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        // 'q' types into the search box unless input is blocked anyway
        let typing = self.screen == Screen::Search && self.focus == Focus::SearchBox;
        key.code == KeyCode::Char('q') && (!typing || self.is_busy())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        if self.is_quit_key(&key) {
            self.quit();
            return None;
        }

        if self.is_busy() {
            return None;
        }

        match (self.screen, self.focus) {
            (Screen::Search, Focus::SearchBox) => self.handle_search_box_key(key),
            (Screen::Search, Focus::CourseList) => self.handle_course_list_key(key),
            (Screen::LessonList, _) => self.handle_lesson_list_key(key),
        }
    }

    fn handle_search_box_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Enter => return self.submit_search(),
            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.next(),
            KeyCode::Esc => self.search.clear(),
            KeyCode::Char(c) => self.search.insert(c),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Left => self.search.cursor_left(),
            KeyCode::Right => self.search.cursor_right(),
            KeyCode::Home => self.search.cursor_home(),
            KeyCode::End => self.search.cursor_end(),
            _ => {}
        }
        None
    }

    fn handle_course_list_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Enter => return self.activate_course(),
            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.next(),
            KeyCode::Char('/') => self.focus = Focus::SearchBox,
            KeyCode::Up | KeyCode::Char('k') => self.course_list.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.course_list.next(),
            _ => {}
        }
        None
    }

    fn handle_lesson_list_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.lesson_list.previous(),
            KeyCode::Down | KeyCode::Char('j') => self.lesson_list.next(),
            KeyCode::Enter => {
                return self
                    .selected_lesson()
                    .map(|lesson| Effect::Play(lesson.file.clone()));
            }
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                self.back_to_search()
            }
            _ => {}
        }
        None
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    fn submit_search(&mut self) -> Option<Effect> {
        let query = self.search.query.trim();
        if query.is_empty() {
            return None;
        }
        let query = query.to_string();
        self.pending = Some(PendingFetch::Searching(query.clone()));
        Some(Effect::Search(query))
    }

    fn activate_course(&mut self) -> Option<Effect> {
        let course = self.selected_course()?.clone();
        self.pending = Some(PendingFetch::LoadingLessons(course.clone()));
        Some(Effect::LoadLessons(course))
    }

    fn back_to_search(&mut self) {
        self.lessons.clear();
        self.lesson_list = ListCursor::default();
        self.active_course = None;
        self.screen = Screen::Search;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
