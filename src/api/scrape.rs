//! HTML extraction for catalog pages
//!
//! Search results are `article.course` cards; the course page carries its
//! numeric id on the `button.course-action` element.

use scraper::{ElementRef, Html, Selector};

use crate::models::Course;

struct CourseSelectors {
    card: Selector,
    link: Selector,
    title: Selector,
    duration: Selector,
    language: Selector,
    lessons: Selector,
}

impl CourseSelectors {
    fn new() -> Option<Self> {
        let sel = |s: &str| Selector::parse(s).ok();
        Some(Self {
            card: sel("article.course")?,
            link: sel("a.course-btn")?,
            title: sel("h3")?,
            duration: sel(".course-duration")?,
            language: sel(".course-lang")?,
            lessons: sel(".course-lessons")?,
        })
    }
}

/// Collected, trimmed text of the first match of `selector` under `el`
fn text_of(el: &ElementRef<'_>, selector: &Selector) -> String {
    el.select(selector)
        .next()
        .map(|e| e.text().collect::<String>())
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Split the `.course-lessons` block into (lesson count, source).
///
/// The block holds up to two non-empty lines. A single line is the source
/// (books have no lesson count).
pub fn split_lessons_and_source(text: &str) -> (String, String) {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    match lines.as_slice() {
        [] => (String::new(), String::new()),
        [source] => (String::new(), source.to_string()),
        [lessons, source, ..] => (lessons.to_string(), source.to_string()),
    }
}

/// Extract all course cards from a search results page.
///
/// A page without matches yields an empty list, missing fields stay empty.
pub fn extract_courses(html: &str) -> Vec<Course> {
    let Some(sel) = CourseSelectors::new() else {
        return Vec::new();
    };
    let doc = Html::parse_document(html);

    doc.select(&sel.card)
        .map(|card| {
            let url = card
                .select(&sel.link)
                .next()
                .and_then(|a| a.value().attr("href"))
                .unwrap_or_default()
                .to_string();
            let (lesson_count, source) = split_lessons_and_source(
                &card
                    .select(&sel.lessons)
                    .next()
                    .map(|e| e.text().collect::<String>())
                    .unwrap_or_default(),
            );

            Course {
                title: text_of(&card, &sel.title),
                language: text_of(&card, &sel.language),
                duration: text_of(&card, &sel.duration),
                lesson_count,
                source,
                url,
            }
        })
        .collect()
}

/// Extract the course id from a course page
pub fn extract_course_id(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("button.course-action").ok()?;

    doc.select(&selector)
        .find_map(|b| b.value().attr("data-course-id"))
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}
