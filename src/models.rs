//! Data structures for the course catalog
//!
//! - **Course**: one search hit scraped from the catalog HTML
//! - **Lesson**: one playable entry of a course, decoded from the lessons JSON

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Course
// =============================================================================

/// A catalog entry returned by a search.
///
/// `duration` and `lesson_count` are empty for book-type entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub language: String,
    pub duration: String,
    pub lesson_count: String,
    pub source: String,
    /// Link to the course page, as found in the search results
    pub url: String,
}

impl Course {
    /// Books carry neither a duration nor a lesson count
    pub fn is_book(&self) -> bool {
        self.duration.is_empty() && self.lesson_count.is_empty()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if !self.language.is_empty() {
            write!(f, " [{}]", self.language)?;
        }
        if !self.duration.is_empty() {
            write!(f, " - {}", self.duration)?;
        }
        Ok(())
    }
}

// =============================================================================
// Lesson
// =============================================================================

/// A lesson as listed by `/course/{id}/lessons`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Media reference handed to the player
    #[serde(default)]
    pub file: String,
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// The lessons endpoint is not consistent about numeric vs string ids
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
