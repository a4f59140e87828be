//! Authenticated catalog reads
//!
//! Search results and course pages are HTML and go through `scrape`; the
//! lesson list is JSON.

use reqwest::header::{AUTHORIZATION, COOKIE};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::api::scrape;
use crate::models::{Course, Lesson};
use crate::session::Session;

/// Catalog fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Catalog returned HTTP {0}")]
    Status(u16),

    #[error("Failed to extract course id from {0}")]
    MissingCourseId(String),

    #[error("Invalid lessons response: {0}")]
    InvalidResponse(String),
}

/// Catalog client bound to one session
#[derive(Clone)]
pub struct CatalogClient {
    base_url: String,
    session: Session,
    client: reqwest::Client,
}

impl CatalogClient {
    /// Create a client for `base_url` (no trailing slash) acting as `session`
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self {
            base_url: base_url.into(),
            session,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Cookie header value expected by the site
    fn cookie_header(&self) -> String {
        format!(
            "accessToken={}; user_ident={}; locale={}",
            self.session.access_token, self.session.user_ident, self.session.locale
        )
    }

    /// Course links may be relative to the site root
    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }

    /// GET `url` with the session attached and return the body
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!(%url, "catalog GET");
        let response = self
            .client
            .get(url)
            .header(COOKIE, self.cookie_header())
            .header(AUTHORIZATION, format!("Bearer {}", self.session.access_token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Search courses by title. No matches is an empty list, not an error.
    pub async fn search(&self, query: &str) -> Result<Vec<Course>, FetchError> {
        let url = format!("{}/search?q={}", self.base_url, urlencoding::encode(query));
        let html = self.get_text(&url).await?;
        let courses = scrape::extract_courses(&html);
        debug!(query, count = courses.len(), "search done");
        Ok(courses)
    }

    /// Resolve the numeric course id from a course page
    pub async fn course_id(&self, course_url: &str) -> Result<String, FetchError> {
        let url = self.absolute_url(course_url);
        let html = self.get_text(&url).await?;
        scrape::extract_course_id(&html).ok_or(FetchError::MissingCourseId(url))
    }

    /// Fetch the lessons of a course, in catalog order
    pub async fn lessons(&self, course: &Course) -> Result<Vec<Lesson>, FetchError> {
        let id = self.course_id(&course.url).await?;
        let url = format!("{}/course/{}/lessons", self.base_url, id);
        let body = self.get_text(&url).await?;

        let lessons: Vec<Lesson> = serde_json::from_str(&body)
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;
        debug!(course_id = %id, count = lessons.len(), "lessons loaded");
        Ok(lessons)
    }
}
