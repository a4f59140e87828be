//! CLI Command Handlers
//!
//! Each handler takes its parsed args and the shared Output, talks to the
//! collaborators and returns an ExitCode.

use std::path::Path;

use tracing::{info, warn};

use crate::api::{AuthClient, AuthError, CatalogClient};
use crate::cli::{ExitCode, LessonsCmd, LoginCmd, Output, SearchCmd};
use crate::config::{Config, Context};
use crate::models::{Course, Lesson};
use crate::session::{Session, SessionError};

// =============================================================================
// Shared helpers
// =============================================================================

/// Load config plus a valid, unexpired session, or report why not
pub fn authenticated(config_dir: Option<&Path>, output: &Output) -> Result<Context, ExitCode> {
    let dir = Context::resolve_dir(config_dir)
        .map_err(|e| output.error(e.to_string(), ExitCode::Error))?;

    let ctx = Context::load(dir).map_err(|e| {
        let code = if e.downcast_ref::<SessionError>().is_some() {
            ExitCode::AuthError
        } else {
            ExitCode::Error
        };
        output.error(format!("{:#}", e), code)
    })?;

    ctx.session
        .check_expiry()
        .map_err(|e| output.error(e.to_string(), ExitCode::AuthError))?;

    Ok(ctx)
}

fn course_lines(courses: &[Course]) -> Vec<String> {
    if courses.is_empty() {
        return vec!["No courses found".to_string()];
    }
    courses
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{:>3}. {}\n     {}", i + 1, c, c.url))
        .collect()
}

fn lesson_lines(lessons: &[Lesson]) -> Vec<String> {
    lessons
        .iter()
        .enumerate()
        .map(|(i, l)| format!("{:>3}. {}\t{}", i + 1, l.title, l.file))
        .collect()
}

// =============================================================================
// Login Command
// =============================================================================

/// Missing credentials and rejected logins only print a message; the exit
/// status does not tell them apart from success.
pub async fn login_cmd(cmd: LoginCmd, config_dir: Option<&Path>, output: &Output) -> ExitCode {
    let Some((email, password)) = cmd.credentials() else {
        return output.error(AuthError::MissingCredentials.to_string(), ExitCode::Success);
    };

    let dir = match Context::resolve_dir(config_dir) {
        Ok(dir) => dir,
        Err(e) => return output.error(e.to_string(), ExitCode::Error),
    };
    let config = match Config::load_from(&dir) {
        Ok(config) => config,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::Error),
    };

    output.info(format!("Signing in as {}...", email));
    let client = AuthClient::new(config.base_url());
    let session = match client.login(email, password).await {
        Ok(session) => session,
        Err(e) => return output.error(format!("Login failed: {}", e), ExitCode::Success),
    };

    if let Err(e) = session.check_expiry() {
        warn!(error = %e, "fresh token does not validate");
    }

    let path = Session::path_in(&dir);
    if let Err(e) = session.save_to(&path) {
        return output.error(e.to_string(), ExitCode::Error);
    }
    info!(path = %path.display(), "session stored");

    if output.quiet && !output.json {
        return ExitCode::Success;
    }
    let logged_in = serde_json::json!({ "logged_in": true });
    if let Err(e) = output.print(logged_in, |_| vec!["Logged in".to_string()]) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}

// =============================================================================
// Logout Command
// =============================================================================

pub async fn logout_cmd(config_dir: Option<&Path>, output: &Output) -> ExitCode {
    let dir = match Context::resolve_dir(config_dir) {
        Ok(dir) => dir,
        Err(e) => return output.error(e.to_string(), ExitCode::Error),
    };

    match Session::remove_at(&Session::path_in(&dir)) {
        Ok(true) => output.info("Logged out"),
        Ok(false) => output.info("No session stored"),
        Err(e) => return output.error(e.to_string(), ExitCode::Error),
    }
    ExitCode::Success
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, config_dir: Option<&Path>, output: &Output) -> ExitCode {
    let ctx = match authenticated(config_dir, output) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    let client = CatalogClient::new(ctx.base_url, ctx.session);

    output.info(format!("Searching for: {}", cmd.query));

    match client.search(&cmd.query).await {
        Ok(mut courses) => {
            if let Some(limit) = cmd.limit {
                courses.truncate(limit);
            }
            if let Err(e) = output.print(courses, |c| course_lines(c)) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Search failed: {}", e), ExitCode::NetworkError),
    }
}

// =============================================================================
// Lessons Command
// =============================================================================

pub async fn lessons_cmd(cmd: LessonsCmd, config_dir: Option<&Path>, output: &Output) -> ExitCode {
    let ctx = match authenticated(config_dir, output) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    let client = CatalogClient::new(ctx.base_url, ctx.session);

    let course = Course {
        url: cmd.url,
        ..Course::default()
    };

    match client.lessons(&course).await {
        Ok(lessons) => {
            if let Err(e) = output.print(lessons, |l| lesson_lines(l)) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Loading lessons failed: {}", e), ExitCode::NetworkError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> Output {
        Output {
            json: false,
            quiet: true,
        }
    }

    #[tokio::test]
    async fn test_search_without_session_is_auth_error() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = SearchCmd {
            query: "go".into(),
            limit: None,
        };
        assert_eq!(search_cmd(cmd, Some(dir.path()), &quiet()).await, ExitCode::AuthError);
    }

    #[tokio::test]
    async fn test_expired_session_is_auth_error() {
        let dir = tempfile::tempdir().unwrap();
        // {"exp":1}
        let session = Session::new("h.eyJleHAiOjF9.s", "u", "en");
        session.save_to(&Session::path_in(dir.path())).unwrap();

        let cmd = LessonsCmd {
            url: "/course/x".into(),
        };
        assert_eq!(lessons_cmd(cmd, Some(dir.path()), &quiet()).await, ExitCode::AuthError);
    }

    #[tokio::test]
    async fn test_login_missing_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = LoginCmd {
            email: Some("me@example.com".into()),
            password: None,
        };
        // Message only, same status as a successful run
        assert_eq!(login_cmd(cmd, Some(dir.path()), &quiet()).await, ExitCode::Success);
        assert!(!Session::path_in(dir.path()).exists());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        Session::new("a.b.c", "u", "en")
            .save_to(&Session::path_in(dir.path()))
            .unwrap();

        assert_eq!(logout_cmd(Some(dir.path()), &quiet()).await, ExitCode::Success);
        assert!(!Session::path_in(dir.path()).exists());
        assert_eq!(logout_cmd(Some(dir.path()), &quiet()).await, ExitCode::Success);
    }

    #[test]
    fn test_course_lines_empty() {
        assert_eq!(course_lines(&[]), vec!["No courses found".to_string()]);
    }
}
