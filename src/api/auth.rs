//! Sign-in against the catalog site
//!
//! The site answers a successful form post with HTTP 302 and sets the
//! `accessToken` and `user_ident` cookies. Anything else means the
//! credentials were rejected. This is the site's current behavior, not a
//! documented API, so keep the checks here in one place.

use reqwest::{redirect, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::session::Session;

const TOKEN_COOKIE: &str = "accessToken";
const IDENT_COOKIE: &str = "user_ident";
const DEFAULT_LOCALE: &str = "en";

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to login. Make sure you entered valid credentials.")]
    InvalidCredentials,

    #[error("Login succeeded but the `{0}` cookie was missing")]
    MissingCookie(&'static str),

    #[error("Missing credentials")]
    MissingCredentials,

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Client for the sign-in exchange
pub struct AuthClient {
    base_url: String,
    client: reqwest::Client,
}

impl AuthClient {
    /// Create a client for `base_url` (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .redirect(redirect::Policy::none())
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Exchange email and password for a session
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let url = format!("{}/sign-in", self.base_url);
        debug!(%url, "posting sign-in form");

        let response = self
            .client
            .post(&url)
            .form(&[("e_mail", email), ("password", password)])
            .send()
            .await?;

        if response.status() != StatusCode::FOUND {
            debug!(status = %response.status(), "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let mut access_token = None;
        let mut user_ident = None;
        for cookie in response.cookies() {
            match cookie.name() {
                TOKEN_COOKIE => access_token = Some(cookie.value().to_string()),
                IDENT_COOKIE => user_ident = Some(cookie.value().to_string()),
                _ => {}
            }
        }

        let session = Session::new(
            access_token.ok_or(AuthError::MissingCookie(TOKEN_COOKIE))?,
            user_ident.ok_or(AuthError::MissingCookie(IDENT_COOKIE))?,
            DEFAULT_LOCALE,
        );
        info!("signed in");
        Ok(session)
    }
}
