//! Session store
//!
//! The authenticated identity persisted between runs at
//! `~/.config/coursehunt/session.toml`, plus the JWT expiry check that gates
//! every authenticated command.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// File name of the persisted session inside the config directory
pub const SESSION_FILE: &str = "session.toml";

/// Errors from loading, saving or validating a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not logged in (no session at {0}). Try `coursehunt login`.")]
    Missing(PathBuf),
    #[error("Could not read session file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Session file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Could not write session file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not encode session: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("Received malformed access token")]
    MalformedToken,
    #[error("Token expired. Try logging in again.")]
    Expired,
}

/// Authenticated identity carried on every catalog request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user_ident: String,
    pub locale: String,
}

#[derive(Deserialize)]
struct Claims {
    exp: i64,
}

impl Session {
    pub fn new(
        access_token: impl Into<String>,
        user_ident: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            user_ident: user_ident.into(),
            locale: locale.into(),
        }
    }

    /// Session file inside `dir`
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(SESSION_FILE)
    }

    /// Load the session stored at `path`
    pub fn load_from(path: &Path) -> Result<Self, SessionError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SessionError::Missing(path.to_path_buf())
            } else {
                SessionError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        toml::from_str(&text).map_err(|source| SessionError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the session to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<(), SessionError> {
        let write_err = |source| SessionError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(write_err)
    }

    /// Delete the session at `path`. Returns false if there was none.
    pub fn remove_at(path: &Path) -> Result<bool, SessionError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(SessionError::Write {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Unix timestamp of the token's `exp` claim
    pub fn expires_at(&self) -> Result<i64, SessionError> {
        let segments: Vec<&str> = self.access_token.split('.').collect();
        if segments.len() != 3 {
            return Err(SessionError::MalformedToken);
        }

        // JWTs use the URL-safe alphabet; tolerate padded and standard ones too
        let payload = segments[1].trim_end_matches('=');
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .or_else(|_| STANDARD_NO_PAD.decode(payload))
            .map_err(|_| SessionError::MalformedToken)?;

        let claims: Claims =
            serde_json::from_slice(&bytes).map_err(|_| SessionError::MalformedToken)?;
        Ok(claims.exp)
    }

    /// Fail if the token is malformed or expired at `now` (unix seconds)
    pub fn check_expiry_at(&self, now: i64) -> Result<(), SessionError> {
        if now > self.expires_at()? {
            return Err(SessionError::Expired);
        }
        Ok(())
    }

    /// Fail if the token is malformed or already expired
    pub fn check_expiry(&self) -> Result<(), SessionError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        self.check_expiry_at(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_exp(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"42","exp":{}}}"#, exp));
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn test_expires_at_reads_claim() {
        let session = Session::new(token_with_exp(1_700_000_000), "ident", "en");
        assert_eq!(session.expires_at().unwrap(), 1_700_000_000);
    }

    #[test]
    fn test_expired_token_rejected() {
        let session = Session::new(token_with_exp(1_000), "ident", "en");
        assert!(matches!(
            session.check_expiry_at(2_000),
            Err(SessionError::Expired)
        ));
    }

    #[test]
    fn test_valid_token_accepted() {
        let session = Session::new(token_with_exp(5_000), "ident", "en");
        assert!(session.check_expiry_at(4_999).is_ok());
        // Exactly at exp is still valid
        assert!(session.check_expiry_at(5_000).is_ok());
    }

    #[test]
    fn test_malformed_token_segments() {
        let session = Session::new("not-a-jwt", "ident", "en");
        assert!(matches!(
            session.expires_at(),
            Err(SessionError::MalformedToken)
        ));
    }

    #[test]
    fn test_padded_standard_payload_accepted() {
        let payload = STANDARD_NO_PAD.encode(r#"{"exp":99}"#);
        let session = Session::new(format!("h.{}==.s", payload), "ident", "en");
        assert_eq!(session.expires_at().unwrap(), 99);
    }

    #[test]
    fn test_payload_without_exp_is_malformed() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"1"}"#);
        let session = Session::new(format!("h.{}.s", payload), "ident", "en");
        assert!(matches!(
            session.expires_at(),
            Err(SessionError::MalformedToken)
        ));
    }
}
