//! Session cookie commands: set the refresh-token cookie, erase it.
//!
//! Both commands report a [`CookieOutcome`] instead of failing. A writer
//! error is logged and turned into a fixed message so callers always get a
//! structured answer.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::config::SessionConfig;
use crate::envelope::CookieOutcome;

pub const DEFAULT_COOKIE_PATH: &str = "/";

pub const TOKEN_REQUIRED: &str = "Token is required";
pub const SET_FAILED: &str = "Failed to set cookie";
pub const REMOVE_FAILED: &str = "Failed to remove cookie";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CookieError {
    /// The cookie name is empty or contains characters outside an RFC 6265 token.
    #[error("invalid cookie name: {0:?}")]
    InvalidName(String),

    /// The cookie path contains `;`, control characters or non-visible ASCII.
    #[error("invalid cookie path: {0:?}")]
    InvalidPath(String),

    /// The writer could not record the change.
    #[error("cookie write failed: {0}")]
    Write(String),
}

/// Caller overrides for a cookie command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CookieOptions {
    pub path: Option<String>,
}

impl CookieOptions {
    #[must_use]
    pub fn at(path: &str) -> Self {
        Self { path: Some(path.to_owned()) }
    }

    /// The requested path, or `/` when none (or an empty one) was given.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_deref().filter(|p| !p.is_empty()).unwrap_or(DEFAULT_COOKIE_PATH)
    }
}

/// Something that accumulates cookie changes for the current response.
pub trait CookieWriter {
    /// Record `cookie` to be set.
    ///
    /// # Errors
    ///
    /// Returns a [`CookieError`] if the cookie cannot be recorded.
    fn set(&mut self, cookie: Cookie<'static>) -> Result<(), CookieError>;

    /// Record deletion of the cookie `name` scoped to `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`CookieError`] if the deletion cannot be recorded.
    fn delete(&mut self, name: &str, path: &str) -> Result<(), CookieError>;
}

/// [`CookieWriter`] over the response cookie jar.
#[derive(Debug, Clone)]
pub struct JarWriter {
    jar: CookieJar,
}

impl JarWriter {
    #[must_use]
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    /// Hand the jar back so the handler can attach it to the response.
    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl CookieWriter for JarWriter {
    fn set(&mut self, cookie: Cookie<'static>) -> Result<(), CookieError> {
        validate_name(cookie.name())?;
        if let Some(path) = cookie.path() {
            validate_path(path)?;
        }
        self.jar = self.jar.clone().add(cookie);
        Ok(())
    }

    fn delete(&mut self, name: &str, path: &str) -> Result<(), CookieError> {
        validate_name(name)?;
        validate_path(path)?;
        // An expired empty cookie, so the client drops it even when this
        // request did not carry it.
        let removal = Cookie::build((name.to_owned(), ""))
            .path(path.to_owned())
            .max_age(Duration::ZERO)
            .build();
        self.jar = self.jar.clone().add(removal);
        Ok(())
    }
}

/// Reject names that are not RFC 6265 tokens.
pub(crate) fn validate_name(name: &str) -> Result<(), CookieError> {
    const SEPARATORS: &[u8] = b"()<>@,;:\\\"/[]?={} \t";
    let valid = !name.is_empty() && name.bytes().all(|b| b.is_ascii_graphic() && !SEPARATORS.contains(&b));
    if valid { Ok(()) } else { Err(CookieError::InvalidName(name.to_owned())) }
}

/// Reject paths that would break out of the `Path` attribute.
pub(crate) fn validate_path(path: &str) -> Result<(), CookieError> {
    let valid = path.bytes().all(|b| b.is_ascii_graphic() && b != b';');
    if valid { Ok(()) } else { Err(CookieError::InvalidPath(path.to_owned())) }
}

/// Set the session cookie to `token`: `HttpOnly`, `SameSite=Strict`, `Secure`
/// per config, lifetime from config.
pub fn set_cookie<W: CookieWriter + ?Sized>(
    writer: &mut W,
    config: &SessionConfig,
    token: &str,
    options: &CookieOptions,
) -> CookieOutcome {
    if token.is_empty() {
        return CookieOutcome::Failed { error: TOKEN_REQUIRED };
    }

    let cookie = Cookie::build((config.cookie_name.clone(), token.to_owned()))
        .path(options.path().to_owned())
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config.cookie_secure)
        .max_age(config.cookie_max_age)
        .build();

    match writer.set(cookie) {
        Ok(()) => CookieOutcome::Done,
        Err(e) => {
            tracing::error!(error = %e, cookie = %config.cookie_name, "cookie setting failed");
            CookieOutcome::Failed { error: SET_FAILED }
        }
    }
}

/// Delete the session cookie at the requested path. Whether the cookie
/// existed beforehand is not checked.
pub fn remove_cookie<W: CookieWriter + ?Sized>(
    writer: &mut W,
    config: &SessionConfig,
    options: &CookieOptions,
) -> CookieOutcome {
    let path = options.path();
    match writer.delete(&config.cookie_name, path) {
        Ok(()) => {
            tracing::debug!(cookie = %config.cookie_name, %path, "session cookie removed");
            CookieOutcome::Done
        }
        Err(e) => {
            tracing::error!(error = %e, cookie = %config.cookie_name, %path, "cookie removal failed");
            CookieOutcome::Failed { error: REMOVE_FAILED }
        }
    }
}

#[cfg(test)]
#[path = "cookie_test.rs"]
mod tests;
