//! Session boundary configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Components never read the process environment themselves. `main` builds a
//! `SessionConfig` once and hands it to each component, so tests construct
//! configs directly instead of mutating globals.

use time::Duration;

pub const API_URL_VAR: &str = "NEXT_PUBLIC_API_URL";
pub const COOKIE_NAME_VAR: &str = "NEXT_PUBLIC_COOKIE_NAME";
pub const AUTH_KEY_VAR: &str = "NEXT_PUBLIC_AUTH_KEY";
pub const COOKIE_EXPIRES_IN_VAR: &str = "NEXT_PUBLIC_COOKIE_EXPIRES_IN";

pub const DEFAULT_COOKIE_EXPIRES_IN: &str = "24hr";
pub const DEFAULT_COOKIE_HOURS: i64 = 24;
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("missing required env var {var}")]
    Missing { var: String },

    /// A value was present but could not be parsed.
    #[error("invalid value for {var}: {value}")]
    Invalid { var: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Base URL of the backend API, without a trailing slash.
    pub api_base_url: String,
    /// Name of the HTTP cookie carrying the refresh token.
    pub cookie_name: String,
    /// Storage key under which the client keeps its access token.
    pub auth_key_name: String,
    /// Lifetime of the session cookie.
    pub cookie_max_age: Duration,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl SessionConfig {
    /// Build a config from explicit values, with the default cookie lifetime
    /// and an insecure cookie.
    #[must_use]
    pub fn new(api_base_url: &str, cookie_name: &str, auth_key_name: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_owned(),
            cookie_name: cookie_name.to_owned(),
            auth_key_name: auth_key_name.to_owned(),
            cookie_max_age: Duration::hours(DEFAULT_COOKIE_HOURS),
            cookie_secure: false,
        }
    }

    /// Load from environment variables.
    ///
    /// Required:
    /// - `NEXT_PUBLIC_API_URL`
    /// - `NEXT_PUBLIC_COOKIE_NAME`
    /// - `NEXT_PUBLIC_AUTH_KEY`
    ///
    /// Optional:
    /// - `NEXT_PUBLIC_COOKIE_EXPIRES_IN`: `"<hours>hr"`, default `24hr`
    /// - `COOKIE_SECURE`: boolean; otherwise secure only when `APP_ENV=production`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if a required variable is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = required(API_URL_VAR)?;
        let cookie_name = required(COOKIE_NAME_VAR)?;
        let auth_key_name = required(AUTH_KEY_VAR)?;

        let expires_in =
            std::env::var(COOKIE_EXPIRES_IN_VAR).unwrap_or_else(|_| DEFAULT_COOKIE_EXPIRES_IN.to_owned());
        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or_else(is_production);

        Ok(Self {
            cookie_max_age: parse_expires_in(&expires_in),
            cookie_secure,
            ..Self::new(&api_base_url, &cookie_name, &auth_key_name)
        })
    }
}

/// Listener configuration for the HTTP service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    /// Load from `PORT`, defaulting to 3000.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `PORT` is set but not a valid port.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "PORT".into(), value: raw })?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { port })
    }
}

/// Parse a cookie lifetime written as `"<hours>hr"`.
///
/// Only the leading integer counts, so `"48h"` and `"12hours"` work too.
/// Input without a leading integer, or too large to express in seconds,
/// falls back to 24 hours.
#[must_use]
pub fn parse_expires_in(raw: &str) -> Duration {
    let raw = raw.trim_start();
    let sign_len = usize::from(raw.starts_with(['+', '-']));
    let digits_len = raw[sign_len..].bytes().take_while(u8::is_ascii_digit).count();
    let seconds = raw[..sign_len + digits_len]
        .parse::<i64>()
        .ok()
        .and_then(|hours| hours.checked_mul(3600))
        .unwrap_or(DEFAULT_COOKIE_HOURS * 3600);
    Duration::seconds(seconds)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

fn is_production() -> bool {
    std::env::var("APP_ENV").is_ok_and(|env| env.eq_ignore_ascii_case("production"))
}

fn required(var: &str) -> Result<String, ConfigError> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::Missing { var: var.to_owned() })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
