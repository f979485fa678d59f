//! Login proxy: forward credentials, then pin the refresh token in the
//! session cookie.

use serde_json::Value;

use crate::config::SessionConfig;
use crate::envelope::ProxyOutcome;
use crate::services::cookie::{CookieOptions, CookieWriter, set_cookie};
use crate::services::upstream::{ApiClient, FieldValues};

pub const LOGIN_PATH: &str = "/login/";
pub const LOGIN_FAILED: &str = "Something went wrong, please try again later";
pub const COOKIE_NOT_SET: &str = "Login successful, but failed to set cookie";

/// Forward `payload` to the backend's login endpoint.
///
/// On `{ success: true, data: { refresh } }` the refresh token becomes the
/// session cookie. If that cookie cannot be set the upstream body is returned
/// with `success: false` and an explanatory message; every other field is
/// kept. Network and decode failures collapse to the login fallback.
pub async fn login_user<W: CookieWriter>(
    client: &ApiClient,
    writer: &mut W,
    config: &SessionConfig,
    payload: &FieldValues,
) -> ProxyOutcome {
    let mut body = match client.post_json(LOGIN_PATH, payload).await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "error during login");
            return ProxyOutcome::Fallback { message: LOGIN_FAILED };
        }
    };

    if let Some(refresh) = refresh_token(&body) {
        let outcome = set_cookie(writer, config, &refresh, &CookieOptions::default());
        if !outcome.is_success() {
            tracing::warn!("login succeeded upstream but session cookie was not set");
            if let Some(obj) = body.as_object_mut() {
                obj.insert("success".into(), Value::Bool(false));
                obj.insert("message".into(), Value::String(COOKIE_NOT_SET.into()));
            }
        }
    }

    ProxyOutcome::Forwarded(body)
}

/// The refresh token of a successful login reply, if it carries a non-empty one.
fn refresh_token(body: &Value) -> Option<String> {
    if body.get("success").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    body.pointer("/data/refresh")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
