//! Auth routes: registration and login proxies, session cookie removal.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use axum_extra::extract::cookie::CookieJar;

use crate::envelope::{CookieOutcome, ProxyOutcome};
use crate::services::cookie::{self, CookieOptions, JarWriter};
use crate::services::login::{LOGIN_FAILED, login_user};
use crate::services::register::{REGISTRATION_FAILED, register_user};
use crate::services::upstream::FieldValues;
use crate::state::AppState;

/// `POST /api/auth/register`: forward the form to the backend. A body that
/// is not a JSON object gets the registration fallback.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<FieldValues>, JsonRejection>,
) -> Json<ProxyOutcome> {
    match payload {
        Ok(Json(payload)) => Json(register_user(&state.api, &payload).await),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "unreadable registration body");
            Json(ProxyOutcome::Fallback { message: REGISTRATION_FAILED })
        }
    }
}

/// `POST /api/auth/login`: forward credentials, set the refresh cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<FieldValues>, JsonRejection>,
) -> (CookieJar, Json<ProxyOutcome>) {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "unreadable login body");
            return (jar, Json(ProxyOutcome::Fallback { message: LOGIN_FAILED }));
        }
    };
    let mut writer = JarWriter::new(jar);
    let outcome = login_user(&state.api, &mut writer, &state.config, &payload).await;
    (writer.into_jar(), Json(outcome))
}

/// `POST /api/auth/logout`: clear the session cookie. Takes an optional
/// `{ "path": "..." }` body; a missing, empty or malformed body means the
/// default options, so the cookie path is `/`.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    options: Result<Json<CookieOptions>, JsonRejection>,
) -> (CookieJar, Json<CookieOutcome>) {
    let options = options.map(|Json(o)| o).unwrap_or_default();
    let mut writer = JarWriter::new(jar);
    let outcome = cookie::remove_cookie(&mut writer, &state.config, &options);
    (writer.into_jar(), Json(outcome))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
