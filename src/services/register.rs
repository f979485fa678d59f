//! Registration proxy.

use crate::envelope::ProxyOutcome;
use crate::services::upstream::{ApiClient, FieldValues};

pub const REGISTER_PATH: &str = "/register/";
pub const REGISTRATION_FAILED: &str = "An error occurred during registration. Please try again later.";

/// Forward `payload` to the backend's register endpoint.
///
/// Whatever JSON the backend answers with is returned as is, including error
/// envelopes and bodies without a `success` field. Network and decode
/// failures are logged and collapse to the fixed registration fallback.
pub async fn register_user(client: &ApiClient, payload: &FieldValues) -> ProxyOutcome {
    match client.post_json(REGISTER_PATH, payload).await {
        Ok(body) => ProxyOutcome::Forwarded(body),
        Err(e) => {
            tracing::error!(error = %e, "error during registration");
            ProxyOutcome::Fallback { message: REGISTRATION_FAILED }
        }
    }
}

#[cfg(test)]
#[path = "register_test.rs"]
mod tests;
