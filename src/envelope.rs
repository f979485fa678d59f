//! Response envelopes shared by everything that talks to the backend API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend wraps every reply in either a success envelope
//! (`{ success, statusCode, message, meta?, data }`) or an error envelope
//! (`{ success: false, statusCode, message, errorDetails }`). The session
//! actions in this crate add two outcome shapes of their own: cookie commands
//! answer `{ success, error? }` and proxy actions answer either the upstream
//! JSON verbatim or a fixed `{ success: false, message }` fallback.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

// =============================================================================
// BACKEND ENVELOPES
// =============================================================================

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub limit: u64,
    pub total: u64,
    pub has_more: bool,
    pub next_skip: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default)]
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    #[serde(default)]
    pub error_details: ErrorDetails,
}

/// Validation detail carried by an [`ErrorResponse`]. Unknown keys are kept
/// in `extra` so nothing the backend sends is dropped. `issues` is kept as
/// raw JSON since backends send it as a field map or as a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// ACTION OUTCOMES
// =============================================================================

/// Result of a cookie command. Serializes as `{ "success": true }` or
/// `{ "success": false, "error": "..." }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieOutcome {
    Done,
    Failed { error: &'static str },
}

impl CookieOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl Serialize for CookieOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Done => {
                let mut s = serializer.serialize_struct("CookieOutcome", 1)?;
                s.serialize_field("success", &true)?;
                s.end()
            }
            Self::Failed { error } => {
                let mut s = serializer.serialize_struct("CookieOutcome", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("error", error)?;
                s.end()
            }
        }
    }
}

/// Result of a proxy action: the upstream JSON exactly as received, or the
/// action's fixed fallback message.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyOutcome {
    Forwarded(Value),
    Fallback { message: &'static str },
}

impl ProxyOutcome {
    /// Render the outcome as the JSON value a caller sees.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Forwarded(value) => value,
            Self::Fallback { message } => serde_json::json!({ "success": false, "message": message }),
        }
    }
}

impl Serialize for ProxyOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Forwarded(value) => value.serialize(serializer),
            Self::Fallback { message } => {
                let mut s = serializer.serialize_struct("ProxyOutcome", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("message", message)?;
                s.end()
            }
        }
    }
}

#[cfg(test)]
#[path = "envelope_test.rs"]
mod tests;
