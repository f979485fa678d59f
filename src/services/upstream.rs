//! HTTP client for the backend API.
//!
//! ERROR HANDLING
//! ==============
//! `post_json` reports transport and decode failures as [`UpstreamError`] and
//! leaves it to the calling action to turn them into a user-facing envelope.
//! `query` follows the backend's own envelope convention instead: non-2xx
//! replies are decoded as an [`ErrorResponse`] and flattened into a
//! [`BaseQueryError`].
//!
//! Each call is a single attempt. There is no retry, backoff, or client-side
//! timeout beyond what the transport enforces.

use reqwest::Method;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, HeaderMap};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::SessionConfig;
use crate::envelope::{ErrorDetails, ErrorResponse};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Arbitrary form fields submitted by a caller. Forwarded without validation.
pub type FieldValues = Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The request could not be sent or the body could not be read.
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("upstream response parse failed: {0}")]
    Parse(String),
}

/// A request described the way UI data hooks describe them: a path relative
/// to the API base plus optional body, query, headers and content type.
#[derive(Debug, Clone)]
pub struct BaseQuery {
    pub url: String,
    pub method: Method,
    pub data: Option<Value>,
    pub params: Vec<(String, String)>,
    pub headers: HeaderMap,
    /// Defaults to `application/json`.
    pub content_type: Option<String>,
}

impl BaseQuery {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            data: None,
            params: Vec::new(),
            headers: HeaderMap::new(),
            content_type: None,
        }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    #[must_use]
    pub fn post(url: impl Into<String>, data: Value) -> Self {
        Self { data: Some(data), ..Self::new(Method::POST, url) }
    }

    #[must_use]
    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_owned(), value.to_owned()));
        self
    }
}

/// Failure of a [`BaseQuery`], shaped `{ status, data: { message, errorDetails } }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseQueryError {
    /// Backend status code; `None` when no response arrived.
    pub status: Option<u16>,
    pub data: BaseQueryErrorData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseQueryErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<ErrorDetails>,
}

impl BaseQueryError {
    fn transport(err: &reqwest::Error) -> Self {
        Self { status: None, data: BaseQueryErrorData { message: err.to_string(), error_details: None } }
    }
}

impl From<ErrorResponse> for BaseQueryError {
    fn from(resp: ErrorResponse) -> Self {
        Self {
            status: Some(resp.status_code),
            data: BaseQueryErrorData { message: resp.message, error_details: Some(resp.error_details) },
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_owned() }
    }

    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(&config.api_base_url)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST {base}{path}` with a JSON body and no caching, then parse the
    /// reply as JSON whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Request`] on transport failure and
    /// [`UpstreamError::Parse`] when the body is not JSON.
    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> Result<Value, UpstreamError> {
        let resp = self
            .http
            .post(self.url(path))
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(CACHE_CONTROL, "no-store")
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(%path, %status, bytes = body.len(), "upstream replied");
        serde_json::from_str(&body).map_err(|e| UpstreamError::Parse(e.to_string()))
    }

    /// Run a [`BaseQuery`] against the API base.
    ///
    /// A 2xx body is returned as JSON, or as a JSON string when it is not
    /// JSON, or `null` when empty.
    ///
    /// # Errors
    ///
    /// Returns a [`BaseQueryError`] for transport failures and non-2xx replies.
    pub async fn query(&self, query: BaseQuery) -> Result<Value, BaseQueryError> {
        let content_type = query.content_type.as_deref().unwrap_or(JSON_CONTENT_TYPE).to_owned();
        let mut req = self
            .http
            .request(query.method, self.url(&query.url))
            .header(CONTENT_TYPE, content_type)
            .headers(query.headers)
            .query(&query.params);
        if let Some(data) = &query.data {
            req = req.body(data.to_string());
        }

        let resp = req.send().await.map_err(|e| BaseQueryError::transport(&e))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| BaseQueryError::transport(&e))?;

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)));
        }

        tracing::warn!(url = %query.url, %status, "api query rejected");
        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => Err(err.into()),
            Err(_) => Err(BaseQueryError {
                status: Some(status.as_u16()),
                data: BaseQueryErrorData {
                    message: status.canonical_reason().unwrap_or("request failed").to_owned(),
                    error_details: None,
                },
            }),
        }
    }
}

#[cfg(test)]
#[path = "upstream_test.rs"]
mod tests;
