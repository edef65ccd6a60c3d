//! Request descriptor and response wrapper

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

/// Describes one outbound Graph call.
///
/// The `error_prefix` is a human-readable operation context ("Unable
/// to create a contact") that the middleware folds into every error it
/// raises, so a user sees which operation failed rather than just the
/// root cause. `bypass_classification` lets a caller opt out of the
/// centralized error handling when it wants finer-grained handling
/// itself (the auth self-test and identity resolution do this).
#[derive(Debug, Clone)]
pub struct GraphRequest {
    method: Method,
    url: String,
    query: Vec<(String, String)>,
    json_body: Option<serde_json::Value>,
    form_body: Option<Vec<(String, String)>>,
    error_prefix: String,
    bypass_classification: bool,
}

impl GraphRequest {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            json_body: None,
            form_body: None,
            error_prefix: String::new(),
            bypass_classification: false,
        }
    }

    /// Describe a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Describe a POST request.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Describe a PATCH request.
    #[must_use]
    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.json_body = Some(body);
        self
    }

    /// Attach a form-encoded body (`application/x-www-form-urlencoded`).
    #[must_use]
    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.form_body = Some(fields);
        self
    }

    /// Set the human-readable operation context for error messages.
    #[must_use]
    pub fn error_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.error_prefix = prefix.into();
        self
    }

    /// Skip centralized error classification for this call.
    #[must_use]
    pub fn bypass_classification(mut self) -> Self {
        self.bypass_classification = true;
        self
    }

    pub(crate) fn method(&self) -> &Method {
        &self.method
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub(crate) fn json_body(&self) -> Option<&serde_json::Value> {
        self.json_body.as_ref()
    }

    pub(crate) fn form_body(&self) -> Option<&[(String, String)]> {
        self.form_body.as_deref()
    }

    /// Operation context used in classified error messages.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.error_prefix
    }

    /// Whether this call opted out of centralized classification.
    #[must_use]
    pub fn bypasses_classification(&self) -> bool {
        self.bypass_classification
    }
}

/// A response that already passed (or bypassed) classification.
///
/// Successful responses come back completely unmodified: status and
/// raw body text exactly as the upstream sent them.
#[derive(Debug, Clone)]
pub struct GraphResponse {
    status: StatusCode,
    body: String,
}

impl GraphResponse {
    pub(crate) fn new(status: StatusCode, body: String) -> Self {
        Self { status, body }
    }

    /// HTTP status of the upstream response.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Raw response body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Deserialize the body. Callers decide how a parse failure maps
    /// into the error taxonomy, so the raw serde error is returned.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }
}
