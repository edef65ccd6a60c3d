//! HTTP execution through the two-stage middleware pipeline

use mailbridge_domain::{BridgeError, Result};
use reqwest::Client;

use super::middleware::{classify_response, include_bearer_token};
use super::request::{GraphRequest, GraphResponse};

/// Executes [`GraphRequest`]s with bearer injection before the call
/// and error classification after it.
///
/// One logical operation performs at most one round trip; there is no
/// retry, timeout policy, or pooling logic here beyond what reqwest
/// provides. All of that belongs to the host platform.
#[derive(Debug, Clone, Default)]
pub struct GraphClient {
    http: Client,
}

impl GraphClient {
    /// Create a client with reqwest defaults.
    #[must_use]
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    /// Create a client around a preconfigured reqwest instance.
    #[must_use]
    pub fn with_client(http: Client) -> Self {
        Self { http }
    }

    /// Execute one request through the middleware pipeline.
    ///
    /// `access_token` is injected as a bearer header when present and
    /// non-empty; the unauthenticated token-endpoint calls pass `None`.
    pub async fn execute(
        &self,
        access_token: Option<&str>,
        request: GraphRequest,
    ) -> Result<GraphResponse> {
        let mut builder = self.http.request(request.method().clone(), request.url());
        builder = include_bearer_token(builder, access_token);

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }
        if let Some(body) = request.json_body() {
            builder = builder.json(body);
        }
        if let Some(fields) = request.form_body() {
            builder = builder.form(fields);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| BridgeError::Network(format!("{}: {err}", request.prefix())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| BridgeError::Network(format!("{}: {err}", request.prefix())))?;

        classify_response(&request, status, &body)?;

        Ok(GraphResponse::new(status, body))
    }
}
