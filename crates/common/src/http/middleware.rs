//! Bearer injection and response classification
//!
//! The post-response stage normalizes upstream failures into the
//! `BridgeError` taxonomy. Known Graph error codes get precise,
//! user-facing outcomes; everything else degrades to an opaque
//! upstream error that carries whatever detail the provider gave.

use mailbridge_domain::{BridgeError, Result};
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::request::GraphRequest;

/// Exact upstream wording for the oversized-attachment case. This is a
/// deliberate byte-for-byte match on a third-party message: any change
/// in upstream wording silently demotes the error to the generic
/// branch. Kept for compatibility with the established user-facing
/// behavior.
const MAX_REQUEST_LENGTH_MESSAGE: &str = "Maximum request length exceeded.";

/// Pre-request stage: set `Authorization: Bearer <token>` when a
/// non-empty access token is available. Token-endpoint calls run
/// unauthenticated and pass `None`.
pub(crate) fn include_bearer_token(
    builder: RequestBuilder,
    access_token: Option<&str>,
) -> RequestBuilder {
    match access_token {
        Some(token) if !token.is_empty() => builder.bearer_auth(token),
        _ => builder,
    }
}

/// Shape of a Graph error response body.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: Option<String>,
    message: Option<String>,
}

/// The closed set of Graph error codes this connector dispatches on.
/// Everything else lands on `Other`, which is the visible default arm
/// rather than an implicit fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GraphErrorCode {
    AccessDenied,
    InvalidIdMalformed,
    BadRequest,
    Other,
}

impl GraphErrorCode {
    fn parse(code: &str) -> Self {
        match code {
            "ErrorAccessDenied" => Self::AccessDenied,
            "ErrorInvalidIdMalformed" => Self::InvalidIdMalformed,
            "BadRequest" => Self::BadRequest,
            _ => Self::Other,
        }
    }
}

/// Post-response stage: classify a non-success response into a typed
/// outcome. Success (HTTP 200-299) and bypassed requests return `Ok`
/// so the response passes through unmodified.
pub fn classify_response(request: &GraphRequest, status: StatusCode, body: &str) -> Result<()> {
    if request.bypasses_classification() {
        return Ok(());
    }

    if status.is_success() {
        return Ok(());
    }

    let prefix = request.prefix();

    // Parse failures are swallowed here on purpose: an unparseable body
    // falls through to the raw fallback below instead of raising a
    // parse error of its own.
    let envelope: Option<ErrorEnvelope> = serde_json::from_str(body).ok();

    if let Some(detail) = envelope.and_then(|envelope| envelope.error) {
        let code = detail.code.unwrap_or_default();
        let message = detail.message.unwrap_or_default();

        return Err(match GraphErrorCode::parse(&code) {
            GraphErrorCode::AccessDenied => BridgeError::recoverable(format!(
                "{prefix}: This feature requires new permissions from your Exchange account. \
                 Please reconnect your account to take advantage of it."
            )),
            GraphErrorCode::InvalidIdMalformed => BridgeError::halted(format!(
                "{prefix}: One of the fields you entered has an invalid id."
            )),
            GraphErrorCode::BadRequest
                if status == StatusCode::PAYLOAD_TOO_LARGE
                    && message == MAX_REQUEST_LENGTH_MESSAGE =>
            {
                BridgeError::halted(format!("{prefix}: Attached files must be less than 4MB."))
            }
            // Any other code, including BadRequest outside the narrow
            // 413 case, surfaces the provider's own message.
            GraphErrorCode::BadRequest | GraphErrorCode::Other => BridgeError::Upstream {
                status: status.as_u16(),
                message: format!("{prefix}: {message}"),
            },
        });
    }

    debug!(status = status.as_u16(), "upstream error body had no structured error field");

    // No structured error at all: never fabricate a message, surface
    // the raw status and body verbatim.
    Err(BridgeError::Upstream {
        status: status.as_u16(),
        message: format!("{prefix}. Error code {}: {body}", status.as_u16()),
    })
}
