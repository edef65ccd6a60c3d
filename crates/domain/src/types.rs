//! Credential and identity types
//!
//! The `Credential` is the only entity that survives process restart.
//! It is persisted by the host automation platform between invocations
//! and handed back to us per call, so it must round-trip through serde
//! without loss.

use serde::{Deserialize, Serialize};

/// OAuth2 token pair plus the metadata the refresh flow depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Short-lived bearer token; replaced on every acquire/refresh.
    pub access_token: String,

    /// Long-lived token; the server may rotate it on refresh.
    pub refresh_token: String,

    /// Space-delimited scopes the credential was originally granted
    /// with. Set once at acquisition time and replayed verbatim on
    /// every refresh - replaying anything else risks the provider
    /// rejecting the refresh or silently changing permissions out of
    /// sync with what the user consented to.
    pub scopes: String,

    /// Cached identity (`userPrincipalName`). Resolved lazily on first
    /// use and reused for the lifetime of the credential.
    #[serde(rename = "userPrincipalName", skip_serializing_if = "Option::is_none")]
    pub user_principal_name: Option<String>,
}

impl Credential {
    /// Create a credential fresh from a token exchange.
    #[must_use]
    pub fn new(
        access_token: String,
        refresh_token: String,
        scopes: String,
        user_principal_name: Option<String>,
    ) -> Self {
        Self { access_token, refresh_token, scopes, user_principal_name }
    }
}

/// Shape of the Graph `/me` identity endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityInfo {
    #[serde(rename = "userPrincipalName")]
    pub user_principal_name: String,

    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// OData collection wrapper used by every Graph list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphCollection<T> {
    pub value: Vec<T>,
}
