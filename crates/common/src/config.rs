//! Connector configuration
//!
//! Two secrets come from the environment. The fallback placeholders
//! exist so the authorize-URL and token-exchange flows can be
//! exercised locally without registering an app; they are never valid
//! against the real identity platform and must not be shipped as
//! production defaults.

use mailbridge_domain::constants::{API_BASE_URL, AUTH_BASE_URL};

/// Environment variable holding the OAuth client id.
pub const CLIENT_ID_ENV: &str = "MAILBRIDGE_CLIENT_ID";

/// Environment variable holding the OAuth client secret.
pub const CLIENT_SECRET_ENV: &str = "MAILBRIDGE_CLIENT_SECRET";

/// Local-testing placeholder client id.
pub const DEFAULT_CLIENT_ID: &str = "1234";

/// Local-testing placeholder client secret.
pub const DEFAULT_CLIENT_SECRET: &str = "abcd";

/// Settings for the auth manager and the Graph client.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub client_id: String,
    pub client_secret: String,
    /// OAuth2 endpoint base (`{auth_base_url}/authorize`, `/token`).
    pub auth_base_url: String,
    /// Graph resource endpoint base (`{api_base_url}/me`, ...).
    pub api_base_url: String,
}

impl AuthSettings {
    /// Build settings with explicit credentials and production bases.
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_base_url: AUTH_BASE_URL.to_string(),
            api_base_url: API_BASE_URL.to_string(),
        }
    }

    /// Read credentials from the environment, falling back to the
    /// documented local-testing placeholders.
    #[must_use]
    pub fn from_env() -> Self {
        let client_id =
            std::env::var(CLIENT_ID_ENV).unwrap_or_else(|_| DEFAULT_CLIENT_ID.to_string());
        let client_secret =
            std::env::var(CLIENT_SECRET_ENV).unwrap_or_else(|_| DEFAULT_CLIENT_SECRET.to_string());
        Self::new(client_id, client_secret)
    }

    /// Override the OAuth endpoint base (tests point this at a mock
    /// server).
    #[must_use]
    pub fn with_auth_base_url(mut self, base: impl Into<String>) -> Self {
        self.auth_base_url = base.into();
        self
    }

    /// Override the Graph endpoint base (tests point this at a mock
    /// server).
    #[must_use]
    pub fn with_api_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base_url = base.into();
        self
    }
}
