//! OAuth2 flows: authorize URL, code exchange, refresh, self-test

use mailbridge_domain::{BridgeError, Credential, IdentityInfo, Result};
use serde::Deserialize;

use super::identity::fetch_user_principal_name;
use crate::config::AuthSettings;
use crate::http::{GraphClient, GraphRequest};

/// Scopes requested at authorization time.
///
/// `offline_access` is needed for the refresh token, `user.read` for
/// the connectivity self-test. This constant is the single source for
/// both the authorize URL and the code exchange; refresh never uses
/// it and replays the credential's stored scopes instead, so already
/// connected users keep working when this constant grows in a future
/// version (they reconnect to pick up new scopes).
pub const OAUTH_SCOPES: &str = "offline_access user.read Contacts.ReadWrite";

const ACQUIRE_TOKEN_PREFIX: &str = "Unable to fetch access token";
const REFRESH_TOKEN_PREFIX: &str = "Unable to refresh access token";

const RECONNECT_MESSAGE: &str = "Something went wrong with the authentication process. Please \
     reconnect your account and try again.";

/// Token endpoint response body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
}

/// Owns the OAuth2 token lifecycle for one connector configuration.
#[derive(Debug, Clone)]
pub struct AuthManager {
    settings: AuthSettings,
    client: GraphClient,
}

impl AuthManager {
    /// Create a manager with a default Graph client.
    #[must_use]
    pub fn new(settings: AuthSettings) -> Self {
        Self { settings, client: GraphClient::new() }
    }

    /// Create a manager sharing an existing Graph client.
    #[must_use]
    pub fn with_client(settings: AuthSettings, client: GraphClient) -> Self {
        Self { settings, client }
    }

    /// The Graph client, shared with action handlers.
    #[must_use]
    pub fn client(&self) -> &GraphClient {
        &self.client
    }

    /// Settings in effect for this manager.
    #[must_use]
    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    /// Build the browser authorization URL.
    ///
    /// Pure function with no failure path. The redirect URI is
    /// percent-encoded but otherwise passed through verbatim - a
    /// malformed value produces a malformed URL rather than an error
    /// here, and the provider rejects it at redirect time.
    #[must_use]
    pub fn authorize_url(&self, redirect_uri: &str) -> String {
        format!(
            "{}/authorize?scope={}&client_id={}&redirect_uri={}&response_type=code&response_mode=query",
            self.settings.auth_base_url,
            urlencoding::encode(OAUTH_SCOPES),
            self.settings.client_id,
            urlencoding::encode(redirect_uri),
        )
    }

    /// Exchange an authorization code for a fully populated credential.
    ///
    /// The identity-resolution call runs sequentially after the token
    /// exchange, using the just-obtained access token.
    pub async fn acquire_token(&self, code: &str, redirect_uri: &str) -> Result<Credential> {
        let token = self
            .request_token(
                ACQUIRE_TOKEN_PREFIX,
                vec![
                    ("grant_type".to_string(), "authorization_code".to_string()),
                    ("client_id".to_string(), self.settings.client_id.clone()),
                    ("client_secret".to_string(), self.settings.client_secret.clone()),
                    ("redirect_uri".to_string(), redirect_uri.to_string()),
                    ("code".to_string(), code.to_string()),
                    ("scope".to_string(), OAUTH_SCOPES.to_string()),
                ],
            )
            .await?;

        let user_principal_name = fetch_user_principal_name(
            &self.client,
            &self.settings.api_base_url,
            &token.access_token,
        )
        .await?;

        Ok(Credential::new(
            token.access_token,
            token.refresh_token,
            OAUTH_SCOPES.to_string(),
            Some(user_principal_name),
        ))
    }

    /// Exchange the refresh token for a new token pair.
    ///
    /// Replays `current.scopes` exactly as stored - never the live
    /// [`OAUTH_SCOPES`] constant. Identity is re-resolved even when
    /// already cached; a refresh doubles as an end-to-end check that
    /// the new access token works.
    pub async fn refresh_token(&self, current: &Credential) -> Result<Credential> {
        let token = self
            .request_token(
                REFRESH_TOKEN_PREFIX,
                vec![
                    ("grant_type".to_string(), "refresh_token".to_string()),
                    ("client_id".to_string(), self.settings.client_id.clone()),
                    ("client_secret".to_string(), self.settings.client_secret.clone()),
                    ("refresh_token".to_string(), current.refresh_token.clone()),
                    ("scope".to_string(), current.scopes.clone()),
                ],
            )
            .await?;

        let user_principal_name = fetch_user_principal_name(
            &self.client,
            &self.settings.api_base_url,
            &token.access_token,
        )
        .await?;

        Ok(Credential::new(
            token.access_token,
            token.refresh_token,
            current.scopes.clone(),
            Some(user_principal_name),
        ))
    }

    /// Return the cached identity, resolving and caching it on first
    /// use.
    pub async fn resolve_identity(&self, credential: &mut Credential) -> Result<String> {
        if let Some(user_principal_name) = credential.user_principal_name.clone() {
            return Ok(user_principal_name);
        }

        let user_principal_name = fetch_user_principal_name(
            &self.client,
            &self.settings.api_base_url,
            &credential.access_token,
        )
        .await?;

        credential.user_principal_name = Some(user_principal_name.clone());
        Ok(user_principal_name)
    }

    /// Coarse connectivity self-test against the identity endpoint.
    ///
    /// Exactly HTTP 200 is success. Anything else - including other
    /// 2xx statuses - raises one generic reconnect error; this call
    /// validates that a stored connection still works, it does not
    /// diagnose why it doesn't.
    pub async fn test_connection(&self, credential: &Credential) -> Result<IdentityInfo> {
        let request = GraphRequest::get(format!("{}/me", self.settings.api_base_url))
            .bypass_classification();

        let response = self.client.execute(Some(&credential.access_token), request).await?;

        if response.status().as_u16() != 200 {
            return Err(BridgeError::recoverable(RECONNECT_MESSAGE));
        }

        response.json::<IdentityInfo>().map_err(|_| BridgeError::recoverable(RECONNECT_MESSAGE))
    }

    async fn request_token(
        &self,
        prefix: &str,
        fields: Vec<(String, String)>,
    ) -> Result<TokenResponse> {
        let request = GraphRequest::post(format!("{}/token", self.settings.auth_base_url))
            .form(fields)
            .error_prefix(prefix);

        // Token-endpoint calls run unauthenticated; any classified
        // failure is re-labelled as a token-exchange error so auth
        // failures stay distinguishable from resource failures.
        let response =
            self.client.execute(None, request).await.map_err(into_token_exchange)?;

        response.json::<TokenResponse>().map_err(|_| {
            BridgeError::token_exchange(format!(
                "{prefix}: the token endpoint returned a malformed response"
            ))
        })
    }
}

fn into_token_exchange(err: BridgeError) -> BridgeError {
    match err {
        BridgeError::Upstream { message, .. }
        | BridgeError::RecoverableUser { message }
        | BridgeError::Halted { message } => BridgeError::token_exchange(message),
        other => other,
    }
}
