//! Identity resolution against the Graph `/me` endpoint
//!
//! The identity string (`userPrincipalName`) is needed for the
//! connection label and for filtering on certain APIs. It is fetched
//! at most once per credential and cached; a refresh re-fetches it on
//! purpose, as an end-to-end check that the new access token works.

use mailbridge_domain::{BridgeError, IdentityInfo, Result};
use tracing::warn;

use crate::http::{GraphClient, GraphRequest};

/// Fixed user-facing message for any identity-resolution failure.
/// Raw transport or parse errors are logged, never surfaced.
pub const IDENTITY_RESOLUTION_ERROR: &str = "There was an error obtaining necessary user \
     information. Please try reconnecting your account or contact support for assistance.";

/// Fetch `userPrincipalName` with the given access token.
///
/// Classification is bypassed: this call does its own minimal
/// handling, collapsing every failure mode into one fixed message.
pub(super) async fn fetch_user_principal_name(
    client: &GraphClient,
    api_base_url: &str,
    access_token: &str,
) -> Result<String> {
    let request =
        GraphRequest::get(format!("{api_base_url}/me")).bypass_classification();

    let response = client.execute(Some(access_token), request).await.map_err(|err| {
        warn!(error = %err, "unable to obtain user principal name: request failed");
        BridgeError::recoverable(IDENTITY_RESOLUTION_ERROR)
    })?;

    if !response.status().is_success() || response.body().is_empty() {
        warn!(
            status = response.status().as_u16(),
            "unable to obtain user principal name: did not receive a valid response"
        );
        return Err(BridgeError::recoverable(IDENTITY_RESOLUTION_ERROR));
    }

    match response.json::<IdentityInfo>() {
        Ok(info) if !info.user_principal_name.is_empty() => Ok(info.user_principal_name),
        Ok(_) => {
            warn!("unable to obtain user principal name: identity field was empty");
            Err(BridgeError::recoverable(IDENTITY_RESOLUTION_ERROR))
        }
        Err(err) => {
            warn!(error = %err, "unable to obtain user principal name: unexpected body");
            Err(BridgeError::recoverable(IDENTITY_RESOLUTION_ERROR))
        }
    }
}
