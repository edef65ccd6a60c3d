//! OAuth2 token lifecycle for the Exchange connector
//!
//! Handles the authorization-code exchange, refresh-token exchange
//! with scope replay, lazy identity resolution, and the coarse
//! connectivity self-test the host platform runs against a stored
//! connection.

mod identity;
mod manager;

pub use identity::IDENTITY_RESOLUTION_ERROR;
pub use manager::{AuthManager, OAUTH_SCOPES};
