//! Error types used throughout the connector
//!
//! Classification policy: the request middleware raises one of these
//! immediately and never retries; retry/backoff belongs to the host
//! platform. `Halted` means "stop this automation run cleanly", not a
//! system fault, and the host must not alert on it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for MailBridge
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeError {
    /// The user must take action before this can succeed (reconnect the
    /// account, fix an input field). Message is shown verbatim.
    #[error("{message}")]
    RecoverableUser { message: String },

    /// Stop the current automation run as a clean user-facing stop.
    #[error("{message}")]
    Halted { message: String },

    /// Opaque upstream failure, surfaced with whatever detail the
    /// upstream gave. `message` is pre-formatted and already carries
    /// the operation prefix.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Token acquisition or refresh failed.
    #[error("{message}")]
    TokenExchange { message: String },

    /// Transport-level failure before any HTTP status was available.
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error (missing or malformed settings).
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BridgeError {
    /// Build a `RecoverableUser` error from any displayable message.
    pub fn recoverable(message: impl Into<String>) -> Self {
        Self::RecoverableUser { message: message.into() }
    }

    /// Build a `Halted` error from any displayable message.
    pub fn halted(message: impl Into<String>) -> Self {
        Self::Halted { message: message.into() }
    }

    /// Build a `TokenExchange` error from any displayable message.
    pub fn token_exchange(message: impl Into<String>) -> Self {
        Self::TokenExchange { message: message.into() }
    }
}

/// Result type alias for MailBridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
