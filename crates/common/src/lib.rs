//! Core connector plumbing shared across MailBridge crates.
//!
//! Two components live here:
//! - `auth`: the OAuth2 token lifecycle (authorize URL, code exchange,
//!   refresh with scope replay, identity resolution, connection test)
//! - `http`: the request middleware every outbound Graph call flows
//!   through (bearer injection, response classification)
//!
//! Action handlers in `mailbridge-infra` call into `http`; the host
//! platform calls into `auth`.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod config;
pub mod http;

// Re-export commonly used types for convenience
pub use auth::{AuthManager, OAUTH_SCOPES};
pub use config::AuthSettings;
pub use http::{GraphClient, GraphRequest, GraphResponse};
