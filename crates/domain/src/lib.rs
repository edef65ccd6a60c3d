//! # MailBridge Domain
//!
//! Business domain types and models for MailBridge.
//!
//! This crate contains:
//! - The `BridgeError` taxonomy and `Result` alias
//! - Credential and identity types owned by the auth layer
//! - Graph API endpoint constants
//!
//! ## Architecture
//! - No dependencies on other MailBridge crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use types::*;
