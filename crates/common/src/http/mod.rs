//! HTTP request middleware for Graph calls
//!
//! Every outbound call is described by a [`GraphRequest`] and executed
//! through [`GraphClient`], which composes two stages around the wire
//! call: bearer-token injection before the request and error
//! classification after the response.

mod client;
mod middleware;
mod request;

pub use client::GraphClient;
pub use middleware::classify_response;
pub use request::{GraphRequest, GraphResponse};
