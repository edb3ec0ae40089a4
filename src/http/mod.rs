//! HTTP transport layer
//!
//! Provides the single `/sse` endpoint and the cross-origin policy applied to every response.

pub mod cors;
pub mod handlers;
