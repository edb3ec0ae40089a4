//! Model Context Protocol (MCP) JSON-RPC handling
//!
//! Provides the response envelope and the method dispatcher.

pub mod rpc;
pub mod server;
