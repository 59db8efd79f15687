//! Model Context Protocol surface for the geocode and weather tools.
//!
//! The same [`McpServer`] answers JSON-RPC messages posted to `/mcp` and
//! line-delimited messages on stdio (`--stdio`).
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod protocol;
mod server;
pub mod stdio;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::{McpServer, DEFAULT_PROTOCOL_VERSION, SERVER_NAME};
