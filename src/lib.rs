// mapgate - AMap geocoding and weather over HTTP and MCP
// Author: kelexine (https://github.com/kelexine)

pub mod amap;
pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;
pub mod metrics;
pub mod models;
pub mod server;
pub mod tools;
pub mod translate;
pub mod utils;
