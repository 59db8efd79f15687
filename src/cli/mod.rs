// CLI module for mapgate
// Author: kelexine (https://github.com/kelexine)

use clap::Parser;
use std::path::PathBuf;

/// mapgate - AMap geocoding and weather over HTTP and MCP
#[derive(Parser, Debug)]
#[command(name = "mapgate", version, about, long_about = None)]
pub struct Args {
    /// Config file (default: ~/.mapgate/config.toml, optional)
    #[arg(long, env = "MAPGATE_CONFIG")]
    pub config: Option<PathBuf>,

    /// `.env` file with MAP_API_KEY / LLM_API_KEY
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Serve the tool protocol on stdin/stdout instead of HTTP
    #[arg(long)]
    pub stdio: bool,

    /// Override server.host
    #[arg(long)]
    pub host: Option<String>,

    /// Override server.port
    #[arg(long)]
    pub port: Option<u16>,
}
