// mapgate - AMap geocoding and weather over HTTP and MCP
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use mapgate::cli::Args;
use mapgate::config::{AppConfig, EnvFile};
use mapgate::mcp::{stdio, McpServer};
use mapgate::server::create_router;
use mapgate::tools::Tools;
use mapgate::utils::logging::{self, mask_secret};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use zeroize::Zeroize;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let env_file = EnvFile::load(&args.env_file);
    let mut config = AppConfig::load(args.config.as_deref(), env_file.as_ref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting mapgate v{}", env!("CARGO_PKG_VERSION"));

    match &env_file {
        Some(f) => info!(
            "Loaded {} variables from {} ({} encoding)",
            f.len(),
            f.path.display(),
            f.encoding.map(|e| e.as_str()).unwrap_or("unknown")
        ),
        None => warn!("No readable env file at {}", args.env_file.display()),
    }

    // Phase 3: Resolve credentials and build the tool layer
    let credentials = config.credentials()?;
    info!("Using MAP_API_KEY: {}", mask_secret(&credentials.map_api_key));
    let tools = Arc::new(Tools::new(&config, &credentials)?);
    drop(credentials);
    // The clients hold their own zeroizing copies
    config.amap.api_key.zeroize();
    config.translate.api_key.zeroize();

    // Phase 4: stdio tool transport
    if args.stdio {
        stdio::serve(McpServer::new(tools)).await?;
        return Ok(());
    }

    // Phase 5: Build and start HTTP server
    let app = create_router(&config.server, tools);
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
