// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{
    geocode_handler, health_handler, mcp_handler, metrics_handler, weather_handler,
};
use super::middleware::{cors_layer, request_id_layers};
use crate::config::ServerConfig;
use crate::mcp::McpServer;
use crate::tools::Tools;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<Tools>,
    pub mcp: McpServer,
}

pub fn create_router(config: &ServerConfig, tools: Arc<Tools>) -> Router {
    let state = AppState {
        mcp: McpServer::new(tools.clone()),
        tools,
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let mut app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/weather", get(weather_handler))
        .route("/api/geocode", get(geocode_handler))
        .route("/mcp", post(mcp_handler))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    if config.enable_cors {
        app = app.layer(cors_layer());
    }

    app
}
