//! Axum-based HTTP server for the mapgate gateway.
//!
//! # Components
//!
//! - `handlers`: The REST endpoints (`/api/weather`, `/api/geocode`), the
//!   tool protocol endpoint (`/mcp`), health and metrics.
//! - `middleware`: Request ID tracking and CORS.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{HealthCheck, HealthResponse, HealthStatus};
pub use routes::{create_router, AppState};
