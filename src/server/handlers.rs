// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::GatewayError;
use crate::models::{GeocodeQuery, WeatherQuery};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    checks.insert(
        "amap".to_string(),
        HealthCheck {
            status: "ok".to_string(),
            message: format!("API base: {}", state.tools.amap_base_url()),
        },
    );

    // Lookups still work untranslated, so a missing key only degrades
    let translation_check = if state.tools.translation_enabled() {
        HealthCheck {
            status: "ok".to_string(),
            message: "City name translation enabled".to_string(),
        }
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "warning".to_string(),
            message: "No translation API key, city names are sent as given".to_string(),
        }
    };
    checks.insert("translation".to_string(), translation_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

type QueryParams = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Decoded query pairs, with a malformed query string reported in the
/// gateway's JSON error shape.
fn query_pairs(query: QueryParams, endpoint: &str) -> Result<Vec<(String, String)>, GatewayError> {
    query.map(|Query(pairs)| pairs).map_err(|rejection| {
        crate::metrics::record_request(endpoint, 400);
        GatewayError::Validation(rejection.body_text())
    })
}

/// `GET /api/weather?city=...`
pub async fn weather_handler(
    State(state): State<AppState>,
    query: QueryParams,
) -> Result<Json<Value>, GatewayError> {
    let query = WeatherQuery::from_pairs(&query_pairs(query, "weather")?);
    let city = query.validate().inspect_err(|_| {
        crate::metrics::record_request("weather", 400);
    })?;

    info!("Querying weather: {}", city);
    let result = state.tools.get_weather(city).await;
    debug!("Weather query result: {}", result);

    crate::metrics::record_request("weather", 200);
    Ok(Json(result))
}

/// `GET /api/geocode?address=...&city=...`
pub async fn geocode_handler(
    State(state): State<AppState>,
    query: QueryParams,
) -> Result<Json<Value>, GatewayError> {
    let query = GeocodeQuery::from_pairs(&query_pairs(query, "geocode")?);
    let address = query.validate().inspect_err(|_| {
        crate::metrics::record_request("geocode", 400);
    })?;

    info!("Querying geocode: {}, city: {}", address, query.city);
    let result = state.tools.geocode(address, &query.city).await;

    crate::metrics::record_request("geocode", 200);
    Ok(Json(result))
}

/// `POST /mcp` - one JSON-RPC message per request body
pub async fn mcp_handler(State(state): State<AppState>, body: String) -> Response {
    debug!(
        "Tool protocol message (first 500 chars): {}",
        body.chars().take(500).collect::<String>()
    );

    match state.mcp.handle_message(&body).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [("Content-Type", "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}
