//! Request and response types shared by the REST and tool surfaces.
//!
//! - `WeatherQuery` / `GeocodeQuery`: inbound query parameters.
//! - `ProviderResponse`: the provider's JSON, relayed as-is.

// Author: kelexine (https://github.com/kelexine)

use crate::error::{GatewayError, Result};
use serde_json::{json, Value};

/// Opaque JSON returned by the provider.
pub type ProviderResponse = Value;

/// Synthetic payload standing in for a provider response that could not be
/// fetched or decoded.
pub fn upstream_failure(info: impl Into<String>) -> ProviderResponse {
    json!({
        "status": "0",
        "info": info.into(),
    })
}

/// Returns `value` if it has non-whitespace content, otherwise a
/// `Validation` error naming `field`.
pub fn require<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(GatewayError::missing_param(field));
    }
    Ok(value)
}

/// Decoded query-string pairs, in request order.
pub type QueryPairs = [(String, String)];

/// First value for `name`, or empty. Repeated parameters keep the first.
pub fn first_param(pairs: &QueryPairs, name: &str) -> String {
    pairs
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.clone())
        .unwrap_or_default()
}

/// `GET /api/weather?city=...`
#[derive(Debug, Clone, Default)]
pub struct WeatherQuery {
    pub city: String,
}

impl WeatherQuery {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            city: first_param(pairs, "city"),
        }
    }

    pub fn validate(&self) -> Result<&str> {
        require(&self.city, "City")
    }
}

/// `GET /api/geocode?address=...&city=...`
#[derive(Debug, Clone, Default)]
pub struct GeocodeQuery {
    pub address: String,

    /// Optional city restriction; empty means nationwide.
    pub city: String,
}

impl GeocodeQuery {
    pub fn from_pairs(pairs: &QueryPairs) -> Self {
        Self {
            address: first_param(pairs, "address"),
            city: first_param(pairs, "city"),
        }
    }

    pub fn validate(&self) -> Result<&str> {
        require(&self.address, "Address")
    }
}
