// AMap HTTP client for geocoding and live weather
// Author: kelexine (https://github.com/kelexine)

use super::{GeocodeParams, WeatherParams, GEOCODE_PATH, WEATHER_PATH};
use crate::config::AmapConfig;
use crate::error::{GatewayError, Result};
use crate::models::{upstream_failure, ProviderResponse};
use crate::utils::logging::sanitize;
use reqwest::Client;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use zeroize::Zeroizing;

/// Client for the AMap web service API.
///
/// Both calls relay the provider's JSON untouched. Transport and decode
/// failures are turned into `{"status": "0", "info": ...}` instead of errors,
/// so callers always get a payload back.
#[derive(Clone)]
pub struct AmapClient {
    http_client: Client,
    base_url: String,
    api_key: Zeroizing<String>,
}

impl AmapClient {
    pub fn new(config: &AmapConfig, api_key: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(5))
            .pool_idle_timeout(Duration::from_secs(90))
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created AMap HTTP client for {}", config.api_base_url);

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: Zeroizing::new(api_key.to_string()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Convert an address into coordinates. `city` may be empty.
    pub async fn geocode(&self, address: &str, city: &str) -> ProviderResponse {
        info!("Geocoding: {}, city: {}", address, city);
        let params = GeocodeParams::new(address, city, &self.api_key);
        self.relay("geocode", GEOCODE_PATH, &params).await
    }

    /// Live weather for a city name or adcode, sent as given.
    pub async fn weather(&self, city: &str) -> ProviderResponse {
        let params = WeatherParams::new(city, &self.api_key);
        self.relay("weather", WEATHER_PATH, &params).await
    }

    async fn relay<Q: Serialize>(&self, service: &str, path: &str, params: &Q) -> ProviderResponse {
        let start = Instant::now();
        let result = self.fetch_json(path, params).await;
        let elapsed = start.elapsed().as_secs_f64();

        match result {
            Ok(data) => {
                crate::metrics::record_upstream_call(service, true, elapsed);
                info!(
                    "{} API status: {}",
                    service,
                    data.get("status").unwrap_or(&serde_json::Value::Null)
                );
                data
            }
            Err(e) => {
                crate::metrics::record_upstream_call(service, false, elapsed);
                let message = sanitize(&e.to_string());
                error!("Error calling {} API: {}", service, message);
                upstream_failure(message)
            }
        }
    }

    async fn fetch_json<Q: Serialize>(&self, path: &str, params: &Q) -> Result<ProviderResponse> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| GatewayError::Upstream(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!("AMap returned HTTP {} for {}", status, path);
        }

        // The provider reports failures in the body, so non-2xx bodies are
        // relayed too as long as they are JSON.
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Upstream(format!("Failed to read response body: {}", e.without_url())))?;

        serde_json::from_str(&body).map_err(|e| {
            GatewayError::Upstream(format!("Invalid JSON from provider (HTTP {}): {}", status, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_held_in_zeroizing_buffer() {
        let client = AmapClient::new(&AmapConfig::default(), "secret-key").unwrap();
        let key: &Zeroizing<String> = &client.api_key;
        assert_eq!(key.as_str(), "secret-key");
        assert_eq!(client.base_url(), "https://restapi.amap.com/v3");
    }
}
