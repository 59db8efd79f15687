//! The tool layer: geocoding and weather lookups shared by the REST API and
//! the MCP tool surface.
//!
//! `get_weather` runs names containing Latin letters through the
//! [`CityTranslator`] before querying AMap.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::amap::AmapClient;
use crate::config::{AppConfig, Credentials};
use crate::error::Result;
use crate::models::ProviderResponse;
use crate::translate::{needs_translation, CityTranslator};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info};

pub const GEOCODE_TOOL: &str = "geocode";
pub const GET_WEATHER_TOOL: &str = "get_weather";

#[derive(Clone)]
pub struct Tools {
    amap: AmapClient,
    translator: CityTranslator,
}

impl Tools {
    pub fn new(config: &AppConfig, credentials: &Credentials) -> Result<Self> {
        let amap = AmapClient::new(&config.amap, &credentials.map_api_key)?;
        let translator =
            CityTranslator::new(&config.translate, credentials.translate_api_key.as_deref())?;

        Ok(Self { amap, translator })
    }

    pub fn translation_enabled(&self) -> bool {
        self.translator.is_enabled()
    }

    pub fn amap_base_url(&self) -> &str {
        self.amap.base_url()
    }

    /// Convert an address into coordinates, optionally restricted to `city`.
    pub async fn geocode(&self, address: &str, city: &str) -> ProviderResponse {
        self.amap.geocode(address, city).await
    }

    /// Live weather for `city`.
    pub async fn get_weather(&self, city: &str) -> ProviderResponse {
        let city = city.trim();
        info!("Getting weather for: {}", city);

        let query_city = if needs_translation(city) {
            self.translator.translate_city(city).await
        } else {
            debug!("City name needs no translation: {}", city);
            crate::metrics::record_translation("skipped");
            city.to_string()
        };

        self.amap.weather(&query_city).await
    }
}

/// Tool metadata advertised through `tools/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

pub fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor {
            name: GEOCODE_TOOL,
            description: "Convert an address into geographic coordinates.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "Address or place name to look up"
                    },
                    "city": {
                        "type": "string",
                        "description": "Optional city to restrict the search to"
                    }
                },
                "required": ["address"]
            }),
        },
        ToolDescriptor {
            name: GET_WEATHER_TOOL,
            description: "Get live weather for a city.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "city": {
                        "type": "string",
                        "description": "City name or adcode; non-Chinese names are translated first"
                    }
                },
                "required": ["city"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptors_list_both_tools() {
        let names: Vec<_> = descriptors().iter().map(|d| d.name).collect();
        assert_eq!(names, vec![GEOCODE_TOOL, GET_WEATHER_TOOL]);
    }

    #[test]
    fn test_descriptor_serializes_camel_case() {
        let value = serde_json::to_value(&descriptors()[1]).unwrap();
        assert_eq!(value["name"], "get_weather");
        assert_eq!(value["inputSchema"]["required"][0], "city");
    }
}
