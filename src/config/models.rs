//! Configuration data structures for the mapgate gateway.
//!
//! This module defines the schema for the application settings: the HTTP
//! server, the AMap provider, the optional city-name translator and logging.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port, CORS).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream AMap REST API settings.
    #[serde(default)]
    pub amap: AmapConfig,

    /// Chat-completion endpoint used to translate city names.
    #[serde(default)]
    pub translate: TranslateConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `5000`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to answer browsers with permissive CORS headers.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

/// Settings for the AMap geocoding and weather endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmapConfig {
    /// Base URL of the AMap REST API (v3).
    #[serde(default = "default_amap_base_url")]
    pub api_base_url: String,

    /// Web service key. Usually supplied through `MAP_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    /// Default: `10`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for the city-name translation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Base URL of an OpenAI-compatible chat-completion API.
    #[serde(default = "default_translate_base_url")]
    pub api_base_url: String,

    /// Bearer token. Usually supplied through `LLM_API_KEY`.
    /// Translation is disabled when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_translate_model")]
    pub model: String,

    /// Request timeout in seconds.
    /// Default: `10`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// API keys resolved from configuration. Wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    pub map_api_key: String,
    pub translate_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("map_api_key", &crate::utils::logging::mask_secret(&self.map_api_key))
            .field(
                "translate_api_key",
                &self
                    .translate_api_key
                    .as_deref()
                    .map(crate::utils::logging::mask_secret),
            )
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_cors: true,
        }
    }
}

impl Default for AmapConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_amap_base_url(),
            api_key: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_translate_base_url(),
            api_key: None,
            model: default_translate_model(),
            timeout_seconds: default_timeout(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_amap_base_url() -> String {
    "https://restapi.amap.com/v3".to_string()
}

fn default_translate_base_url() -> String {
    "https://api.deepseek.com".to_string()
}

fn default_translate_model() -> String {
    "deepseek-chat".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_tokens() -> u32 {
    32
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
