// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod env_file;
mod models;

pub use env_file::{decode_with_fallback, EnvFile, TextEncoding};
pub use models::*;

use crate::error::{GatewayError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

/// Well-known variable holding the AMap web service key.
pub const MAP_API_KEY_VAR: &str = "MAP_API_KEY";

/// Well-known variable holding the chat-completion bearer token.
pub const LLM_API_KEY_VAR: &str = "LLM_API_KEY";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Process environment (highest)
    /// 2. `.env` file variables
    /// 3. Config file
    /// 4. Defaults (lowest)
    ///
    /// `MAPGATE_<SECTION>__<FIELD>` variables override single fields; the
    /// well-known `MAP_API_KEY` and `LLM_API_KEY` fill in the credentials.
    pub fn load(config_path: Option<&Path>, env_file: Option<&EnvFile>) -> Result<Self> {
        let file = match config_path {
            Some(path) => File::from(path.to_path_buf()).required(true),
            None => File::from(Self::default_config_path()).required(false),
        };

        let mut builder = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file);

        if let Some(env_file) = env_file {
            let vars: config::Map<String, String> = env_file
                .vars()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            builder = builder.add_source(Self::environment().source(Some(vars)));
        }

        let config = builder
            .add_source(Self::environment())
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        if let Some(key) = lookup_var(MAP_API_KEY_VAR, env_file) {
            app_config.amap.api_key = Some(key);
        }
        if let Some(key) = lookup_var(LLM_API_KEY_VAR, env_file) {
            app_config.translate.api_key = Some(key);
        }

        Ok(app_config)
    }

    /// Resolve the API keys. The AMap key is mandatory, the translation key is not.
    pub fn credentials(&self) -> Result<Credentials> {
        let map_api_key = self
            .amap
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                GatewayError::Config(format!(
                    "No AMap API key configured. Set {} or amap.api_key",
                    MAP_API_KEY_VAR
                ))
            })?;

        let translate_api_key = self
            .translate
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty());

        Ok(Credentials {
            map_api_key,
            translate_api_key,
        })
    }

    fn environment() -> Environment {
        Environment::with_prefix("MAPGATE")
            .prefix_separator("_")
            .separator("__")
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mapgate")
            .join("config.toml")
    }
}

/// Process environment first, then the `.env` file. Blank values count as unset.
fn lookup_var(name: &str, env_file: Option<&EnvFile>) -> Option<String> {
    std::env::var(name)
        .ok()
        .or_else(|| env_file.and_then(|f| f.get(name)).map(str::to_string))
        .filter(|v| !v.trim().is_empty())
}
