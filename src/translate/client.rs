// Chat-completion client used for city-name translation
// Author: kelexine (https://github.com/kelexine)

use super::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, CHAT_COMPLETIONS_PATH,
    SYSTEM_PROMPT,
};
use crate::config::TranslateConfig;
use crate::error::{GatewayError, Result};
use crate::utils::logging::sanitize;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use zeroize::Zeroizing;

/// Translates city names with a language model.
///
/// Translation is best effort: every failure path returns the input name.
#[derive(Clone)]
pub struct CityTranslator {
    http_client: Client,
    url: String,
    model: String,
    max_tokens: u32,
    api_key: Option<Zeroizing<String>>,
}

impl CityTranslator {
    pub fn new(config: &TranslateConfig, api_key: Option<&str>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        if api_key.is_none() {
            warn!("No translation API key configured; city names will be sent untranslated");
        }

        Ok(Self {
            http_client,
            url: format!(
                "{}{}",
                config.api_base_url.trim_end_matches('/'),
                CHAT_COMPLETIONS_PATH
            ),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            api_key: api_key.map(|k| Zeroizing::new(k.to_string())),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Translate `name`, falling back to `name` itself when translation is
    /// disabled or fails.
    pub async fn translate_city(&self, name: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("Translation API key missing, using original city name: {}", name);
            crate::metrics::record_translation("disabled");
            return name.to_string();
        };

        let start = Instant::now();
        let result = self.request_translation(name, api_key).await;
        let elapsed = start.elapsed().as_secs_f64();

        match result {
            Ok(translated) => {
                crate::metrics::record_upstream_call("translate", true, elapsed);
                crate::metrics::record_translation("translated");
                info!("Translated city name: {} -> {}", name, translated);
                translated
            }
            Err(e) => {
                crate::metrics::record_upstream_call("translate", false, elapsed);
                crate::metrics::record_translation("failed");
                error!("City name translation failed for {}: {}", name, sanitize(&e.to_string()));
                name.to_string()
            }
        }
    }

    async fn request_translation(&self, name: &str, api_key: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: name,
                },
            ],
            temperature: 0.0,
            max_tokens: self.max_tokens,
            stream: false,
        };

        debug!("Requesting translation for {} via {}", name, self.url);

        let response = self
            .http_client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Upstream(format!("HTTP error: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::Upstream(format!(
                "HTTP {}: {}",
                status,
                error_text.chars().take(200).collect::<String>()
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Upstream(format!("Invalid response: {}", e.without_url())))?;

        completion
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| GatewayError::Upstream("Empty translation in response".to_string()))
    }
}
