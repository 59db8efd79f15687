// Shared helpers for integration tests
// Author: kelexine (https://github.com/kelexine)

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use mapgate::config::{AppConfig, Credentials};
use mapgate::tools::Tools;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const MAP_KEY: &str = "test-map-key";
pub const LLM_KEY: &str = "test-llm-key";

/// Nothing listens on port 1, so connections are refused immediately.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

pub fn test_config(amap_url: &str, translate_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.amap.api_base_url = amap_url.to_string();
    config.amap.api_key = Some(MAP_KEY.to_string());
    config.amap.timeout_seconds = 5;
    config.translate.api_base_url = translate_url.to_string();
    config.translate.timeout_seconds = 5;
    config
}

pub fn test_tools(config: &AppConfig, translate_key: Option<&str>) -> Arc<Tools> {
    let credentials = Credentials {
        map_api_key: MAP_KEY.to_string(),
        translate_api_key: translate_key.map(str::to_string),
    };
    Arc::new(Tools::new(config, &credentials).unwrap())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

pub async fn post_body(app: Router, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub fn weather_body(city: &str) -> String {
    serde_json::json!({
        "status": "1",
        "count": "1",
        "info": "OK",
        "infocode": "10000",
        "lives": [{
            "province": "北京",
            "city": city,
            "adcode": "110000",
            "weather": "晴",
            "temperature": "21",
            "winddirection": "北",
            "windpower": "≤3",
            "humidity": "30"
        }]
    })
    .to_string()
}

pub fn chat_completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
